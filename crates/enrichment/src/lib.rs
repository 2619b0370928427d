//! # Shopmetrics Enrichment
//!
//! Joins each `Order` to its `Product` and `Customer` to produce the
//! denormalized `EnrichedOrder` view the metric engine computes over.
//!
//! ## Architectural Principles
//!
//! - **Abort on dangling references:** an order pointing at an unknown
//!   customer or product fails the whole run rather than being silently
//!   dropped. The dataset is expected to be referentially intact; when it is
//!   not, the caller must hear about it.
//! - **Order preserving:** the output carries one `EnrichedOrder` per input
//!   `Order`, in the insertion order of the input. Metrics that need another
//!   ordering sort for themselves.

use core_types::{Customer, EnrichedOrder, Order, Product};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub mod error;

pub use error::EnrichmentError;

/// Joins orders with their products and customers.
///
/// Returns one `EnrichedOrder` per input order, in input order, with the line
/// revenue (quantity x unit price) computed. Fails on the first order whose
/// customer or product reference does not resolve.
pub fn enrich(
    customers: &[Customer],
    products: &[Product],
    orders: &[Order],
) -> Result<Vec<EnrichedOrder>, EnrichmentError> {
    let customers_by_id: HashMap<u32, &Customer> =
        customers.iter().map(|c| (c.customer_id, c)).collect();
    let products_by_id: HashMap<u32, &Product> =
        products.iter().map(|p| (p.product_id, p)).collect();

    let mut enriched = Vec::with_capacity(orders.len());
    for order in orders {
        let customer = customers_by_id.get(&order.customer_id).ok_or(
            EnrichmentError::DanglingCustomer {
                order_id: order.order_id,
                customer_id: order.customer_id,
            },
        )?;
        let product = products_by_id.get(&order.product_id).ok_or(
            EnrichmentError::DanglingProduct {
                order_id: order.order_id,
                product_id: order.product_id,
            },
        )?;

        enriched.push(EnrichedOrder {
            order_id: order.order_id,
            customer_id: order.customer_id,
            product_id: order.product_id,
            quantity: order.quantity,
            order_date: order.order_date,
            product_name: product.product_name.clone(),
            category: product.category.clone(),
            price: product.price,
            full_name: customer.full_name.clone(),
            gender: customer.gender,
            join_date: customer.join_date,
            revenue: Decimal::from(order.quantity) * product.price,
        });
    }

    tracing::debug!(
        orders = orders.len(),
        customers = customers.len(),
        products = products.len(),
        "Enriched order rows."
    );

    Ok(enriched)
}
