use crate::enums::Gender;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer of the store. One row per customer; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: u32,
    pub full_name: String,
    pub gender: Gender,
    pub join_date: NaiveDate,
}

/// A product in the catalog. `price` is the unit price and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: u32,
    pub product_name: String,
    pub category: String,
    pub price: Decimal,
}

/// A single order line: one customer buying a quantity of one product on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u32,
    pub customer_id: u32,
    pub product_id: u32,
    pub quantity: u32,
    pub order_date: NaiveDate,
}

/// An `Order` joined with its product's and customer's attributes.
///
/// This is the denormalized view every metric computes over. `revenue` is the
/// line revenue, quantity x unit price, computed once at join time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedOrder {
    pub order_id: u32,
    pub customer_id: u32,
    pub product_id: u32,
    pub quantity: u32,
    pub order_date: NaiveDate,
    // Joined from Product.
    pub product_name: String,
    pub category: String,
    pub price: Decimal,
    // Joined from Customer.
    pub full_name: String,
    pub gender: Gender,
    pub join_date: NaiveDate,
    // Computed.
    pub revenue: Decimal,
}
