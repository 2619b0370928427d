use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Order {order_id} references unknown customer {customer_id}")]
    DanglingCustomer { order_id: u32, customer_id: u32 },

    #[error("Order {order_id} references unknown product {product_id}")]
    DanglingProduct { order_id: u32, product_id: u32 },
}
