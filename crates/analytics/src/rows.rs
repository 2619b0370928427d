use chrono::NaiveDate;
use core_types::Gender;
use rust_decimal::Decimal;
use serde::Serialize;

/// A typed metric result row that knows how to present itself as a table row.
///
/// Every metric returns a `Vec` of one of these types; the reporter crate uses
/// the trait to turn them into generic named tables without knowing the
/// individual metrics.
pub trait TableRow {
    fn columns() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// Total revenue per customer. Customers with no orders do not appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSales {
    pub customer_id: u32,
    pub full_name: String,
    pub total_sales: Decimal,
}

impl TableRow for CustomerSales {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "full_name", "total_sales"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.full_name.clone(),
            self.total_sales.to_string(),
        ]
    }
}

/// Order count per month bucket, chronologically ordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOrderCount {
    pub month: String,
    pub order_count: usize,
}

impl TableRow for MonthOrderCount {
    fn columns() -> &'static [&'static str] {
        &["month", "order_count"]
    }
    fn cells(&self) -> Vec<String> {
        vec![self.month.clone(), self.order_count.to_string()]
    }
}

/// Units sold per product, used by the top-N products metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductQuantity {
    pub product_id: u32,
    pub product_name: String,
    pub total_quantity: u64,
}

impl TableRow for ProductQuantity {
    fn columns() -> &'static [&'static str] {
        &["product_id", "product_name", "total_quantity"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.product_name.clone(),
            self.total_quantity.to_string(),
        ]
    }
}

/// One order row with its customer's cumulative revenue up to (and including)
/// the row's order date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningTotal {
    pub customer_id: u32,
    pub order_id: u32,
    pub order_date: NaiveDate,
    pub running_total: Decimal,
}

impl TableRow for RunningTotal {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "order_id", "order_date", "running_total"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.order_id.to_string(),
            self.order_date.to_string(),
            self.running_total.to_string(),
        ]
    }
}

/// A product's revenue rank within its category (competition ranking).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProductRank {
    pub category: String,
    pub product_id: u32,
    pub product_name: String,
    pub total_revenue: Decimal,
    pub rank: u32,
}

impl TableRow for CategoryProductRank {
    fn columns() -> &'static [&'static str] {
        &["category", "product_id", "product_name", "total_revenue", "rank"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            self.product_id.to_string(),
            self.product_name.clone(),
            self.total_revenue.to_string(),
            self.rank.to_string(),
        ]
    }
}

/// First and last order date per customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOrderSpan {
    pub customer_id: u32,
    pub full_name: String,
    pub first_order_date: NaiveDate,
    pub last_order_date: NaiveDate,
}

impl TableRow for CustomerOrderSpan {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "full_name", "first_order_date", "last_order_date"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.full_name.clone(),
            self.first_order_date.to_string(),
            self.last_order_date.to_string(),
        ]
    }
}

/// Distinct active month buckets per customer; retained means more than one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRetention {
    pub customer_id: u32,
    pub full_name: String,
    pub active_months: usize,
    pub retained: bool,
}

impl TableRow for CustomerRetention {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "full_name", "active_months", "retained"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.full_name.clone(),
            self.active_months.to_string(),
            self.retained.to_string(),
        ]
    }
}

/// Average whole-day gap between a customer's consecutive orders. Customers
/// with fewer than two orders have no gaps and do not appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOrderGap {
    pub customer_id: u32,
    pub full_name: String,
    pub avg_days_between_orders: Decimal,
}

impl TableRow for CustomerOrderGap {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "full_name", "avg_days_between_orders"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.full_name.clone(),
            self.avg_days_between_orders.to_string(),
        ]
    }
}

/// Total revenue of a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueDay {
    pub order_date: NaiveDate,
    pub total_revenue: Decimal,
}

impl TableRow for RevenueDay {
    fn columns() -> &'static [&'static str] {
        &["order_date", "total_revenue"]
    }
    fn cells(&self) -> Vec<String> {
        vec![self.order_date.to_string(), self.total_revenue.to_string()]
    }
}

/// Unit-price spread per category, computed over the catalog (not weighted by
/// sales).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPriceSummary {
    pub category: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub avg_price: Decimal,
}

impl TableRow for CategoryPriceSummary {
    fn columns() -> &'static [&'static str] {
        &["category", "min_price", "max_price", "avg_price"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            self.min_price.to_string(),
            self.max_price.to_string(),
            self.avg_price.to_string(),
        ]
    }
}

/// Units sold per product per month bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMonthQuantity {
    pub product_id: u32,
    pub product_name: String,
    pub month: String,
    pub total_quantity: u64,
}

impl TableRow for ProductMonthQuantity {
    fn columns() -> &'static [&'static str] {
        &["product_id", "product_name", "month", "total_quantity"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.product_name.clone(),
            self.month.clone(),
            self.total_quantity.to_string(),
        ]
    }
}

/// The top-revenue product of a month bucket; ties produce one row each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTopProduct {
    pub month: String,
    pub product_id: u32,
    pub product_name: String,
    pub total_revenue: Decimal,
}

impl TableRow for MonthTopProduct {
    fn columns() -> &'static [&'static str] {
        &["month", "product_id", "product_name", "total_revenue"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.product_id.to_string(),
            self.product_name.clone(),
            self.total_revenue.to_string(),
        ]
    }
}

/// Revenue summed over all orders of customers of one gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderRevenue {
    pub gender: Gender,
    pub total_revenue: Decimal,
}

impl TableRow for GenderRevenue {
    fn columns() -> &'static [&'static str] {
        &["gender", "total_revenue"]
    }
    fn cells(&self) -> Vec<String> {
        vec![self.gender.to_string(), self.total_revenue.to_string()]
    }
}

/// Total revenue per customer, used by the top-N customers metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRevenue {
    pub customer_id: u32,
    pub full_name: String,
    pub total_revenue: Decimal,
}

impl TableRow for CustomerRevenue {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "full_name", "total_revenue"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.full_name.clone(),
            self.total_revenue.to_string(),
        ]
    }
}

/// A product's share of total revenue, in percent rounded half-up to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductContribution {
    pub product_id: u32,
    pub product_name: String,
    pub total_revenue: Decimal,
    pub pct_of_total: Decimal,
}

impl TableRow for ProductContribution {
    fn columns() -> &'static [&'static str] {
        &["product_id", "product_name", "total_revenue", "pct_of_total"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.product_name.clone(),
            self.total_revenue.to_string(),
            self.pct_of_total.to_string(),
        ]
    }
}

/// A (customer, date) pair with more than one distinct product ordered. The
/// raw schema has no order-header id, so one customer-day models one basket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboOrder {
    pub customer_id: u32,
    pub order_date: NaiveDate,
    pub num_products: usize,
}

impl TableRow for ComboOrder {
    fn columns() -> &'static [&'static str] {
        &["customer_id", "order_date", "num_products"]
    }
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.order_date.to_string(),
            self.num_products.to_string(),
        ]
    }
}
