//! # Shopmetrics Loader
//!
//! Reads the three entity tables (customers, products, orders) from CSV
//! sources into the typed collections defined in `core-types`.
//!
//! ## Architectural Principles
//!
//! - **Per-record shape only:** the loader coerces and validates individual
//!   records (types, required fields, quantity > 0, price >= 0). It performs
//!   no joins and no cross-record checks; referential integrity is the
//!   enrichment crate's job.
//! - **Located errors:** every rejection names the entity, line and field of
//!   the offending value, so a bad row can be found in the source file.

use chrono::NaiveDate;
use core_types::{Customer, Gender, Order, Product};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;

pub mod error;

pub use error::LoaderError;

const CUSTOMER_COLUMNS: [&str; 4] = ["customer_id", "full_name", "gender", "join_date"];
const PRODUCT_COLUMNS: [&str; 4] = ["product_id", "product_name", "category", "price"];
const ORDER_COLUMNS: [&str; 5] = ["order_id", "customer_id", "product_id", "quantity", "order_date"];

/// Loads customers from a CSV source with columns
/// `customer_id,full_name,gender,join_date`.
pub fn load_customers<R: Read>(source: R) -> Result<Vec<Customer>, LoaderError> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = resolve_columns(&mut reader, "customer", &CUSTOMER_COLUMNS)?;

    let mut customers = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = Row::new("customer", &record, &columns);

        customers.push(Customer {
            customer_id: row.parse_u32(0, "customer_id")?,
            full_name: row.text(1, "full_name")?.to_string(),
            gender: row.parse_gender(2, "gender")?,
            join_date: row.parse_date(3, "join_date")?,
        });
    }

    tracing::debug!(count = customers.len(), "Loaded customer records.");
    Ok(customers)
}

/// Loads products from a CSV source with columns
/// `product_id,product_name,category,price`.
pub fn load_products<R: Read>(source: R) -> Result<Vec<Product>, LoaderError> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = resolve_columns(&mut reader, "product", &PRODUCT_COLUMNS)?;

    let mut products = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = Row::new("product", &record, &columns);

        let price = row.parse_decimal(3, "price")?;
        if price.is_sign_negative() {
            return Err(row.malformed("price", format!("must not be negative, got {}", price)));
        }

        products.push(Product {
            product_id: row.parse_u32(0, "product_id")?,
            product_name: row.text(1, "product_name")?.to_string(),
            category: row.text(2, "category")?.to_string(),
            price,
        });
    }

    tracing::debug!(count = products.len(), "Loaded product records.");
    Ok(products)
}

/// Loads orders from a CSV source with columns
/// `order_id,customer_id,product_id,quantity,order_date`.
pub fn load_orders<R: Read>(source: R) -> Result<Vec<Order>, LoaderError> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = resolve_columns(&mut reader, "order", &ORDER_COLUMNS)?;

    let mut orders = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = Row::new("order", &record, &columns);

        let quantity = row.parse_u32(3, "quantity")?;
        if quantity == 0 {
            return Err(row.malformed("quantity", "must be positive, got 0".to_string()));
        }

        orders.push(Order {
            order_id: row.parse_u32(0, "order_id")?,
            customer_id: row.parse_u32(1, "customer_id")?,
            product_id: row.parse_u32(2, "product_id")?,
            quantity,
            order_date: row.parse_date(4, "order_date")?,
        });
    }

    tracing::debug!(count = orders.len(), "Loaded order records.");
    Ok(orders)
}

pub fn load_customers_from_path(path: &Path) -> Result<Vec<Customer>, LoaderError> {
    load_customers(std::fs::File::open(path)?)
}

pub fn load_products_from_path(path: &Path) -> Result<Vec<Product>, LoaderError> {
    load_products(std::fs::File::open(path)?)
}

pub fn load_orders_from_path(path: &Path) -> Result<Vec<Order>, LoaderError> {
    load_orders(std::fs::File::open(path)?)
}

/// Maps the expected column names to their indices in the header row, so the
/// input files may carry the columns in any order.
fn resolve_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    entity: &'static str,
    expected: &[&'static str],
) -> Result<Vec<usize>, LoaderError> {
    let headers = reader.headers()?.clone();

    expected
        .iter()
        .map(|&name| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| LoaderError::MalformedRecord {
                    entity,
                    line: 1,
                    field: name,
                    message: "required column is missing from the header".to_string(),
                })
        })
        .collect()
}

/// A single CSV record plus the context needed to report located errors.
struct Row<'a> {
    entity: &'static str,
    record: &'a csv::StringRecord,
    columns: &'a [usize],
    line: u64,
}

impl<'a> Row<'a> {
    fn new(entity: &'static str, record: &'a csv::StringRecord, columns: &'a [usize]) -> Self {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        Self {
            entity,
            record,
            columns,
            line,
        }
    }

    fn malformed(&self, field: &'static str, message: String) -> LoaderError {
        LoaderError::MalformedRecord {
            entity: self.entity,
            line: self.line,
            field,
            message,
        }
    }

    /// Returns the raw text of the field, rejecting missing or empty values.
    fn text(&self, index: usize, field: &'static str) -> Result<&'a str, LoaderError> {
        let value = self
            .record
            .get(self.columns[index])
            .map(str::trim)
            .unwrap_or("");

        if value.is_empty() {
            Err(self.malformed(field, "required field is missing or empty".to_string()))
        } else {
            Ok(value)
        }
    }

    fn parse_u32(&self, index: usize, field: &'static str) -> Result<u32, LoaderError> {
        let raw = self.text(index, field)?;
        raw.parse::<u32>()
            .map_err(|_| self.malformed(field, format!("expected a non-negative integer, got '{}'", raw)))
    }

    fn parse_decimal(&self, index: usize, field: &'static str) -> Result<Decimal, LoaderError> {
        let raw = self.text(index, field)?;
        raw.parse::<Decimal>()
            .map_err(|_| self.malformed(field, format!("expected a decimal number, got '{}'", raw)))
    }

    fn parse_date(&self, index: usize, field: &'static str) -> Result<NaiveDate, LoaderError> {
        let raw = self.text(index, field)?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| self.malformed(field, format!("expected an ISO date (YYYY-MM-DD), got '{}'", raw)))
    }

    fn parse_gender(&self, index: usize, field: &'static str) -> Result<Gender, LoaderError> {
        let raw = self.text(index, field)?;
        raw.parse::<Gender>()
            .map_err(|e| self.malformed(field, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn loads_well_formed_customers() {
        let csv = "customer_id,full_name,gender,join_date\n\
                   1,Ann Perkins,F,2023-01-01\n\
                   2,Ben Wyatt,M,2023-02-15\n";

        let customers = load_customers(csv.as_bytes()).unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].full_name, "Ann Perkins");
        assert_eq!(customers[0].gender, Gender::Female);
        assert_eq!(customers[1].join_date.to_string(), "2023-02-15");
    }

    #[test]
    fn loads_columns_in_any_order() {
        let csv = "price,category,product_id,product_name\n\
                   2.00,Office,10,Pen\n";

        let products = load_products(csv.as_bytes()).unwrap();
        assert_eq!(products[0].product_id, 10);
        assert_eq!(products[0].price, dec!(2.00));
    }

    #[test]
    fn rejects_unparseable_date_with_location() {
        let csv = "customer_id,full_name,gender,join_date\n\
                   1,Ann Perkins,F,01/02/2023\n";

        let err = load_customers(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { entity, line, field, .. } => {
                assert_eq!(entity, "customer");
                assert_eq!(line, 2);
                assert_eq!(field, "join_date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_required_field() {
        let csv = "product_id,product_name,category,price\n\
                   10,,Office,2.00\n";

        let err = load_products(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { field, .. } => assert_eq!(field, "product_name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_column() {
        let csv = "order_id,customer_id,product_id,order_date\n\
                   100,1,10,2023-02-01\n";

        let err = load_orders(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { field, line, .. } => {
                assert_eq!(field, "quantity");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_zero_quantity() {
        let csv = "order_id,customer_id,product_id,quantity,order_date\n\
                   100,1,10,0,2023-02-01\n";

        let err = load_orders(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { field, .. } => assert_eq!(field, "quantity"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_negative_price() {
        let csv = "product_id,product_name,category,price\n\
                   10,Pen,Office,-2.00\n";

        let err = load_products(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { field, .. } => assert_eq!(field, "price"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_numeric_price() {
        let csv = "product_id,product_name,category,price\n\
                   10,Pen,Office,cheap\n";

        let err = load_products(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { field, message, .. } => {
                assert_eq!(field, "price");
                assert!(message.contains("cheap"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_yields_empty_collection() {
        let csv = "order_id,customer_id,product_id,quantity,order_date\n";
        let orders = load_orders(csv.as_bytes()).unwrap();
        assert!(orders.is_empty());
    }
}
