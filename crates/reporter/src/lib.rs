//! # Shopmetrics Reporter
//!
//! The report assembler: runs a configured subset of the metric engine's
//! operations and collects their outputs into named, presentation-ready
//! result tables.
//!
//! All metric operations are pure and independent, so execution order never
//! affects correctness. A `NoData` result from a single-row metric is
//! recorded as a skip and warned about; it does not fail the run.

use analytics::rows::TableRow;
use analytics::{AnalyticsError, MetricsEngine};
use comfy_table::Table;
use core_types::{EnrichedOrder, Product};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod error;

pub use error::ReporterError;

/// The metrics the assembler can run, with their stable report names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricId {
    TotalSalesPerCustomer,
    OrdersPerMonth,
    TopProducts,
    RunningTotalPerCustomer,
    RankProductsByRevenuePerCategory,
    FirstLastOrderPerCustomer,
    CustomerRetention,
    AverageDaysBetweenOrders,
    HighestRevenueDay,
    PriceSummaryByCategory,
    MonthlySalesPerProduct,
    TopRevenueProductPerMonth,
    RevenuePerGender,
    TopCustomersByRevenue,
    RevenuePercentContribution,
    ComboOrders,
}

impl MetricId {
    /// Every metric, in the order reports present them.
    pub fn all() -> &'static [MetricId] {
        &[
            MetricId::TotalSalesPerCustomer,
            MetricId::OrdersPerMonth,
            MetricId::TopProducts,
            MetricId::RunningTotalPerCustomer,
            MetricId::RankProductsByRevenuePerCategory,
            MetricId::FirstLastOrderPerCustomer,
            MetricId::CustomerRetention,
            MetricId::AverageDaysBetweenOrders,
            MetricId::HighestRevenueDay,
            MetricId::PriceSummaryByCategory,
            MetricId::MonthlySalesPerProduct,
            MetricId::TopRevenueProductPerMonth,
            MetricId::RevenuePerGender,
            MetricId::TopCustomersByRevenue,
            MetricId::RevenuePercentContribution,
            MetricId::ComboOrders,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricId::TotalSalesPerCustomer => "total-sales-per-customer",
            MetricId::OrdersPerMonth => "orders-per-month",
            MetricId::TopProducts => "top-products",
            MetricId::RunningTotalPerCustomer => "running-total-per-customer",
            MetricId::RankProductsByRevenuePerCategory => "rank-products-by-revenue-per-category",
            MetricId::FirstLastOrderPerCustomer => "first-last-order-per-customer",
            MetricId::CustomerRetention => "customer-retention",
            MetricId::AverageDaysBetweenOrders => "average-days-between-orders",
            MetricId::HighestRevenueDay => "highest-revenue-day",
            MetricId::PriceSummaryByCategory => "price-summary-by-category",
            MetricId::MonthlySalesPerProduct => "monthly-sales-per-product",
            MetricId::TopRevenueProductPerMonth => "top-revenue-product-per-month",
            MetricId::RevenuePerGender => "revenue-per-gender",
            MetricId::TopCustomersByRevenue => "top-customers-by-revenue",
            MetricId::RevenuePercentContribution => "revenue-percent-contribution",
            MetricId::ComboOrders => "combo-orders",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricId {
    type Err = ReporterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricId::all()
            .iter()
            .find(|id| id.name() == s)
            .copied()
            .ok_or_else(|| ReporterError::UnknownMetric(s.to_string()))
    }
}

/// A named metric result in generic tabular form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    fn from_rows<T: TableRow>(id: MetricId, rows: &[T]) -> Self {
        Self {
            name: id.name().to_string(),
            columns: T::columns().iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    /// Renders the table as text.
    pub fn render(&self) -> Table {
        let mut table = Table::new();
        table.set_header(&self.columns);
        for row in &self.rows {
            table.add_row(row);
        }
        table
    }
}

/// A metric the assembler could not produce a table for, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedMetric {
    pub metric: MetricId,
    pub reason: String,
}

/// The assembled output of a reporting run: one result table per computed
/// metric, plus the metrics skipped for lack of data.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tables: Vec<ResultTable>,
    pub skipped: Vec<SkippedMetric>,
}

impl Report {
    pub fn get(&self, name: &str) -> Option<&ResultTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Runs metric operations and assembles their outputs into a `Report`.
pub struct ReportAssembler {
    engine: MetricsEngine,
    top_products: usize,
    top_customers: usize,
}

impl ReportAssembler {
    pub fn new(engine: MetricsEngine, top_products: usize, top_customers: usize) -> Self {
        Self {
            engine,
            top_products,
            top_customers,
        }
    }

    /// Computes the selected metrics over the loaded and enriched data.
    ///
    /// Only a `NoData` outcome is tolerated (recorded as a skip); every other
    /// metric still runs.
    pub fn run(
        &self,
        products: &[Product],
        enriched: &[EnrichedOrder],
        selection: &[MetricId],
    ) -> Report {
        let mut report = Report {
            tables: Vec::with_capacity(selection.len()),
            skipped: Vec::new(),
        };

        for &id in selection {
            match self.compute(id, products, enriched) {
                Ok(table) => report.tables.push(table),
                Err(AnalyticsError::NoData(_)) => {
                    tracing::warn!(metric = %id, "Skipping single-row metric over empty input.");
                    report.skipped.push(SkippedMetric {
                        metric: id,
                        reason: "no data".to_string(),
                    });
                }
            }
        }

        tracing::info!(
            tables = report.tables.len(),
            skipped = report.skipped.len(),
            "Assembled report."
        );
        report
    }

    fn compute(
        &self,
        id: MetricId,
        products: &[Product],
        enriched: &[EnrichedOrder],
    ) -> Result<ResultTable, AnalyticsError> {
        let engine = &self.engine;
        let table = match id {
            MetricId::TotalSalesPerCustomer => {
                ResultTable::from_rows(id, &engine.total_sales_per_customer(enriched))
            }
            MetricId::OrdersPerMonth => {
                ResultTable::from_rows(id, &engine.orders_per_month(enriched))
            }
            MetricId::TopProducts => {
                ResultTable::from_rows(id, &engine.top_products(enriched, self.top_products))
            }
            MetricId::RunningTotalPerCustomer => {
                ResultTable::from_rows(id, &engine.running_total_per_customer(enriched))
            }
            MetricId::RankProductsByRevenuePerCategory => {
                ResultTable::from_rows(id, &engine.rank_products_by_revenue_per_category(enriched))
            }
            MetricId::FirstLastOrderPerCustomer => {
                ResultTable::from_rows(id, &engine.first_last_order_per_customer(enriched))
            }
            MetricId::CustomerRetention => {
                ResultTable::from_rows(id, &engine.customer_retention(enriched))
            }
            MetricId::AverageDaysBetweenOrders => {
                ResultTable::from_rows(id, &engine.average_days_between_orders(enriched))
            }
            MetricId::HighestRevenueDay => {
                let day = engine.highest_revenue_day(enriched)?;
                ResultTable::from_rows(id, &[day])
            }
            MetricId::PriceSummaryByCategory => {
                ResultTable::from_rows(id, &engine.price_summary_by_category(products))
            }
            MetricId::MonthlySalesPerProduct => {
                ResultTable::from_rows(id, &engine.monthly_sales_per_product(enriched))
            }
            MetricId::TopRevenueProductPerMonth => {
                ResultTable::from_rows(id, &engine.top_revenue_product_per_month(enriched))
            }
            MetricId::RevenuePerGender => {
                ResultTable::from_rows(id, &engine.revenue_per_gender(enriched))
            }
            MetricId::TopCustomersByRevenue => ResultTable::from_rows(
                id,
                &engine.top_customers_by_revenue(enriched, self.top_customers),
            ),
            MetricId::RevenuePercentContribution => {
                ResultTable::from_rows(id, &engine.revenue_percent_contribution(enriched))
            }
            MetricId::ComboOrders => ResultTable::from_rows(id, &engine.combo_orders(enriched)),
        };

        Ok(table)
    }
}
