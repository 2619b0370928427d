use core_types::MonthGrouping;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for a reporting run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub inputs: Inputs,
    #[serde(default)]
    pub report: ReportSettings,
}

/// Paths of the three entity CSV files.
#[derive(Debug, Clone, Deserialize)]
pub struct Inputs {
    pub customers: PathBuf,
    pub products: PathBuf,
    pub orders: PathBuf,
}

/// Knobs for the metric engine and report assembler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How month-grouped metrics bucket dates. "calendar-month" reproduces
    /// the source reports (month name only, years merged); "year-month"
    /// keeps years apart.
    pub month_grouping: MonthGrouping,
    /// How many rows the top-products ranking keeps.
    pub top_products: usize,
    /// How many rows the top-customers ranking keeps.
    pub top_customers: usize,
    /// The metric names to compute. Empty means all metrics.
    pub metrics: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            month_grouping: MonthGrouping::default(),
            top_products: 5,
            top_customers: 5,
            metrics: Vec::new(),
        }
    }
}
