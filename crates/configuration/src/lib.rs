use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Inputs, ReportSettings};

/// Loads the reporting configuration from a TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), "Loaded configuration.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report.top_products == 0 {
        return Err(ConfigError::ValidationError(
            "report.top_products must be at least 1".to_string(),
        ));
    }
    if config.report.top_customers == 0 {
        return Err(ConfigError::ValidationError(
            "report.top_customers must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::MonthGrouping;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_config() {
        let file = write_config(
            r#"
            [inputs]
            customers = "data/customers.csv"
            products = "data/products.csv"
            orders = "data/orders.csv"

            [report]
            month_grouping = "year-month"
            top_products = 3
            top_customers = 10
            metrics = ["orders-per-month"]
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.report.month_grouping, MonthGrouping::YearMonth);
        assert_eq!(config.report.top_products, 3);
        assert_eq!(config.report.metrics, vec!["orders-per-month"]);
    }

    #[test]
    fn report_section_is_optional_with_defaults() {
        let file = write_config(
            r#"
            [inputs]
            customers = "c.csv"
            products = "p.csv"
            orders = "o.csv"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.report.month_grouping, MonthGrouping::CalendarMonth);
        assert_eq!(config.report.top_products, 5);
        assert!(config.report.metrics.is_empty());
    }

    #[test]
    fn rejects_zero_top_n() {
        let file = write_config(
            r#"
            [inputs]
            customers = "c.csv"
            products = "p.csv"
            orders = "o.csv"

            [report]
            top_products = 0
            "#,
        );

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
