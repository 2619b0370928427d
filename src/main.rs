use analytics::MetricsEngine;
use clap::{Parser, Subcommand};
use configuration::{Config, Inputs, ReportSettings};
use core_types::MonthGrouping;
use reporter::{MetricId, Report, ReportAssembler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the shopmetrics reporting application.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => {
            if let Err(e) = handle_report(args) {
                eprintln!("Error during report run: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A batch reporting engine for the retail dataset (customers, products, orders).
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the entity tables, compute the business metrics and print them.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path of a TOML configuration file. CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path of the customers CSV file.
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Path of the products CSV file.
    #[arg(long)]
    products: Option<PathBuf>,

    /// Path of the orders CSV file.
    #[arg(long)]
    orders: Option<PathBuf>,

    /// Metric to compute (repeatable). Defaults to every metric.
    #[arg(long = "metric")]
    metrics: Vec<String>,

    /// How month-grouped metrics bucket dates: "calendar-month" or "year-month".
    #[arg(long)]
    month_grouping: Option<MonthGrouping>,

    /// How many rows the top-products ranking keeps.
    #[arg(long)]
    top_products: Option<usize>,

    /// How many rows the top-customers ranking keeps.
    #[arg(long)]
    top_customers: Option<usize>,

    /// Emit the whole report as one JSON document instead of text tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the orchestration of a reporting run: load, enrich, compute, print.
fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;

    let customers = loader::load_customers_from_path(&config.inputs.customers)?;
    let products = loader::load_products_from_path(&config.inputs.products)?;
    let orders = loader::load_orders_from_path(&config.inputs.orders)?;
    tracing::info!(
        customers = customers.len(),
        products = products.len(),
        orders = orders.len(),
        "Loaded entity tables."
    );

    let enriched = enrichment::enrich(&customers, &products, &orders)?;

    let selection = resolve_selection(&config.report.metrics)?;
    let assembler = ReportAssembler::new(
        MetricsEngine::new(config.report.month_grouping),
        config.report.top_products,
        config.report.top_customers,
    );
    let report = assembler.run(&products, &enriched, &selection);

    print_report(&report, args.json)?;
    Ok(())
}

/// Builds the effective configuration from the optional config file and the
/// CLI flags, with flags taking precedence.
fn resolve_config(args: &ReportArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => configuration::load_config(path)?,
        None => {
            let (Some(customers), Some(products), Some(orders)) =
                (&args.customers, &args.products, &args.orders)
            else {
                anyhow::bail!(
                    "either --config or all of --customers/--products/--orders must be given"
                );
            };
            Config {
                inputs: Inputs {
                    customers: customers.clone(),
                    products: products.clone(),
                    orders: orders.clone(),
                },
                report: ReportSettings::default(),
            }
        }
    };

    if let Some(customers) = &args.customers {
        config.inputs.customers = customers.clone();
    }
    if let Some(products) = &args.products {
        config.inputs.products = products.clone();
    }
    if let Some(orders) = &args.orders {
        config.inputs.orders = orders.clone();
    }
    if let Some(month_grouping) = args.month_grouping {
        config.report.month_grouping = month_grouping;
    }
    if let Some(top_products) = args.top_products {
        config.report.top_products = top_products;
    }
    if let Some(top_customers) = args.top_customers {
        config.report.top_customers = top_customers;
    }
    if !args.metrics.is_empty() {
        config.report.metrics = args.metrics.clone();
    }

    Ok(config)
}

/// Parses the configured metric names; an empty selection means all metrics.
fn resolve_selection(names: &[String]) -> anyhow::Result<Vec<MetricId>> {
    if names.is_empty() {
        return Ok(MetricId::all().to_vec());
    }
    names
        .iter()
        .map(|name| Ok(name.parse::<MetricId>()?))
        .collect()
}

fn print_report(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for table in &report.tables {
        println!("\n{}", table.name);
        println!("{}", table.render());
    }
    for skipped in &report.skipped {
        println!("\n{} (skipped: {})", skipped.metric, skipped.reason);
    }
    Ok(())
}
