//! # Shopmetrics Analytics Engine
//!
//! This crate computes the business metrics of the reporting pipeline: totals,
//! rankings, running sums, retention and order-gap analysis over the enriched
//! order view.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` holds nothing but the
//!   month-grouping mode. Every operation takes immutable slices in and
//!   returns typed result rows out, which makes the metrics easy to test and
//!   safe to run in any order.
//! - **Explicit ordering rules:** where SQL would leave tie-breaking to the
//!   query planner, every operation here states its rule: groups form in
//!   first-encounter order, descending sorts are stable, and ranking is
//!   standard competition ranking.
//!
//! ## Public API
//!
//! - `MetricsEngine`: the struct with one method per business question.
//! - `rows`: the typed result-row structs, one per metric.
//! - `AnalyticsError`: the specific error types that can be returned here.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod rows;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricsEngine;
pub use error::AnalyticsError;
pub use rows::TableRow;
