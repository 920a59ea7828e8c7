//! `salary-dashboard` loads a table of salary records once, narrows it with categorical
//! filters, and computes the statistics a salary exploration dashboard displays.
//!
//! The flow is an explicit, pure pipeline:
//!
//! 1. [`ingestion::load_dataset`] / [`salary::load_salaries`] read a CSV (local path or HTTP(S)
//!    URL) into an immutable [`types::DataSet`].
//! 2. [`filters::FilterRegistry`] exposes the distinct values of each [`salary::Dimension`]
//!    (year, seniority, contract type, company size) and holds the user's selection.
//! 3. [`processing::apply_filters`] turns the selection into a [`processing::FilteredView`].
//! 4. [`processing::aggregate`] computes summary metrics and grouped aggregates over the view;
//!    [`dashboard::Dashboard::snapshot`] bundles all of them for a presentation layer.
//!
//! Rendering is not part of this crate: every output is plain, serde-serialisable data.
//!
//! ## Quick example
//!
//! ```no_run
//! use salary_dashboard::dashboard::{Dashboard, DashboardOptions};
//! use salary_dashboard::ingestion::{DataSource, LoadOptions};
//! use salary_dashboard::salary::{load_salaries, Dimension, DEFAULT_SOURCE_URL};
//! use salary_dashboard::types::Category;
//!
//! # fn main() -> Result<(), salary_dashboard::DashboardError> {
//! let source = DataSource::Url(DEFAULT_SOURCE_URL.to_string());
//! let ds = load_salaries(&source, &LoadOptions::default())?;
//!
//! let dash = Dashboard::new(&ds, DashboardOptions::default());
//! let mut registry = dash.registry()?;
//! registry.set_selection(Dimension::Seniority, [Category::text("senior")])?;
//!
//! let snapshot = dash.snapshot(registry.selection())?;
//! println!("mean={} n={}", snapshot.summary.mean_usd, snapshot.record_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! - [`LoadError`]: the source is unreachable or malformed. Fatal; nothing is retried.
//! - [`InvalidSelectionError`]: a selection named a value the dataset does not contain. The
//!   registry keeps its previous selection.
//! - [`DataIntegrityError`]: an aggregation met a missing column or a non-numeric cell.
//!
//! An empty filtered view is not an error: summary metrics fall back to zeros and `"N/A"`,
//! and chart aggregates are empty.
//!
//! ## Modules
//!
//! - [`ingestion`]: dataset loading (CSV, HTTP fetch, load observers)
//! - [`types`]: schema, values, categories and the in-memory dataset
//! - [`salary`]: salary-record columns and filter dimensions
//! - [`filters`]: filter registry and selections
//! - [`processing`]: filter engine, reductions and aggregations
//! - [`dashboard`]: the snapshot pipeline and its options
//! - [`error`]: error types

pub mod dashboard;
pub mod error;
pub mod filters;
pub mod ingestion;
pub mod processing;
pub mod salary;
pub mod types;

pub use error::{
    ConfigError, DashboardError, DataIntegrityError, InvalidSelectionError, LoadError, LoadResult,
};
