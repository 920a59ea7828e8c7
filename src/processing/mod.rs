//! In-memory filtering and aggregation.
//!
//! The processing layer operates on the [`crate::types::DataSet`] produced by loading:
//!
//! - [`apply_filters()`]: the user's [`crate::filters::FilterSelection`] -> [`FilteredView`]
//! - [`reduce()`]: single-column reductions (count/sum/min/max/mean)
//! - [`aggregate`]: summary metrics, top-N by mean, histograms, category counts and the
//!   filter-then-group mean
//!
//! ## Example: filter -> aggregate
//!
//! ```rust
//! use salary_dashboard::filters::FilterSelection;
//! use salary_dashboard::processing::{apply_filters, summary_metrics};
//! use salary_dashboard::salary::{salary_schema, Dimension};
//! use salary_dashboard::types::{Category, DataSet, Value};
//!
//! let row = |seniority: &str, usd: f64| {
//!     vec![
//!         Value::Int64(2023),
//!         Value::Utf8(seniority.to_string()),
//!         Value::Utf8("integral".to_string()),
//!         Value::Utf8("media".to_string()),
//!         Value::Utf8("Data Scientist".to_string()),
//!         Value::Utf8("remoto".to_string()),
//!         Value::Utf8("BRA".to_string()),
//!         Value::Float64(usd),
//!     ]
//! };
//! let ds = DataSet::new(salary_schema(), vec![row("junior", 1000.0), row("senior", 3000.0)]);
//!
//! let mut selection = FilterSelection::new();
//! selection.insert(Dimension::Year, [Category::Int(2023)].into_iter().collect());
//!
//! let view = apply_filters(&ds, &selection);
//! let metrics = summary_metrics(&view).unwrap();
//! assert_eq!(metrics.mean_usd, 2000.0);
//! assert_eq!(metrics.most_frequent_title, "Data Scientist");
//! ```

pub mod aggregate;
pub mod filter;
pub mod reduce;

pub use aggregate::{
    FieldMatch, GroupMean, HistogramBin, NO_TITLE, SummaryMetrics, categorical_distribution,
    grouped_mean_by_key, histogram_bins, summary_metrics, top_n_by_mean,
    top_n_by_mean_compensation,
};
pub use filter::{FilteredView, apply_filters};
pub use reduce::{ReduceOp, reduce};
