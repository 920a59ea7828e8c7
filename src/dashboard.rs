//! The dashboard pipeline: `(DataSet, FilterSelection) -> DashboardSnapshot`.
//!
//! A [`Dashboard`] borrows the loaded dataset and is asked for a fresh [`DashboardSnapshot`]
//! every time the selection changes. Nothing is cached between calls.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DashboardError, DataIntegrityError};
use crate::filters::{FilterRegistry, FilterSelection};
use crate::processing::{
    FieldMatch, FilteredView, GroupMean, HistogramBin, SummaryMetrics, apply_filters,
    categorical_distribution, grouped_mean_by_key, histogram_bins, summary_metrics,
    top_n_by_mean_compensation,
};
use crate::salary::{COMPENSATION_USD, COUNTRY_ISO3, JOB_TITLE, REMOTE_MODE};
use crate::types::{Category, DataSet};

/// Knobs for the charts. All fields have defaults; a JSON config may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardOptions {
    /// How many groups the "top by mean compensation" chart shows.
    pub top_n: usize,
    /// Column grouped by the top-N chart.
    pub top_n_field: String,
    /// Bin count of the compensation histogram.
    pub histogram_bins: usize,
    /// Column counted by the distribution (pie) chart.
    pub distribution_field: String,
    /// Job title whose per-country mean compensation is mapped.
    pub spotlight_title: String,
    /// Column the spotlight means are grouped by.
    pub spotlight_group: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            top_n_field: JOB_TITLE.to_string(),
            histogram_bins: 30,
            distribution_field: REMOTE_MODE.to_string(),
            spotlight_title: "Data Scientist".to_string(),
            spotlight_group: COUNTRY_ISO3.to_string(),
        }
    }
}

impl DashboardOptions {
    /// Read options from a JSON file. Missing keys keep their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Count of one category, for ordered chart output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Everything the presentation layer renders for one selection.
///
/// Chart collections are empty when no record matches the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Rows in the filtered view (the raw table).
    pub record_count: usize,
    /// Metric cards.
    pub summary: SummaryMetrics,
    /// Top groups by mean compensation, highest first.
    pub top_by_mean_compensation: Vec<GroupMean>,
    /// Compensation histogram.
    pub compensation_histogram: Vec<HistogramBin>,
    /// Category counts, largest first, ties by category.
    pub distribution: Vec<CategoryCount>,
    /// Mean compensation per group for the spotlight title.
    pub spotlight_means: BTreeMap<Category, f64>,
}

/// Pipeline over one immutable dataset.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    dataset: &'a DataSet,
    options: DashboardOptions,
}

impl<'a> Dashboard<'a> {
    pub fn new(dataset: &'a DataSet, options: DashboardOptions) -> Self {
        Self { dataset, options }
    }

    pub fn dataset(&self) -> &'a DataSet {
        self.dataset
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// A registry with every value selected, backing the filter widgets.
    pub fn registry(&self) -> Result<FilterRegistry, DataIntegrityError> {
        FilterRegistry::new(self.dataset)
    }

    /// Filtered records for `selection`.
    pub fn view(&self, selection: &FilterSelection) -> FilteredView<'a> {
        apply_filters(self.dataset, selection)
    }

    /// Recompute every card and chart for `selection`.
    ///
    /// The chart aggregates only read the view, so they run in parallel.
    pub fn snapshot(&self, selection: &FilterSelection) -> Result<DashboardSnapshot, DashboardError> {
        let start = Instant::now();
        let view = self.view(selection);
        let summary = summary_metrics(&view)?;

        let snapshot = if view.is_empty() {
            DashboardSnapshot {
                record_count: 0,
                summary,
                top_by_mean_compensation: Vec::new(),
                compensation_histogram: Vec::new(),
                distribution: Vec::new(),
                spotlight_means: BTreeMap::new(),
            }
        } else {
            let opts = &self.options;
            let ((top, histogram), (distribution, spotlight)) = rayon::join(
                || {
                    rayon::join(
                        || top_n_by_mean_compensation(&view, &opts.top_n_field, opts.top_n),
                        || histogram_bins(&view, COMPENSATION_USD, opts.histogram_bins),
                    )
                },
                || {
                    rayon::join(
                        || categorical_distribution(&view, &opts.distribution_field),
                        || {
                            grouped_mean_by_key(
                                &view,
                                &FieldMatch::new(JOB_TITLE, opts.spotlight_title.as_str()),
                                &opts.spotlight_group,
                                COMPENSATION_USD,
                            )
                        },
                    )
                },
            );

            let mut distribution: Vec<CategoryCount> = distribution?
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect();
            distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

            DashboardSnapshot {
                record_count: view.row_count(),
                summary,
                top_by_mean_compensation: top?,
                compensation_histogram: histogram?,
                distribution,
                spotlight_means: spotlight?,
            }
        };

        log::debug!(
            "snapshot records={} of {} in {:?}",
            snapshot.record_count,
            self.dataset.row_count(),
            start.elapsed()
        );
        Ok(snapshot)
    }
}
