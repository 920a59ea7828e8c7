//! Aggregations behind the dashboard's cards and charts.
//!
//! Every function is a pure read of a [`FilteredView`] and can be computed independently of
//! the others. Empty views are a normal state: each function documents what it returns for
//! one, and none of them treats it as an error.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::DataIntegrityError;
use crate::salary::{COMPENSATION_USD, JOB_TITLE};
use crate::types::{Category, Value};

use super::filter::FilteredView;
use super::reduce::{ReduceOp, numeric_cell, numeric_column, reduce};

/// Title reported when no record has a job title.
pub const NO_TITLE: &str = "N/A";

/// Headline figures for the filtered records (compensation in USD).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub mean_usd: f64,
    pub max_usd: f64,
    pub min_usd: f64,
    pub count: usize,
    pub most_frequent_title: String,
}

impl SummaryMetrics {
    /// Values shown when nothing matches the filters: zeros and [`NO_TITLE`].
    pub fn empty() -> Self {
        Self {
            mean_usd: 0.0,
            max_usd: 0.0,
            min_usd: 0.0,
            count: 0,
            most_frequent_title: NO_TITLE.to_string(),
        }
    }
}

/// Mean of a value column for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub key: Category,
    pub mean: f64,
}

/// One equal-width histogram bin. `upper` is exclusive except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Auxiliary predicate: `column == equals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub column: String,
    pub equals: Category,
}

impl FieldMatch {
    pub fn new(column: impl Into<String>, equals: impl Into<Category>) -> Self {
        Self {
            column: column.into(),
            equals: equals.into(),
        }
    }
}

/// Mean/max/min compensation, record count and most frequent job title.
///
/// An empty view yields [`SummaryMetrics::empty`]. When several titles share the highest
/// count, the lexicographically smallest wins. Records without a title are not counted
/// towards the mode.
pub fn summary_metrics(view: &FilteredView<'_>) -> Result<SummaryMetrics, DataIntegrityError> {
    if view.is_empty() {
        return Ok(SummaryMetrics::empty());
    }

    let as_f64 = |v: Value| v.as_f64().unwrap_or(0.0);
    let mean_usd = as_f64(reduce(view, COMPENSATION_USD, ReduceOp::Mean)?);
    let max_usd = as_f64(reduce(view, COMPENSATION_USD, ReduceOp::Max)?);
    let min_usd = as_f64(reduce(view, COMPENSATION_USD, ReduceOp::Min)?);

    Ok(SummaryMetrics {
        mean_usd,
        max_usd,
        min_usd,
        count: view.row_count(),
        most_frequent_title: most_frequent_text(view, JOB_TITLE)?
            .unwrap_or_else(|| NO_TITLE.to_string()),
    })
}

fn most_frequent_text(view: &FilteredView<'_>, column: &str) -> Result<Option<String>, DataIntegrityError> {
    let idx = view.column_index(column)?;
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for value in view.column_values(idx) {
        if matches!(value, Value::Null) {
            continue;
        }
        *counts.entry(Category::from(value)).or_default() += 1;
    }

    // Highest count first, then smallest key.
    Ok(counts
        .into_iter()
        .min_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)))
        .map(|(key, _)| key.to_string()))
}

/// Groups of `field` ranked by mean `value_field`, highest first, at most `n` of them.
///
/// Groups are formed in first-encounter order and sorted stably, so equal means keep the
/// order in which their groups first appeared. An empty view yields an empty list.
pub fn top_n_by_mean(
    view: &FilteredView<'_>,
    field: &str,
    value_field: &str,
    n: usize,
) -> Result<Vec<GroupMean>, DataIntegrityError> {
    let key_idx = view.column_index(field)?;
    let value_idx = view.column_index(value_field)?;

    let mut slots: HashMap<Category, usize> = HashMap::new();
    let mut groups: Vec<(Category, f64, usize)> = Vec::new();
    for (row_no, row) in view.rows().iter().enumerate() {
        let value = numeric_cell(row.get(value_idx).unwrap_or(&Value::Null), value_field, row_no)?;
        let key = Category::from(row.get(key_idx).unwrap_or(&Value::Null));
        let slot = *slots.entry(key.clone()).or_insert_with(|| {
            groups.push((key, 0.0, 0));
            groups.len() - 1
        });
        groups[slot].1 += value;
        groups[slot].2 += 1;
    }

    let mut means: Vec<GroupMean> = groups
        .into_iter()
        .map(|(key, sum, count)| GroupMean {
            key,
            mean: sum / count as f64,
        })
        .collect();
    means.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    means.truncate(n);
    Ok(means)
}

/// [`top_n_by_mean`] over the compensation column.
pub fn top_n_by_mean_compensation(
    view: &FilteredView<'_>,
    field: &str,
    n: usize,
) -> Result<Vec<GroupMean>, DataIntegrityError> {
    top_n_by_mean(view, field, COMPENSATION_USD, n)
}

/// Equal-width histogram of numeric `field` over the view's observed range.
///
/// Produces `bin_count` bins spanning `[min, max]`; the last bin includes `max`. If every value
/// is the same, a single zero-width bin holds them all. An empty view or `bin_count == 0`
/// produces no bins.
pub fn histogram_bins(
    view: &FilteredView<'_>,
    field: &str,
    bin_count: usize,
) -> Result<Vec<HistogramBin>, DataIntegrityError> {
    let idx = view.column_index(field)?;
    let values = numeric_column(view, idx, field)?;
    if values.is_empty() || bin_count == 0 {
        return Ok(Vec::new());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return Ok(vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }]);
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for v in &values {
        let slot = (((v - min) / width) as usize).min(bin_count - 1);
        counts[slot] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect())
}

/// Number of records per category of `field`. Counts sum to the view length.
pub fn categorical_distribution(
    view: &FilteredView<'_>,
    field: &str,
) -> Result<HashMap<Category, usize>, DataIntegrityError> {
    let idx = view.column_index(field)?;
    let mut counts = HashMap::new();
    for value in view.column_values(idx) {
        *counts.entry(Category::from(value)).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Mean `value_field` per `group_key`, over the records matching `predicate` only.
///
/// The predicate is applied to the view before grouping and is independent of the user's
/// filter selection. No matching record yields an empty map.
pub fn grouped_mean_by_key(
    view: &FilteredView<'_>,
    predicate: &FieldMatch,
    group_key: &str,
    value_field: &str,
) -> Result<BTreeMap<Category, f64>, DataIntegrityError> {
    let match_idx = view.column_index(&predicate.column)?;
    let key_idx = view.column_index(group_key)?;
    let value_idx = view.column_index(value_field)?;

    let mut acc: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for (row_no, row) in view.rows().iter().enumerate() {
        if Category::from(row.get(match_idx).unwrap_or(&Value::Null)) != predicate.equals {
            continue;
        }
        let value = numeric_cell(row.get(value_idx).unwrap_or(&Value::Null), value_field, row_no)?;
        let entry = acc
            .entry(Category::from(row.get(key_idx).unwrap_or(&Value::Null)))
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(acc
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{
        FieldMatch, GroupMean, HistogramBin, SummaryMetrics, categorical_distribution,
        grouped_mean_by_key, histogram_bins, summary_metrics, top_n_by_mean_compensation,
    };
    use crate::error::DataIntegrityError;
    use crate::processing::FilteredView;
    use crate::salary::salary_schema;
    use crate::types::{Category, DataSet, Value};

    fn rec(year: i64, seniority: &str, title: &str, remote: &str, iso3: &str, usd: f64) -> Vec<Value> {
        vec![
            Value::Int64(year),
            Value::Utf8(seniority.to_string()),
            Value::Utf8("integral".to_string()),
            Value::Utf8("media".to_string()),
            Value::Utf8(title.to_string()),
            Value::Utf8(remote.to_string()),
            Value::Utf8(iso3.to_string()),
            Value::Float64(usd),
        ]
    }

    fn sample_dataset() -> DataSet {
        DataSet::new(
            salary_schema(),
            vec![
                rec(2023, "junior", "Data Analyst", "remoto", "BRA", 1000.0),
                rec(2023, "senior", "Data Scientist", "presencial", "USA", 5000.0),
                rec(2024, "pleno", "Data Engineer", "remoto", "BRA", 3000.0),
                rec(2024, "senior", "Data Scientist", "hibrido", "BRA", 3000.0),
                rec(2024, "junior", "Data Analyst", "remoto", "USA", 2000.0),
            ],
        )
    }

    #[test]
    fn summary_of_empty_view_uses_fallbacks() {
        let ds = sample_dataset();
        let view = FilteredView::from_predicate(&ds, |_| false);
        assert_eq!(summary_metrics(&view).unwrap(), SummaryMetrics::empty());
        assert_eq!(SummaryMetrics::empty().most_frequent_title, "N/A");
    }

    #[test]
    fn summary_of_full_view() {
        let ds = sample_dataset();
        let m = summary_metrics(&FilteredView::all(&ds)).unwrap();
        assert_eq!(m.mean_usd, 2800.0);
        assert_eq!(m.max_usd, 5000.0);
        assert_eq!(m.min_usd, 1000.0);
        assert_eq!(m.count, 5);
        // Analyst and Scientist both appear twice; the smaller title wins.
        assert_eq!(m.most_frequent_title, "Data Analyst");
    }

    #[test]
    fn summary_ignores_missing_titles_for_mode() {
        let mut ds = sample_dataset();
        for row in &mut ds.rows {
            row[4] = Value::Null;
        }
        let m = summary_metrics(&FilteredView::all(&ds)).unwrap();
        assert_eq!(m.count, 5);
        assert_eq!(m.most_frequent_title, "N/A");
    }

    #[test]
    fn top_n_sorts_descending_and_keeps_first_seen_ties() {
        let ds = sample_dataset();
        let view = FilteredView::all(&ds);
        let top = top_n_by_mean_compensation(&view, "cargo", 10).unwrap();
        assert_eq!(
            top,
            vec![
                GroupMean {
                    key: Category::text("Data Scientist"),
                    mean: 4000.0
                },
                GroupMean {
                    key: Category::text("Data Engineer"),
                    mean: 3000.0
                },
                GroupMean {
                    key: Category::text("Data Analyst"),
                    mean: 1500.0
                },
            ]
        );

        // BRA: 1000, 3000, 3000 -> 2333.3; USA: 5000, 2000 -> 3500.
        let by_country = top_n_by_mean_compensation(&view, "residencia_iso3", 1).unwrap();
        assert_eq!(by_country.len(), 1);
        assert_eq!(by_country[0].key, Category::text("USA"));
    }

    #[test]
    fn top_n_equal_means_follow_encounter_order() {
        let ds = DataSet::new(
            salary_schema(),
            vec![
                rec(2024, "pleno", "Zeta", "remoto", "BRA", 100.0),
                rec(2024, "pleno", "Alpha", "remoto", "BRA", 100.0),
            ],
        );
        let top = top_n_by_mean_compensation(&FilteredView::all(&ds), "cargo", 5).unwrap();
        let keys: Vec<_> = top.iter().map(|g| g.key.to_string()).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn top_n_of_empty_view_is_empty() {
        let ds = sample_dataset();
        let view = FilteredView::from_predicate(&ds, |_| false);
        assert!(top_n_by_mean_compensation(&view, "cargo", 10).unwrap().is_empty());
    }

    #[test]
    fn histogram_uses_equal_width_bins_over_observed_range() {
        let ds = sample_dataset();
        let bins = histogram_bins(&FilteredView::all(&ds), "usd", 4).unwrap();
        assert_eq!(
            bins,
            vec![
                HistogramBin { lower: 1000.0, upper: 2000.0, count: 1 },
                HistogramBin { lower: 2000.0, upper: 3000.0, count: 1 },
                HistogramBin { lower: 3000.0, upper: 4000.0, count: 2 },
                HistogramBin { lower: 4000.0, upper: 5000.0, count: 1 },
            ]
        );
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, ds.row_count());
    }

    #[test]
    fn histogram_edge_cases() {
        let ds = sample_dataset();
        let empty = FilteredView::from_predicate(&ds, |_| false);
        assert!(histogram_bins(&empty, "usd", 30).unwrap().is_empty());
        assert!(histogram_bins(&FilteredView::all(&ds), "usd", 0).unwrap().is_empty());

        let same = FilteredView::all(&ds).filter(|row| row[7] == Value::Float64(3000.0));
        assert_eq!(
            histogram_bins(&same, "usd", 30).unwrap(),
            vec![HistogramBin { lower: 3000.0, upper: 3000.0, count: 2 }]
        );
    }

    #[test]
    fn histogram_rejects_text_field() {
        let ds = sample_dataset();
        let err = histogram_bins(&FilteredView::all(&ds), "cargo", 10).unwrap_err();
        assert!(matches!(err, DataIntegrityError::NonNumeric { row: 0, .. }));
    }

    #[test]
    fn distribution_counts_sum_to_view_length() {
        let ds = sample_dataset();
        let view = FilteredView::all(&ds);
        let dist = categorical_distribution(&view, "remoto").unwrap();
        assert_eq!(dist[&Category::text("remoto")], 3);
        assert_eq!(dist[&Category::text("presencial")], 1);
        assert_eq!(dist[&Category::text("hibrido")], 1);
        assert_eq!(dist.values().sum::<usize>(), view.row_count());
    }

    #[test]
    fn grouped_mean_restricts_before_grouping() {
        let ds = sample_dataset();
        let view = FilteredView::all(&ds);
        let by_country = grouped_mean_by_key(
            &view,
            &FieldMatch::new("cargo", "Data Scientist"),
            "residencia_iso3",
            "usd",
        )
        .unwrap();
        let pairs: Vec<_> = by_country.into_iter().collect();
        assert_eq!(
            pairs,
            vec![(Category::text("BRA"), 3000.0), (Category::text("USA"), 5000.0)]
        );

        let none = grouped_mean_by_key(
            &view,
            &FieldMatch::new("cargo", "Astronaut"),
            "residencia_iso3",
            "usd",
        )
        .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn grouped_mean_locates_bad_cells_by_view_row() {
        let mut ds = sample_dataset();
        ds.rows[3][7] = Value::Null;
        let err = grouped_mean_by_key(
            &FilteredView::all(&ds),
            &FieldMatch::new("cargo", "Data Scientist"),
            "residencia_iso3",
            "usd",
        )
        .unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::NonNumeric {
                column: "usd".to_string(),
                row: 3,
                found: "null".to_string(),
            }
        );
    }

    #[test]
    fn non_finite_compensation_fails_every_numeric_aggregate() {
        for bad in [f64::NAN, f64::INFINITY] {
            let mut ds = sample_dataset();
            ds.rows[1][7] = Value::Float64(bad);
            let view = FilteredView::all(&ds);

            let expect_row_1 = |err: DataIntegrityError| {
                assert!(
                    matches!(err, DataIntegrityError::NonNumeric { row: 1, ref column, .. } if column == "usd"),
                    "{bad}: {err}"
                )
            };
            expect_row_1(summary_metrics(&view).unwrap_err());
            expect_row_1(histogram_bins(&view, "usd", 3).unwrap_err());
            expect_row_1(top_n_by_mean_compensation(&view, "cargo", 3).unwrap_err());
            expect_row_1(
                grouped_mean_by_key(
                    &view,
                    &FieldMatch::new("cargo", "Data Scientist"),
                    "residencia_iso3",
                    "usd",
                )
                .unwrap_err(),
            );
        }
    }

    #[test]
    fn grouped_mean_reports_missing_columns() {
        let ds = sample_dataset();
        let err = grouped_mean_by_key(
            &FilteredView::all(&ds),
            &FieldMatch::new("cargo", "Data Scientist"),
            "country",
            "usd",
        )
        .unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::MissingColumn {
                column: "country".to_string()
            }
        );
    }
}
