//! Filter registry: per-dimension distinct values and the user's current selection.
//!
//! The registry is built once from the loaded [`DataSet`]. Each [`Dimension`] starts with its
//! full distinct-value set selected, which is equivalent to "no filtering". Selections that
//! name a value absent from the dataset are rejected and the previous selection is kept.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::{DataIntegrityError, InvalidSelectionError};
use crate::salary::Dimension;
use crate::types::{Category, DataSet};

/// Accepted values per dimension.
///
/// A dimension absent from the map is unconstrained. An empty set accepts nothing.
pub type FilterSelection = BTreeMap<Dimension, HashSet<Category>>;

/// Distinct values and current selection for every [`Dimension`].
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    domains: BTreeMap<Dimension, BTreeSet<Category>>,
    selection: FilterSelection,
}

impl FilterRegistry {
    /// Build the registry from `dataset`, selecting every value of every dimension.
    ///
    /// Fails if a dimension's column is not part of the dataset schema.
    pub fn new(dataset: &DataSet) -> Result<Self, DataIntegrityError> {
        let mut domains = BTreeMap::new();
        for dim in Dimension::ALL {
            let values = dataset.distinct_values(dim.column()).ok_or_else(|| {
                DataIntegrityError::MissingColumn {
                    column: dim.column().to_owned(),
                }
            })?;
            domains.insert(dim, values);
        }
        let selection = full_selection(&domains);
        Ok(Self { domains, selection })
    }

    /// Sorted distinct values present in the dataset for `dim`.
    pub fn distinct_values(&self, dim: Dimension) -> &BTreeSet<Category> {
        // Every dimension is inserted in `new`.
        &self.domains[&dim]
    }

    /// Currently accepted values for `dim`.
    pub fn selected(&self, dim: Dimension) -> &HashSet<Category> {
        &self.selection[&dim]
    }

    /// The full current selection, ready for [`crate::processing::apply_filters`].
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Replace the accepted values for `dim`.
    ///
    /// Every value must be one of [`Self::distinct_values`]; otherwise the call fails with
    /// [`InvalidSelectionError`] listing the offending values and the selection is unchanged.
    /// An empty subset is valid and filters every record out.
    pub fn set_selection<I>(&mut self, dim: Dimension, subset: I) -> Result<(), InvalidSelectionError>
    where
        I: IntoIterator<Item = Category>,
    {
        let subset: HashSet<Category> = subset.into_iter().collect();
        let domain = &self.domains[&dim];

        let mut rejected: Vec<Category> = subset
            .iter()
            .filter(|v| !domain.contains(*v))
            .cloned()
            .collect();
        if !rejected.is_empty() {
            rejected.sort();
            log::warn!("rejected selection for {dim}: {} unknown value(s)", rejected.len());
            return Err(InvalidSelectionError {
                dimension: dim,
                rejected,
            });
        }

        log::debug!("selection for {dim}: {}/{} values", subset.len(), domain.len());
        self.selection.insert(dim, subset);
        Ok(())
    }

    /// Select every value of `dim` again.
    pub fn select_all(&mut self, dim: Dimension) {
        let all = self.domains[&dim].iter().cloned().collect();
        self.selection.insert(dim, all);
    }

    /// Restore the default (unfiltered) selection for all dimensions.
    pub fn reset(&mut self) {
        self.selection = full_selection(&self.domains);
    }
}

fn full_selection(domains: &BTreeMap<Dimension, BTreeSet<Category>>) -> FilterSelection {
    domains
        .iter()
        .map(|(dim, values)| (*dim, values.iter().cloned().collect()))
        .collect()
}
