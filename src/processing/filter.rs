//! The filter engine: [`FilterSelection`] -> [`FilteredView`].

use std::collections::HashSet;
use std::io::Write;

use crate::error::DataIntegrityError;
use crate::filters::FilterSelection;
use crate::types::{Category, DataSet, Schema, Value};

/// Order-preserving subsequence of a [`DataSet`]'s rows.
///
/// The view borrows the dataset; rebuilding it on every selection change is cheap.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    schema: &'a Schema,
    rows: Vec<&'a [Value]>,
}

impl<'a> FilteredView<'a> {
    /// View of every row in `dataset`.
    pub fn all(dataset: &'a DataSet) -> Self {
        Self::from_predicate(dataset, |_| true)
    }

    /// View of the rows in `dataset` for which `predicate` returns `true`.
    pub fn from_predicate<F>(dataset: &'a DataSet, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = dataset
            .rows
            .iter()
            .map(Vec::as_slice)
            .filter(|row| predicate(*row))
            .collect();
        Self {
            schema: &dataset.schema,
            rows,
        }
    }

    /// Narrow this view further, keeping order.
    pub fn filter<F>(&self, mut predicate: F) -> FilteredView<'a>
    where
        F: FnMut(&[Value]) -> bool,
    {
        FilteredView {
            schema: self.schema,
            rows: self.rows.iter().copied().filter(|row| predicate(*row)).collect(),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn rows(&self) -> &[&'a [Value]] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of `column` in the schema, or [`DataIntegrityError::MissingColumn`].
    pub fn column_index(&self, column: &str) -> Result<usize, DataIntegrityError> {
        self.schema
            .index_of(column)
            .ok_or_else(|| DataIntegrityError::MissingColumn {
                column: column.to_owned(),
            })
    }

    /// Iterate the cells of one column. Short rows yield [`Value::Null`].
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &'a Value> + '_ {
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(&Value::Null))
    }

    /// Copy the viewed rows into an owned [`DataSet`] with the same schema.
    pub fn to_dataset(&self) -> DataSet {
        DataSet::new(
            self.schema.clone(),
            self.rows.iter().map(|row| row.to_vec()).collect(),
        )
    }

    /// Dump the viewed rows as CSV with a header row (the dashboard's raw table).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.schema.field_names())?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(Value::render))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Keep the records whose value in every constrained dimension is an accepted value.
///
/// Single pass over `dataset`, order-preserving. An empty accepted set, or a dimension whose
/// column is not in the schema, yields an empty view.
pub fn apply_filters<'a>(dataset: &'a DataSet, selection: &FilterSelection) -> FilteredView<'a> {
    let mut constraints: Vec<(usize, &HashSet<Category>)> = Vec::with_capacity(selection.len());
    for (dim, accepted) in selection {
        match dataset.schema.index_of(dim.column()) {
            Some(idx) if !accepted.is_empty() => constraints.push((idx, accepted)),
            _ => {
                log::debug!("dimension {dim} rules out every record");
                return FilteredView {
                    schema: &dataset.schema,
                    rows: Vec::new(),
                };
            }
        }
    }

    FilteredView::from_predicate(dataset, |row| {
        constraints.iter().all(|(idx, accepted)| {
            let value = row.get(*idx).unwrap_or(&Value::Null);
            accepted.contains(&Category::from(value))
        })
    })
}
