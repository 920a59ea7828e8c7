use thiserror::Error;

use crate::salary::Dimension;
use crate::types::Category;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the dataset loader.
///
/// Every variant is fatal: the dashboard cannot start without a dataset. Nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The remote source could not be reached (DNS, connect, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote source answered with a non-success status.
    #[error("http status {status} fetching '{url}'")]
    HttpStatus { url: String, status: u16 },

    /// The input does not conform to the expected schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// A selection contained values outside the dimension's distinct-value domain.
///
/// Recoverable: the registry keeps the previous selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selection for '{dimension}': values not present in dataset: {}", join_categories(.rejected))]
pub struct InvalidSelectionError {
    /// Dimension the selection was aimed at.
    pub dimension: Dimension,
    /// Offending values, sorted.
    pub rejected: Vec<Category>,
}

/// A column required by an aggregation is absent or holds a non-numeric cell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataIntegrityError {
    /// The column does not exist in the schema.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A numeric aggregation hit a null or non-numeric cell.
    ///
    /// `row` is the 0-based position within the filtered view.
    #[error("non-numeric value in column '{column}' at view row {row}: {found}")]
    NonNumeric {
        column: String,
        row: usize,
        found: String,
    },
}

/// Error reading [`crate::dashboard::DashboardOptions`] from a file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Umbrella error for callers that drive the whole pipeline.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    InvalidSelection(#[from] InvalidSelectionError),

    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing the raw table dump failed.
    #[error("csv export error: {0}")]
    Export(#[from] csv::Error),
}

fn join_categories(values: &[Category]) -> String {
    values
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
