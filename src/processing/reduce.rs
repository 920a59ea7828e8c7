//! Single-column reductions over a [`FilteredView`].

use crate::error::DataIntegrityError;
use crate::types::Value;

use super::filter::FilteredView;

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows, whatever their content.
    Count,
    /// Sum of numeric values.
    Sum,
    /// Minimum numeric value.
    Min,
    /// Maximum numeric value.
    Max,
    /// Arithmetic mean of numeric values.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Fails with [`DataIntegrityError::MissingColumn`] if `column` is not in the schema.
/// - `Count` returns `Value::Int64(row_count)`.
/// - Numeric ops return `Value::Float64`, or `Value::Null` over an empty view. Every cell must
///   be `Int64` or `Float64`; a null or non-numeric cell fails with
///   [`DataIntegrityError::NonNumeric`].
pub fn reduce(view: &FilteredView<'_>, column: &str, op: ReduceOp) -> Result<Value, DataIntegrityError> {
    let idx = view.column_index(column)?;
    if op == ReduceOp::Count {
        return Ok(Value::Int64(view.row_count() as i64));
    }

    let values = numeric_column(view, idx, column)?;
    if values.is_empty() {
        return Ok(Value::Null);
    }

    let out = match op {
        ReduceOp::Count => return Ok(Value::Int64(values.len() as i64)),
        ReduceOp::Sum => values.iter().sum::<f64>(),
        ReduceOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        ReduceOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        ReduceOp::Mean => values.iter().sum::<f64>() / values.len() as f64,
    };
    Ok(Value::Float64(out))
}

/// Read a numeric cell, failing on nulls, non-numeric and non-finite values.
///
/// `row` is only used to locate the offending cell in the error.
pub(crate) fn numeric_cell(value: &Value, column: &str, row: usize) -> Result<f64, DataIntegrityError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataIntegrityError::NonNumeric {
            column: column.to_owned(),
            row,
            found: match value {
                Value::Null => "null".to_string(),
                other => format!("'{}'", other.render()),
            },
        })
}

/// All cells of column `idx` as `f64`, in view order.
pub(crate) fn numeric_column(
    view: &FilteredView<'_>,
    idx: usize,
    column: &str,
) -> Result<Vec<f64>, DataIntegrityError> {
    view.column_values(idx)
        .enumerate()
        .map(|(row, value)| numeric_cell(value, column, row))
        .collect()
}
