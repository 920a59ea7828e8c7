//! CSV parsing into a schema-typed [`DataSet`].

use std::io::Read;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Parse a local CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The file must have a header row.
/// - Headers must contain every schema field; order can differ and extra columns are ignored.
/// - Each cell is parsed according to its schema field type; empty cells become
///   [`Value::Null`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> LoadResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Parse CSV held in memory (e.g. a downloaded body).
pub fn ingest_csv_from_bytes(bytes: &[u8], schema: &Schema) -> LoadResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Parse CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> LoadResult<DataSet> {
    let headers = rdr.headers()?.clone();
    let col_idxs = resolve_columns(&headers, schema)?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users, and the header occupies row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let row = schema
            .fields
            .iter()
            .zip(&col_idxs)
            .map(|(field, &csv_idx)| {
                let raw = record.get(csv_idx).unwrap_or("");
                parse_typed_value(raw, &field.data_type).map_err(|message| {
                    LoadError::ParseError {
                        row: user_row,
                        column: field.name.clone(),
                        raw: raw.to_owned(),
                        message,
                    }
                })
            })
            .collect::<LoadResult<Vec<Value>>>()?;
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Map schema fields to CSV column positions.
fn resolve_columns(headers: &csv::StringRecord, schema: &Schema) -> LoadResult<Vec<usize>> {
    schema
        .fields
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| h.trim() == field.name)
                .ok_or_else(|| LoadError::SchemaMismatch {
                    message: format!(
                        "missing required column '{}'. headers={:?}",
                        field.name,
                        headers.iter().collect::<Vec<_>>()
                    ),
                })
        })
        .collect()
}

fn parse_typed_value(raw: &str, data_type: &DataType) -> Result<Value, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| e.to_string()),
        DataType::Float64 => match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Value::Float64(v)),
            Ok(_) => Err("expected a finite number".to_string()),
            Err(e) => Err(e.to_string()),
        },
        DataType::Bool => parse_bool(trimmed).map(Value::Bool),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
