//! Core data model types.
//!
//! Loading produces an in-memory [`DataSet`] shaped by a [`Schema`] (a list of typed
//! [`Field`]s). Filtering and grouping work on [`Category`] keys derived from cell values.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the expected shape of incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Numeric view of the value; `None` for nulls, bools and strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering used in CSV dumps and error messages. Nulls render as an empty string.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Utf8(s) => s.clone(),
        }
    }
}

/// Discrete key for a cell value, used for filter domains and group-by keys.
///
/// Unlike [`Value`], categories are totally ordered and hashable. Integers sort numerically and
/// before text; [`Category::Missing`] sorts last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Integer value (e.g. a year).
    Int(i64),
    /// Text value; floats and bools are keyed by their text rendering.
    Text(String),
    /// Null cell.
    Missing,
}

impl Category {
    /// Shorthand for a text category.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl From<&Value> for Category {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Category::Missing,
            Value::Int64(v) => Category::Int(*v),
            Value::Utf8(s) => Category::Text(s.clone()),
            other => Category::Text(other.render()),
        }
    }
}

impl From<i64> for Category {
    fn from(v: i64) -> Self {
        Category::Int(v)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_owned())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Int(v) => write!(f, "{v}"),
            Category::Text(s) => f.write_str(s),
            Category::Missing => f.write_str("null"),
        }
    }
}

// Serialized as a plain string so categories can key JSON objects.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. A loaded
/// dataset is never mutated; everything downstream borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct categories of `column`, or `None` if the column does not exist.
    pub fn distinct_values(&self, column: &str) -> Option<BTreeSet<Category>> {
        let idx = self.schema.index_of(column)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(Category::from)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("ano", DataType::Int64),
            Field::new("cargo", DataType::Utf8),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(2024), Value::Utf8("Data Engineer".to_string())],
                vec![Value::Int64(2023), Value::Null],
                vec![Value::Int64(2024), Value::Utf8("Data Analyst".to_string())],
            ],
        )
    }

    #[test]
    fn schema_index_of_works() {
        let ds = sample_dataset();
        assert_eq!(ds.schema.index_of("ano"), Some(0));
        assert_eq!(ds.schema.index_of("cargo"), Some(1));
        assert_eq!(ds.schema.index_of("missing"), None);
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let ds = sample_dataset();
        let years: Vec<_> = ds.distinct_values("ano").unwrap().into_iter().collect();
        assert_eq!(years, vec![Category::Int(2023), Category::Int(2024)]);

        let titles: Vec<_> = ds.distinct_values("cargo").unwrap().into_iter().collect();
        assert_eq!(
            titles,
            vec![
                Category::text("Data Analyst"),
                Category::text("Data Engineer"),
                Category::Missing,
            ]
        );
        assert!(ds.distinct_values("missing").is_none());
    }

    #[test]
    fn category_from_value_covers_every_variant() {
        assert_eq!(Category::from(&Value::Null), Category::Missing);
        assert_eq!(Category::from(&Value::Int64(7)), Category::Int(7));
        assert_eq!(Category::from(&Value::Float64(1.5)), Category::text("1.5"));
        assert_eq!(Category::from(&Value::Bool(true)), Category::text("true"));
        assert_eq!(Category::from(&Value::Utf8("x".into())), Category::text("x"));
    }

    #[test]
    fn category_serializes_as_string_map_key() {
        let mut m = std::collections::BTreeMap::new();
        m.insert(Category::Int(2023), 1usize);
        m.insert(Category::text("BRA"), 2usize);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"2023":1,"BRA":2}"#);
    }

    #[test]
    fn value_as_f64_only_for_numbers() {
        assert_eq!(Value::Int64(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float64(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Null.as_f64(), None);
        assert_eq!(Value::Utf8("3".into()).as_f64(), None);
    }
}
