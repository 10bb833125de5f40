//! Generic rows for tables whose shape is not known at compile time
//!
//! Each value carries a declared kind; table results also list the kind of
//! every column so consumers do not have to guess from JSON types.

use serde::ser::SerializeMap;
use serde::Serialize;

/// Declared kind of a column value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Integer,
    Float,
    Text,
    Binary,
    Json,
    Timestamp,
    Unsupported,
}

impl ValueKind {
    /// Map a Postgres type name to a value kind.
    ///
    /// Accepts both driver names (`INT8`) and `information_schema` names
    /// (`bigint`, `timestamp with time zone`).
    pub fn from_pg_type(type_name: &str) -> Self {
        match type_name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => Self::Bool,
            "INT2" | "INT4" | "INT8" | "SMALLINT" | "INTEGER" | "BIGINT" => Self::Integer,
            "FLOAT4" | "FLOAT8" | "REAL" | "DOUBLE PRECISION" => Self::Float,
            "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" | "UUID" | "CHARACTER"
            | "CHARACTER VARYING" => Self::Text,
            "BYTEA" => Self::Binary,
            "JSON" | "JSONB" => Self::Json,
            "TIMESTAMP" | "TIMESTAMPTZ" | "DATE" | "TIMESTAMP WITH TIME ZONE"
            | "TIMESTAMP WITHOUT TIME ZONE" => Self::Timestamp,
            _ => Self::Unsupported,
        }
    }
}

/// A single decoded column value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Text, timestamps (RFC 3339), UUIDs, hex-encoded binary
    Text(String),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => b.into(),
            Value::Integer(i) => i.into(),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => s.into(),
            Value::Json(v) => v,
        }
    }
}

/// Column name plus declared kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ValueKind,
}

/// One row, column order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.values.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows of one table with their column declarations
#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Row>,
}
