//! Decoding of rows whose shape is only known at runtime

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::models::binary::to_hex;
use crate::models::{ColumnInfo, Row, Value, ValueKind};

/// Column declarations of a result row.
pub fn columns_of(row: &PgRow) -> Vec<ColumnInfo> {
    row.columns()
        .iter()
        .map(|col| ColumnInfo {
            name: col.name().to_owned(),
            kind: ValueKind::from_pg_type(col.type_info().name()),
        })
        .collect()
}

/// Decode every column of `row` into a generic value.
pub fn decode_row(row: &PgRow) -> Row {
    let mut out = Row::new();
    for (idx, col) in row.columns().iter().enumerate() {
        let type_name = col.type_info().name();
        let value = decode_value(row, idx, type_name);
        out.push(col.name(), value);
    }
    out
}

fn decode_value(row: &PgRow, idx: usize, type_name: &str) -> Value {
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(column = idx, error = %e, "column not readable");
            return Value::Null;
        }
    }

    let decoded = match ValueKind::from_pg_type(type_name) {
        ValueKind::Bool => row.try_get::<bool, _>(idx).ok().map(Value::Bool),
        ValueKind::Integer => row
            .try_get::<i64, _>(idx)
            .or_else(|_| row.try_get::<i32, _>(idx).map(i64::from))
            .or_else(|_| row.try_get::<i16, _>(idx).map(i64::from))
            .ok()
            .map(Value::Integer),
        ValueKind::Float => row
            .try_get::<f64, _>(idx)
            .or_else(|_| row.try_get::<f32, _>(idx).map(f64::from))
            .ok()
            .map(Value::Float),
        ValueKind::Text => row
            .try_get::<String, _>(idx)
            .or_else(|_| row.try_get::<uuid::Uuid, _>(idx).map(|u| u.to_string()))
            .ok()
            .map(Value::Text),
        ValueKind::Binary => row
            .try_get::<Vec<u8>, _>(idx)
            .ok()
            .map(|bytes| Value::Text(to_hex(&bytes))),
        ValueKind::Json => row.try_get::<serde_json::Value, _>(idx).ok().map(Value::Json),
        ValueKind::Timestamp => row
            .try_get::<DateTime<Utc>, _>(idx)
            .map(|t| t.to_rfc3339())
            .or_else(|_| row.try_get::<NaiveDateTime, _>(idx).map(|t| t.to_string()))
            .or_else(|_| row.try_get::<NaiveDate, _>(idx).map(|d| d.to_string()))
            .ok()
            .map(Value::Text),
        ValueKind::Unsupported => None,
    };

    decoded.unwrap_or_else(|| {
        tracing::debug!(column = idx, pg_type = type_name, "unsupported column type, rendering null");
        Value::Null
    })
}
