//! Raw table access and schema introspection
//!
//! `data` only reads tables on the static allow-list. `describe` walks
//! whatever `information_schema` reports and never fails: when introspection
//! breaks it answers with placeholder entries instead.

use serde::Serialize;
use sqlx::FromRow;

use crate::db::decode::{columns_of, decode_row};
use crate::db::{Database, DbError};
use crate::models::table::{clamp_limit, quote_ident};
use crate::models::{ColumnInfo, Row, TableData, TableName, ValueKind};

/// Tables sampled by `describe`
pub const DESCRIBE_MAX_TABLES: usize = 3;

/// Rows sampled per table by `describe`
pub const DESCRIBE_SAMPLE_ROWS: i64 = 5;

/// Tables reported when introspection yields nothing
const PLACEHOLDER_TABLES: [&str; 2] = ["items", "profiles"];

/// One column as reported by `information_schema.columns`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_pg_type(&self.data_type)
    }
}

/// Diagnostic view of one table
#[derive(Debug, Clone, Serialize)]
pub struct TableDescription {
    pub table: String,
    pub columns: Vec<ColumnSchema>,
    pub sample: Vec<Row>,
    pub placeholder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDescription {
    fn placeholder(table: &str, error: Option<String>) -> Self {
        Self {
            table: table.to_owned(),
            columns: Vec::new(),
            sample: Vec::new(),
            placeholder: true,
            error,
        }
    }
}

/// Diagnostic view of the whole database
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseDescription {
    pub total_tables: usize,
    pub tables: Vec<TableDescription>,
}

/// Table repository
pub struct TableRepo<'a> {
    db: &'a Database,
}

impl<'a> TableRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Up to `limit` rows of an allow-listed table.
    ///
    /// The raw name is sanitized and checked before any SQL is issued.
    pub async fn data(&self, raw_name: &str, limit: Option<i64>) -> Result<TableData, DbError> {
        let table = TableName::resolve(raw_name).map_err(DbError::UnknownTable)?;
        let limit = clamp_limit(limit);

        let sql = format!("SELECT * FROM {} LIMIT $1", table.quoted());
        let rows = sqlx::query(&sql)
            .bind(limit)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))?;

        let columns = match rows.first() {
            Some(first) => columns_of(first),
            None => self
                .schema(table.as_str())
                .await?
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name.clone(),
                    kind: c.kind(),
                })
                .collect(),
        };

        Ok(TableData {
            table: table.as_str().to_owned(),
            columns,
            rows: rows.iter().map(decode_row).collect(),
        })
    }

    /// Base tables in the `public` schema.
    pub async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        sqlx::query_scalar(
            r#"
            SELECT table_name::TEXT
            FROM information_schema.tables
            WHERE table_schema = 'public' AND table_type = 'BASE TABLE'
            ORDER BY table_name
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| self.db.observe(e))
    }

    /// Columns of a table in ordinal order.
    pub async fn schema(&self, table: &str) -> Result<Vec<ColumnSchema>, DbError> {
        sqlx::query_as(
            r#"
            SELECT
                column_name::TEXT AS name,
                data_type::TEXT AS data_type,
                (is_nullable = 'YES') AS nullable
            FROM information_schema.columns
            WHERE table_schema = 'public' AND table_name = $1
            ORDER BY ordinal_position
            "#,
        )
        .bind(table)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| self.db.observe(e))
    }

    async fn sample(&self, table: &str) -> Result<Vec<Row>, DbError> {
        let sql = format!("SELECT * FROM {} LIMIT $1", quote_ident(table));
        let rows = sqlx::query(&sql)
            .bind(DESCRIBE_SAMPLE_ROWS)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))?;

        Ok(rows.iter().map(decode_row).collect())
    }

    /// Schema and sample rows for the first few tables.
    ///
    /// Never fails; degrades to placeholder entries.
    pub async fn describe(&self) -> DatabaseDescription {
        let tables = match self.list_tables().await {
            Ok(tables) if !tables.is_empty() => tables,
            Ok(_) => {
                tracing::warn!("no tables found, answering with placeholders");
                return placeholder_description(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "table introspection failed, answering with placeholders");
                return placeholder_description(Some(e.to_string()));
            }
        };

        let mut described = Vec::with_capacity(DESCRIBE_MAX_TABLES);
        for table in tables.iter().take(DESCRIBE_MAX_TABLES) {
            described.push(self.describe_table(table).await);
        }

        DatabaseDescription {
            total_tables: tables.len(),
            tables: described,
        }
    }

    async fn describe_table(&self, table: &str) -> TableDescription {
        let columns = self.schema(table).await;
        let sample = self.sample(table).await;

        match (columns, sample) {
            (Ok(columns), Ok(sample)) => TableDescription {
                table: table.to_owned(),
                columns,
                sample,
                placeholder: false,
                error: None,
            },
            (columns, sample) => {
                let error = columns.err().or(sample.err()).map(|e| e.to_string());
                tracing::warn!(table = %table, error = ?error, "failed to describe table");
                TableDescription {
                    table: table.to_owned(),
                    columns: Vec::new(),
                    sample: Vec::new(),
                    placeholder: false,
                    error,
                }
            }
        }
    }
}

fn placeholder_description(error: Option<String>) -> DatabaseDescription {
    DatabaseDescription {
        total_tables: 0,
        tables: PLACEHOLDER_TABLES
            .iter()
            .map(|t| TableDescription::placeholder(t, error.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::PoolConfig;
    use std::time::Duration;

    fn unreachable() -> Database {
        let config = PoolConfig {
            acquire_timeout: Duration::from_millis(300),
            ..PoolConfig::default()
        };
        Database::connect_lazy("postgres://wallet:pw@127.0.0.1:1/wallet", config).unwrap()
    }

    #[tokio::test]
    async fn describe_degrades_to_placeholders() {
        let db = unreachable();
        let description = TableRepo::new(&db).describe().await;

        assert_eq!(description.total_tables, 0);
        let names: Vec<_> = description.tables.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(names, ["items", "profiles"]);
        assert!(description.tables.iter().all(|t| t.placeholder && t.error.is_some()));
    }

    #[tokio::test]
    async fn unknown_table_is_rejected_before_querying() {
        // Reaching the database would yield Sqlx, not UnknownTable
        let db = unreachable();
        let err = TableRepo::new(&db)
            .data("items; DROP TABLE x", Some(10))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UnknownTable(ref name) if name == "itemsDROPTABLEx"));
    }

    #[test]
    fn placeholder_without_error_omits_field() {
        let json = serde_json::to_value(placeholder_description(None)).unwrap();
        assert_eq!(json["tables"].as_array().unwrap().len(), 2);
        assert!(json["tables"][0].get("error").is_none());
        assert_eq!(json["tables"][0]["placeholder"], true);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn describe_samples_at_most_three_tables() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let db = Database::connect_lazy(&url, PoolConfig::default()).unwrap();

        let description = TableRepo::new(&db).describe().await;
        assert!(description.tables.len() <= DESCRIBE_MAX_TABLES);
        assert!(description
            .tables
            .iter()
            .all(|t| t.sample.len() as i64 <= DESCRIBE_SAMPLE_ROWS));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn items_table_declares_binary_columns() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let db = Database::connect_lazy(&url, PoolConfig::default()).unwrap();

        let data = TableRepo::new(&db).data("items", Some(1)).await.unwrap();
        let category = data.columns.iter().find(|c| c.name == "category").unwrap();
        assert_eq!(category.kind, ValueKind::Binary);
    }
}
