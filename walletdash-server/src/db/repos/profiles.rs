//! Profile and config repositories
//!
//! Both tables are returned as generic rows; nothing interprets their columns.

use crate::db::decode::decode_row;
use crate::db::{Database, DbError};
use crate::models::Row;

/// Profile repository
pub struct ProfileRepo<'a> {
    db: &'a Database,
}

impl<'a> ProfileRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every profile row, unformatted.
    pub async fn list(&self) -> Result<Vec<Row>, DbError> {
        let rows = sqlx::query("SELECT * FROM profiles ORDER BY id")
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))?;

        Ok(rows.iter().map(decode_row).collect())
    }
}

/// Store config repository
pub struct ConfigRepo<'a> {
    db: &'a Database,
}

impl<'a> ConfigRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every config row, unformatted.
    pub async fn list(&self) -> Result<Vec<Row>, DbError> {
        let rows = sqlx::query("SELECT * FROM config ORDER BY 1")
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))?;

        Ok(rows.iter().map(decode_row).collect())
    }
}
