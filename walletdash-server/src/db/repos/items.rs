//! Item repository
//!
//! Read-only queries over the `items` table. Aggregates are computed by
//! Postgres in a single statement each.

use sqlx::FromRow;

use crate::db::{Database, DbError};
use crate::models::{CategorySummary, Item, KindSummary};

/// Raw `items` row
#[derive(Debug, Clone, FromRow)]
struct ItemRow {
    id: i64,
    kind: i64,
    profile_id: i64,
    category: Vec<u8>,
    name: Vec<u8>,
    value: Vec<u8>,
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Item::render(r.id, r.kind, r.profile_id, &r.category, &r.name, &r.value)
    }
}

#[derive(Debug, FromRow)]
struct KindCountRow {
    kind: i64,
    count: i64,
}

#[derive(Debug, FromRow)]
struct CategoryCountRow {
    category: Vec<u8>,
    name: Vec<u8>,
    kind: i64,
    count: i64,
    item_ids: Vec<i64>,
}

const ITEM_COLUMNS: &str = r#"
    id::BIGINT AS id,
    kind::BIGINT AS kind,
    profile_id::BIGINT AS profile_id,
    COALESCE(category, ''::BYTEA) AS category,
    COALESCE(name, ''::BYTEA) AS name,
    COALESCE(value, ''::BYTEA) AS value
"#;

/// Item repository
pub struct ItemRepo<'a> {
    db: &'a Database,
}

impl<'a> ItemRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every item, ordered by id.
    pub async fn list(&self) -> Result<Vec<Item>, DbError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id");
        let rows: Vec<ItemRow> = sqlx::query_as(&sql)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// A single item; `None` when no row has this id.
    pub async fn get(&self, id: i64) -> Result<Option<Item>, DbError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        let row: Option<ItemRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))?;

        Ok(row.map(Item::from))
    }

    /// Total number of items.
    pub async fn count(&self) -> Result<i64, DbError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| self.db.observe(e))
    }

    /// Item count per kind code present, ordered by kind code.
    pub async fn summary_by_kind(&self) -> Result<Vec<KindSummary>, DbError> {
        let rows: Vec<KindCountRow> = sqlx::query_as(
            r#"
            SELECT kind::BIGINT AS kind, COUNT(*) AS count
            FROM items
            GROUP BY kind
            ORDER BY kind ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| self.db.observe(e))?;

        Ok(rows
            .into_iter()
            .map(|r| KindSummary::new(r.kind, r.count))
            .collect())
    }

    /// Item count per (category, name, kind), largest groups first.
    pub async fn summary_by_category(&self) -> Result<Vec<CategorySummary>, DbError> {
        let rows: Vec<CategoryCountRow> = sqlx::query_as(
            r#"
            SELECT
                COALESCE(category, ''::BYTEA) AS category,
                COALESCE(name, ''::BYTEA) AS name,
                kind::BIGINT AS kind,
                COUNT(*) AS count,
                ARRAY_AGG(id::BIGINT ORDER BY id) AS item_ids
            FROM items
            GROUP BY category, name, kind
            ORDER BY count DESC, category ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| self.db.observe(e))?;

        Ok(rows
            .into_iter()
            .map(|r| CategorySummary::new(&r.category, &r.name, r.kind, r.count, r.item_ids))
            .collect())
    }
}
