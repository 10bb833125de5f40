//! Raw table dump endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::TableRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::TableData;

#[derive(Debug, Deserialize)]
pub struct TableParams {
    pub limit: Option<i64>,
}

/// GET /table/{table_name}?limit=N
async fn table_data(
    State(state): State<Arc<AppState>>,
    Path(table_name): Path<String>,
    Query(params): Query<TableParams>,
) -> Result<Json<TableData>, ApiError> {
    let data = TableRepo::new(&state.db)
        .data(&table_name, params.limit)
        .await?;

    tracing::debug!(table = %data.table, rows = data.rows.len(), "table dumped");
    Ok(Json(data))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/table/{table_name}", get(table_data))
}
