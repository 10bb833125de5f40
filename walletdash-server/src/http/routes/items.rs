//! Wallet item endpoints
//!
//! `/items` failures also echo the connection target so a misconfigured
//! deployment can be spotted from the dashboard.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::repos::{DatabaseDescription, ItemRepo, TableRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CategorySummary, Item, KindSummary};

/// GET /items - every item with rendered binary columns
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = ItemRepo::new(&state.db)
        .list()
        .await
        .map_err(|e| ApiError::from(e).with_target(state.db.target()))?;

    tracing::debug!(count = items.len(), "listed items");
    Ok(Json(items))
}

/// GET /items/{id} - a single item, `null` when absent
async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Item>>, ApiError> {
    let item = ItemRepo::new(&state.db).get(id).await?;
    if item.is_none() {
        tracing::debug!(id, "item not found");
    }
    Ok(Json(item))
}

/// GET /items/summary - counts per kind
async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<Vec<KindSummary>>, ApiError> {
    let summary = ItemRepo::new(&state.db).summary_by_kind().await?;
    Ok(Json(summary))
}

/// GET /items/categories - counts per (category, name, kind)
async fn categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategorySummary>>, ApiError> {
    let categories = ItemRepo::new(&state.db).summary_by_category().await?;
    Ok(Json(categories))
}

/// GET /items/analysis - schema and samples of the first tables
async fn analysis(State(state): State<Arc<AppState>>) -> Json<DatabaseDescription> {
    Json(TableRepo::new(&state.db).describe().await)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/summary", get(summary))
        .route("/items/categories", get(categories))
        .route("/items/analysis", get(analysis))
        .route("/items/{id}", get(get_item))
}
