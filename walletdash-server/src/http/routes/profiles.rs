//! Profile and store config endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{ConfigRepo, ProfileRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Row;

/// GET /profiles - raw profile rows
async fn list_profiles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = ProfileRepo::new(&state.db).list().await?;
    Ok(Json(rows))
}

/// GET /config - raw store config rows
async fn list_config(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = ConfigRepo::new(&state.db).list().await?;
    Ok(Json(rows))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/config", get(list_config))
}
