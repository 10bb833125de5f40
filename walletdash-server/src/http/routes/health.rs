//! Liveness endpoint
//!
//! Answers without touching the database; the pool target is reported so a
//! deployment can be checked against the expected store.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::DbTarget;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DbTarget,
    /// Whether role-gated routes can accept any token
    pub auth_configured: bool,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: state.db.target().clone(),
        auth_configured: state.verifier.is_configured(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
