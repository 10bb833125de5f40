//! Innkeeper proxy endpoints
//!
//! Login, reservation administration and tenant lookups require the
//! configured realm role; creating a reservation is open, like on the
//! innkeeper itself.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{RealmIdentity, ValidJson};
use crate::http::server::AppState;
use crate::innkeeper::{
    LoginToken, ReservationApproved, ReservationCreated, ReservationList, TenantList,
};
use crate::models::ReservationBody;

/// GET /innkeeperLogin - innkeeper tenant token
async fn login(
    State(state): State<Arc<AppState>>,
    RealmIdentity(claims): RealmIdentity,
) -> Result<Json<LoginToken>, ApiError> {
    tracing::info!(subject = %claims.subject(), "innkeeper login");
    let token = state.innkeeper.login().await?;
    Ok(Json(token))
}

/// POST /innkeeperReservation - create a tenant reservation
async fn create_reservation(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<ReservationBody>,
) -> Result<(StatusCode, Json<ReservationCreated>), ApiError> {
    let reservation = body.validate()?;
    let created = state.innkeeper.create_reservation(&reservation).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /innkeeperReservations - every reservation
async fn list_reservations(
    State(state): State<Arc<AppState>>,
    RealmIdentity(_claims): RealmIdentity,
) -> Result<Json<ReservationList>, ApiError> {
    let token = state.innkeeper.login().await?;
    let list = state.innkeeper.list_reservations(&token.token).await?;
    Ok(Json(list))
}

/// PUT /innkeeperReservation/{id}/approve - approve a reservation
async fn approve_reservation(
    State(state): State<Arc<AppState>>,
    RealmIdentity(claims): RealmIdentity,
    Path(reservation_id): Path<String>,
) -> Result<Json<ReservationApproved>, ApiError> {
    tracing::info!(subject = %claims.subject(), reservation_id = %reservation_id, "approving reservation");
    let token = state.innkeeper.login().await?;
    let approved = state
        .innkeeper
        .approve_reservation(&token.token, &reservation_id)
        .await?;
    Ok(Json(approved))
}

/// GET /innkeeperTenants - every tenant
async fn list_tenants(
    State(state): State<Arc<AppState>>,
    RealmIdentity(_claims): RealmIdentity,
) -> Result<Json<TenantList>, ApiError> {
    let token = state.innkeeper.login().await?;
    let tenants = state.innkeeper.list_tenants(&token.token).await?;
    Ok(Json(tenants))
}

/// GET /innkeeperTenant/{tenant_id} - one tenant record
async fn get_tenant(
    State(state): State<Arc<AppState>>,
    RealmIdentity(_claims): RealmIdentity,
    Path(tenant_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = state.innkeeper.login().await?;
    let tenant = state.innkeeper.get_tenant(&token.token, &tenant_id).await?;
    Ok(Json(tenant))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/innkeeperLogin", get(login))
        .route("/innkeeperReservation", post(create_reservation))
        .route("/innkeeperReservations", get(list_reservations))
        .route("/innkeeperReservation/{id}/approve", put(approve_reservation))
        .route("/innkeeperTenants", get(list_tenants))
        .route("/innkeeperTenant/{tenant_id}", get(get_tenant))
}
