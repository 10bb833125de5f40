//! Reservation notice endpoints

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::mailer::{confirmation_email, status_email};
use crate::models::{ReservationConfirmationBody, ReservationStatusBody};

#[derive(Debug, Serialize)]
pub struct SendResult {
    pub success: bool,
}

/// POST /email/reservationConfirmation
async fn reservation_confirmation(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<ReservationConfirmationBody>,
) -> Result<Json<SendResult>, ApiError> {
    let notice = body.validate()?;
    state
        .mailer
        .send(confirmation_email(&state.mail_from, &notice))
        .await?;

    tracing::info!(reservation_id = %notice.reservation_id, "confirmation sent");
    Ok(Json(SendResult { success: true }))
}

/// POST /email/reservationStatus
async fn reservation_status(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<ReservationStatusBody>,
) -> Result<Json<SendResult>, ApiError> {
    let notice = body.validate()?;
    state
        .mailer
        .send(status_email(&state.mail_from, &notice))
        .await?;

    tracing::info!(reservation_id = %notice.reservation_id, state = %notice.state, "status notice sent");
    Ok(Json(SendResult { success: true }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/email/reservationConfirmation", post(reservation_confirmation))
        .route("/email/reservationStatus", post(reservation_status))
}
