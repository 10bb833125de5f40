//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::auth::Claims;
use crate::models::ValidationError;

/// Caller verified to hold the configured realm role
pub struct RealmIdentity(pub Claims);

impl FromRequestParts<Arc<AppState>> for RealmIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let claims = state.verifier.authorize(header)?;
        tracing::debug!(subject = %claims.subject(), "realm role verified");
        Ok(Self(claims))
    }
}

/// JSON body whose decoding failures answer like field validation (422 `{errors}`)
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "request body rejected");
                Err(ApiError::Validation(vec![undecodable(&rejection)]))
            }
        }
    }
}

/// Name the offending field when serde reports a path.
fn undecodable(rejection: &JsonRejection) -> ValidationError {
    let body = |reason: String| ValidationError::Undecodable {
        field: "body".to_owned(),
        reason,
    };

    match rejection {
        JsonRejection::JsonDataError(e) => {
            let text = e.body_text();
            let detail = text
                .split_once("target type: ")
                .map(|(_, rest)| rest)
                .unwrap_or(&text);
            match detail.split_once(": ") {
                Some((path, reason)) if path != "." && !path.contains(' ') => {
                    ValidationError::Undecodable {
                        field: path.to_owned(),
                        reason: reason.to_owned(),
                    }
                }
                _ => body(detail.to_owned()),
            }
        }
        JsonRejection::JsonSyntaxError(_) => body("must be valid JSON".to_owned()),
        JsonRejection::MissingJsonContentType(_) => {
            body("expected Content-Type: application/json".to_owned())
        }
        other => body(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Notice {
        contact_email: Option<String>,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<ValidJson<Notice>, ApiError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let req = builder.body(Body::from(body.to_owned())).unwrap();
        ValidJson::<Notice>::from_request(req, &()).await
    }

    fn first_error(err: ApiError) -> ValidationError {
        match err {
            ApiError::Validation(mut errors) => errors.remove(0),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_type_names_the_field() {
        let err = extract(Some("application/json"), r#"{"contactEmail": 42}"#)
            .await
            .err()
            .unwrap();
        let error = first_error(err);
        assert_eq!(error.field(), "contactEmail");
        assert!(error.to_string().contains("invalid type"));
    }

    #[tokio::test]
    async fn syntax_error_blames_the_body() {
        let err = extract(Some("application/json"), "{not json").await.err().unwrap();
        assert_eq!(first_error(err).field(), "body");
    }

    #[tokio::test]
    async fn missing_content_type_is_422() {
        let err = extract(None, r#"{"contactEmail": "a@b.co"}"#).await.err().unwrap();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let ValidJson(notice) = extract(Some("application/json"), r#"{"contactEmail": "a@b.co"}"#)
            .await
            .unwrap();
        assert_eq!(notice.contact_email.as_deref(), Some("a@b.co"));
    }
}
