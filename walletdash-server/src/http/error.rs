//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Backend failures answer `{error, details}`; validation answers `{errors}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::AuthError;
use crate::db::{DbError, DbTarget};
use crate::innkeeper::InnkeeperError;
use crate::mailer::MailError;
use crate::models::{FieldError, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed validation (422)
    Validation(Vec<ValidationError>),

    /// Missing or invalid bearer token (401)
    Unauthorized { reason: String },

    /// Token lacks the required role (403)
    Forbidden { reason: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Query failed (500, logged); `target` is echoed when set
    Database {
        details: String,
        target: Option<DbTarget>,
    },

    /// External collaborator failed (500, logged)
    Upstream { service: &'static str, details: String },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Attach the connection target to a database error.
    pub fn with_target(self, target: &DbTarget) -> Self {
        match self {
            Self::Database { details, .. } => Self::Database {
                details,
                target: Some(target.clone()),
            },
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(errors) => {
                let errors: Vec<FieldError> = errors.iter().map(FieldError::from).collect();
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "errors": errors }))
            }
            Self::Unauthorized { reason } => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Unauthorized",
                    "details": reason
                }),
            ),
            Self::Forbidden { reason } => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "Forbidden",
                    "details": reason
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Not found",
                    "details": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Database { details, target } => {
                tracing::error!("Database error: {}", details);
                let mut body = json!({
                    "error": "Database error",
                    "details": details
                });
                if let Some(target) = target {
                    body["config"] = json!(target);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            Self::Upstream { service, details } => {
                tracing::error!("{} error: {}", service, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": format!("{} error", service),
                        "details": details
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal error",
                        "details": message
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UnknownTable(name) => Self::NotFound {
                resource: "table",
                id: name,
            },
            DbError::Sqlx(e) => Self::Database {
                details: e.to_string(),
                target: None,
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingRole(_) => Self::Forbidden {
                reason: e.to_string(),
            },
            AuthError::InvalidKey(_) => Self::Internal {
                message: e.to_string(),
            },
            AuthError::MissingToken | AuthError::InvalidToken(_) | AuthError::NotConfigured => {
                Self::Unauthorized {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl From<InnkeeperError> for ApiError {
    fn from(e: InnkeeperError) -> Self {
        match e {
            InnkeeperError::InvalidId(id) => Self::Validation(vec![ValidationError::Undecodable {
                field: "id".to_owned(),
                reason: format!("'{}' is not a valid id", id),
            }]),
            other => Self::Upstream {
                service: "Innkeeper",
                details: other.to_string(),
            },
        }
    }
}

impl From<MailError> for ApiError {
    fn from(e: MailError) -> Self {
        Self::Upstream {
            service: "Email",
            details: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_422_with_fields() {
        let err = ApiError::Validation(vec![
            ValidationError::InvalidFormat {
                field: "contactEmail",
                reason: "must be a valid email address",
            },
            ValidationError::Empty { field: "state" },
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "contactEmail");
        assert_eq!(body["errors"][1]["message"], "state cannot be empty");
    }

    #[tokio::test]
    async fn database_error_echoes_target_only_when_attached() {
        let target = DbTarget {
            host: "db".into(),
            port: 5432,
            database: Some("wallet".into()),
        };
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut)).with_target(&target);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Database error");
        assert_eq!(body["config"]["host"], "db");
        assert_eq!(body["config"]["port"], 5432);

        let plain = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert!(body_json(plain.into_response()).await.get("config").is_none());
    }

    #[tokio::test]
    async fn unknown_table_is_404() {
        let err = ApiError::from(DbError::UnknownTable("itemsDROPTABLEx".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_role_is_403_and_missing_token_401() {
        let forbidden = ApiError::from(AuthError::MissingRole("innkeeper".into()));
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);

        let unauthorized = ApiError::from(AuthError::MissingToken);
        assert_eq!(unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn upstream_error_names_service() {
        let err = ApiError::from(InnkeeperError::NotConfigured("tenant id"));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"], "Innkeeper error");
    }

    #[tokio::test]
    async fn invalid_innkeeper_id_is_422() {
        let err = ApiError::from(InnkeeperError::InvalidId("..".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["errors"][0]["field"], "id");
    }

    #[tokio::test]
    async fn undecodable_body_lists_the_path() {
        let err = ApiError::Validation(vec![ValidationError::Undecodable {
            field: "contactEmail".into(),
            reason: "invalid type: integer `42`, expected a string".into(),
        }]);
        let body = body_json(err.into_response()).await;
        assert_eq!(body["errors"][0]["field"], "contactEmail");
        assert!(body["errors"][0]["message"].as_str().unwrap().contains("invalid type"));
    }
}
