//! Innkeeper reservation service client
//!
//! The innkeeper is the tenant-management agent. This client covers the calls
//! the dashboard needs: obtaining an innkeeper token, creating a reservation,
//! and listing/approving reservations and reading tenants with that token.
//! Tokens are fetched per call; their lifecycle belongs to the innkeeper.
//!
//! Caller-supplied ids are pushed as single percent-encoded path segments.

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::NewReservation;

/// Longest upstream error body carried into an error
const MAX_ERROR_BODY: usize = 500;

/// Innkeeper connection settings
#[derive(Debug, Clone, Default)]
pub struct InnkeeperConfig {
    /// Base URL of the innkeeper admin API, without trailing slash
    pub base_url: String,
    /// Tenant id of the innkeeper tenant
    pub tenant_id: String,
    /// Wallet key of the innkeeper tenant
    pub wallet_key: String,
}

/// Innkeeper client error
#[derive(Debug, thiserror::Error)]
pub enum InnkeeperError {
    #[error("innkeeper request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("innkeeper returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("innkeeper is not configured: {0} missing")]
    NotConfigured(&'static str),

    #[error("invalid innkeeper base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("'{0}' is not a valid id")]
    InvalidId(String),
}

/// Token issued to the innkeeper tenant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginToken {
    pub token: String,
}

/// Result of creating a reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationCreated {
    pub reservation_id: String,
}

/// Result of approving a reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationApproved {
    pub reservation_pwd: String,
}

/// Reservation records as listed by the innkeeper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationList {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// Tenant records as listed by the innkeeper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenantList {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// Innkeeper HTTP client
#[derive(Clone)]
pub struct InnkeeperClient {
    client: Client,
    config: InnkeeperConfig,
}

impl InnkeeperClient {
    pub fn new(mut config: InnkeeperConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, InnkeeperError> {
        let invalid = || InnkeeperError::InvalidBaseUrl(self.config.base_url.clone());
        let mut url = Url::parse(&self.config.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Obtain a token for the innkeeper tenant.
    pub async fn login(&self) -> Result<LoginToken, InnkeeperError> {
        if self.config.tenant_id.is_empty() {
            return Err(InnkeeperError::NotConfigured("tenant id"));
        }
        if self.config.wallet_key.is_empty() {
            return Err(InnkeeperError::NotConfigured("wallet key"));
        }

        let url = self.endpoint(&[
            "multitenancy",
            "tenant",
            path_id(&self.config.tenant_id)?,
            "token",
        ])?;
        let request = self
            .client
            .post(url)
            .json(&json!({ "wallet_key": self.config.wallet_key }));

        tracing::debug!(tenant_id = %self.config.tenant_id, "requesting innkeeper token");
        send(request).await
    }

    /// Create a tenant reservation.
    pub async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<ReservationCreated, InnkeeperError> {
        let request = self
            .client
            .post(self.endpoint(&["multitenancy", "reservations"])?)
            .json(reservation);

        let created: ReservationCreated = send(request).await?;
        tracing::info!(reservation_id = %created.reservation_id, "reservation created");
        Ok(created)
    }

    /// List every reservation (innkeeper token required).
    pub async fn list_reservations(&self, token: &str) -> Result<ReservationList, InnkeeperError> {
        let request = self
            .client
            .get(self.endpoint(&["innkeeper", "reservations", ""])?)
            .bearer_auth(token);

        send(request).await
    }

    /// Approve a reservation (innkeeper token required).
    pub async fn approve_reservation(
        &self,
        token: &str,
        reservation_id: &str,
    ) -> Result<ReservationApproved, InnkeeperError> {
        let request = self
            .client
            .put(self.endpoint(&[
                "innkeeper",
                "reservations",
                path_id(reservation_id)?,
                "approve",
            ])?)
            .bearer_auth(token)
            .json(&json!({}));

        let approved = send(request).await?;
        tracing::info!(reservation_id = %reservation_id, "reservation approved");
        Ok(approved)
    }

    /// List every tenant (innkeeper token required).
    pub async fn list_tenants(&self, token: &str) -> Result<TenantList, InnkeeperError> {
        let request = self
            .client
            .get(self.endpoint(&["innkeeper", "tenants", ""])?)
            .bearer_auth(token);

        send(request).await
    }

    /// One tenant record (innkeeper token required).
    pub async fn get_tenant(
        &self,
        token: &str,
        tenant_id: &str,
    ) -> Result<serde_json::Value, InnkeeperError> {
        let request = self
            .client
            .get(self.endpoint(&["innkeeper", "tenants", path_id(tenant_id)?])?)
            .bearer_auth(token);

        send(request).await
    }
}

/// Reject ids that would be empty or a dot-segment in the upstream path.
fn path_id(id: &str) -> Result<&str, InnkeeperError> {
    match id.trim() {
        "" | "." | ".." => Err(InnkeeperError::InvalidId(id.to_owned())),
        _ => Ok(id),
    }
}

async fn send<T: for<'de> Deserialize<'de>>(request: RequestBuilder) -> Result<T, InnkeeperError> {
    let response = check_status(request.send().await?).await?;
    Ok(response.json().await?)
}

async fn check_status(response: Response) -> Result<Response, InnkeeperError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(InnkeeperError::Status {
        status,
        body: truncate(body),
    })
}

/// Truncate upstream error bodies so logs and responses stay small
fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};

    /// Minimal stand-in for the innkeeper admin API
    async fn fake_innkeeper() -> String {
        let app = Router::new()
            .route(
                "/multitenancy/tenant/{tenant_id}/token",
                post(|Path(tenant_id): Path<String>, Json(body): Json<serde_json::Value>| async move {
                    if body["wallet_key"] == "right-key" {
                        Ok(Json(json!({ "token": format!("tok-{}", tenant_id) })))
                    } else {
                        Err((StatusCode::UNAUTHORIZED, "bad wallet key"))
                    }
                }),
            )
            .route(
                "/multitenancy/reservations",
                post(|Json(body): Json<serde_json::Value>| async move {
                    Json(json!({ "reservation_id": format!("res-{}", body["tenant_name"].as_str().unwrap_or("")) }))
                }),
            )
            .route(
                "/innkeeper/reservations/",
                get(|headers: HeaderMap| async move {
                    match headers.get("authorization").and_then(|h| h.to_str().ok()) {
                        Some("Bearer tok-inn") => Ok(Json(json!({ "results": [{ "reservation_id": "r1" }] }))),
                        _ => Err(StatusCode::UNAUTHORIZED),
                    }
                }),
            )
            .route(
                "/innkeeper/reservations/{id}/approve",
                put(|Path(id): Path<String>| async move {
                    Json(json!({ "reservation_pwd": format!("pwd-{}", id) }))
                }),
            )
            .route(
                "/innkeeper/tenants/",
                get(|| async { Json(json!({ "results": [{ "tenant_id": "t1" }, { "tenant_id": "t2" }] })) }),
            )
            .route(
                "/innkeeper/tenants/{id}",
                get(|Path(id): Path<String>| async move {
                    Json(json!({ "tenant_id": id, "tenant_name": "permits" }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn client(base_url: String, wallet_key: &str) -> InnkeeperClient {
        InnkeeperClient::new(InnkeeperConfig {
            base_url,
            tenant_id: "inn".into(),
            wallet_key: wallet_key.into(),
        })
    }

    fn reservation() -> NewReservation {
        NewReservation {
            tenant_name: "permits".into(),
            tenant_reason: "Issue permits".into(),
            contact_name: "Pat".into(),
            contact_email: "pat@example.com".into(),
            contact_phone: "555-0100".into(),
        }
    }

    #[tokio::test]
    async fn login_returns_token() {
        let inn = client(fake_innkeeper().await, "right-key");
        let token = inn.login().await.unwrap();
        assert_eq!(token.token, "tok-inn");
    }

    #[tokio::test]
    async fn login_failure_carries_status() {
        let inn = client(fake_innkeeper().await, "wrong-key");
        let err = inn.login().await.unwrap_err();
        assert!(matches!(err, InnkeeperError::Status { status: 401, ref body } if body == "bad wallet key"));
    }

    #[tokio::test]
    async fn login_requires_configuration() {
        let inn = client("http://127.0.0.1:1".into(), "");
        assert!(matches!(inn.login().await, Err(InnkeeperError::NotConfigured("wallet key"))));
    }

    #[tokio::test]
    async fn reservation_round_trip() {
        let inn = client(fake_innkeeper().await, "right-key");

        let created = inn.create_reservation(&reservation()).await.unwrap();
        assert_eq!(created.reservation_id, "res-permits");

        let token = inn.login().await.unwrap().token;
        let list = inn.list_reservations(&token).await.unwrap();
        assert_eq!(list.results.len(), 1);

        let approved = inn.approve_reservation(&token, "r1").await.unwrap();
        assert_eq!(approved.reservation_pwd, "pwd-r1");
    }

    #[tokio::test]
    async fn ids_stay_inside_one_path_segment() {
        let inn = client(fake_innkeeper().await, "right-key");
        let token = inn.login().await.unwrap().token;

        let approved = inn.approve_reservation(&token, "../../x").await.unwrap();
        assert_eq!(approved.reservation_pwd, "pwd-../../x");

        let tenant = inn.get_tenant(&token, "a/b").await.unwrap();
        assert_eq!(tenant["tenant_id"], "a/b");
    }

    #[tokio::test]
    async fn dot_segment_ids_are_rejected() {
        let inn = client(fake_innkeeper().await, "right-key");
        for id in ["..", ".", " "] {
            assert!(matches!(
                inn.approve_reservation("tok-inn", id).await,
                Err(InnkeeperError::InvalidId(_))
            ));
        }
    }

    #[tokio::test]
    async fn tenants_are_listed_and_fetched() {
        let inn = client(fake_innkeeper().await, "right-key");
        let token = inn.login().await.unwrap().token;

        let tenants = inn.list_tenants(&token).await.unwrap();
        assert_eq!(tenants.results.len(), 2);

        let tenant = inn.get_tenant(&token, "t1").await.unwrap();
        assert_eq!(tenant["tenant_name"], "permits");
    }

    #[test]
    fn base_url_path_is_kept() {
        let inn = client("http://inn.local/api/".into(), "k");
        let url = inn.endpoint(&["innkeeper", "reservations", ""]).unwrap();
        assert_eq!(url.as_str(), "http://inn.local/api/innkeeper/reservations/");

        let bad = client("not a url".into(), "k");
        assert!(matches!(bad.endpoint(&["x"]), Err(InnkeeperError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn unreachable_innkeeper_is_http_error() {
        let inn = client("http://127.0.0.1:1".into(), "right-key");
        assert!(matches!(
            inn.create_reservation(&reservation()).await,
            Err(InnkeeperError::Http(_))
        ));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = truncate("é".repeat(400));
        assert!(body.ends_with("..."));
        assert!(body.len() <= MAX_ERROR_BODY + 3);
        assert_eq!(truncate("short".into()), "short");
    }
}
