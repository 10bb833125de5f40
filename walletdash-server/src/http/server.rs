//! Axum server for the wallet dashboard API
//!
//! CORS is limited to local dashboard origins unless permissive mode is
//! requested. The server drains on SIGTERM/Ctrl+C and exits with
//! `ServerError::PoolFault` when the wallet pool becomes unusable.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::auth::TokenVerifier;
use crate::db::Database;
use crate::innkeeper::InnkeeperClient;
use crate::mailer::Mailer;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5100)
    pub bind_addr: SocketAddr,

    /// Accept any origin instead of the local dashboard origins
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5100)),
            cors_permissive: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub innkeeper: InnkeeperClient,
    pub mailer: Arc<dyn Mailer>,
    pub verifier: TokenVerifier,
    /// Sender address for reservation notices
    pub mail_from: String,
}

/// Localhost origins accepted when CORS is not permissive
const LOCAL_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:8080",
];

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = LOCAL_ORIGINS
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::items::router())
        .merge(routes::profiles::router())
        .merge(routes::tables::router())
        .merge(routes::innkeeper::router())
        .merge(routes::email::router())
        .layer(cors_layer(cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let state = AppState { db, innkeeper, mailer, verifier, mail_from };
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let faults = state.db.faults();
    let db = state.db.clone();

    if let Err(e) = db.ping().await {
        tracing::warn!(error = %e, db = ?db.target(), "database not reachable at startup");
    }
    if !state.verifier.is_configured() {
        tracing::warn!("no JWT key configured, role-gated routes will reject every request");
    }

    let app = build_router(state, config.cors_permissive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(faults.clone()))
        .await?;

    db.close().await;

    if *faults.borrow() {
        tracing::error!("Server stopped after a database pool fault");
        return Err(ServerError::PoolFault);
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C, SIGTERM, or a pool fault).
async fn shutdown_signal(mut faults: watch::Receiver<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let fault = async {
        if faults.wait_for(|faulted| *faulted).await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
        _ = fault => {
            tracing::error!("Database pool fault, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database pool failed; the server cannot continue")]
    PoolFault,
}
