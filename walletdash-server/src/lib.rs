//! walletdash-server: admin backend for a wallet store
//!
//! Serves read-only views of the wallet's items, profiles and tables, and
//! proxies tenant reservations to the innkeeper service. Reservation notices
//! go out through a pluggable mailer.

pub mod auth;
pub mod db;
pub mod http;
pub mod innkeeper;
pub mod mailer;
pub mod models;

pub use db::{Database, PoolConfig};
pub use http::{run_server, AppState, ServerConfig, ServerError};
