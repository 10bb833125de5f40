//! Database layer - connection pool and repositories
//!
//! Read-only access to the wallet store: `items`, `profiles`, `config`, and
//! introspected tables.

pub mod decode;
pub mod pool;
pub mod repos;

pub use pool::{Database, DbTarget, PoolConfig};
pub use repos::*;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("unknown table '{0}'")]
    UnknownTable(String),
}
