//! Database connection pool management
//!
//! One process-wide `PgPool`, created lazily so the server can start (and
//! report errors per request) while the database is down. Pool-level faults
//! are published on a watch channel that the server treats as fatal.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tokio::sync::watch;

use super::DbError;

/// Default maximum connections for the pool.
/// Kept low for a single admin dashboard.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection parameters safe to echo back to clients (no credentials)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbTarget {
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
}

impl From<&PgConnectOptions> for DbTarget {
    fn from(options: &PgConnectOptions) -> Self {
        Self {
            host: options.get_host().to_owned(),
            port: options.get_port(),
            database: options.get_database().map(str::to_owned),
        }
    }
}

/// Pool options
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Shared database handle: pool, display-safe target, fault signal
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    target: DbTarget,
    fault: Arc<watch::Sender<bool>>,
}

impl Database {
    /// Create a lazily-connecting pool. Fails only on a malformed URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::connect_lazy("postgres://localhost/wallet", PoolConfig::default())?;
    /// ```
    pub fn connect_lazy(database_url: &str, config: PoolConfig) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(database_url)?;
        let target = DbTarget::from(&options);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(options);

        let (fault, _) = watch::channel(false);
        Ok(Self {
            pool,
            target,
            fault: Arc::new(fault),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn target(&self) -> &DbTarget {
        &self.target
    }

    /// Receiver that flips to `true` once a pool-level fault was observed.
    pub fn faults(&self) -> watch::Receiver<bool> {
        self.fault.subscribe()
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| self.observe(e))
    }

    /// Convert a driver error, raising the fault signal for pool-level faults.
    pub(crate) fn observe(&self, err: sqlx::Error) -> DbError {
        if is_pool_fault(&err) {
            tracing::error!(error = %err, "unrecoverable database pool fault");
            self.fault.send_replace(true);
        }
        DbError::Sqlx(err)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Faults after which the pool cannot serve any further request.
fn is_pool_fault(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed)
}
