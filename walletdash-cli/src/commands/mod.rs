//! Command implementations for the walletdash CLI

pub mod serve;
pub mod summary;
pub mod tables;

use anyhow::{Context, Result};
use clap::Args;

use walletdash_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use walletdash_server::{Database, PoolConfig};

pub use serve::run_serve;
pub use summary::run_summary;
pub use tables::run_tables;

/// Wallet database connection flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Postgres URL of the wallet store
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "WALLETDASH_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    pub fn connect(&self) -> Result<Database> {
        let config = PoolConfig {
            max_connections: self.max_connections,
            ..PoolConfig::default()
        };
        Database::connect_lazy(&self.database_url, config).context(
            "Invalid DATABASE_URL. Set via --database-url, DATABASE_URL env, or ~/.walletdash/.env",
        )
    }
}
