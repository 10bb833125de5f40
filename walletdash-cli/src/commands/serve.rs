//! HTTP server command
//!
//! Wires the wallet database, innkeeper client, token verifier and mailer
//! into the API server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use walletdash_server::auth::{AuthConfig, TokenVerifier};
use walletdash_server::innkeeper::{InnkeeperClient, InnkeeperConfig};
use walletdash_server::mailer::{HttpRelayMailer, LogMailer, Mailer};
use walletdash_server::{run_server, AppState, ServerConfig};

use super::DatabaseArgs;
use crate::config::read_key_file;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "WALLETDASH_BIND", default_value = "127.0.0.1:5100")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Innkeeper admin API base URL
    #[arg(long, env = "INNKEEPER_API_URL", default_value = "http://localhost:8032")]
    pub innkeeper_url: String,

    /// Tenant id of the innkeeper tenant
    #[arg(long, env = "INNKEEPER_TENANT_ID", default_value = "")]
    pub innkeeper_tenant_id: String,

    /// Wallet key of the innkeeper tenant
    #[arg(long, env = "INNKEEPER_WALLET_KEY", default_value = "", hide_env_values = true)]
    pub innkeeper_wallet_key: String,

    /// Realm role required for innkeeper routes
    #[arg(long, env = "WALLETDASH_REALM_ROLE", default_value = "innkeeper")]
    pub realm_role: String,

    /// HS256 secret for bearer tokens
    #[arg(long, env = "WALLETDASH_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// RS256 public key (PEM file) for bearer tokens
    #[arg(long, env = "WALLETDASH_JWT_PUBLIC_KEY", conflicts_with = "jwt_secret")]
    pub jwt_public_key: Option<PathBuf>,

    /// Required token issuer
    #[arg(long, env = "WALLETDASH_JWT_ISSUER")]
    pub jwt_issuer: Option<String>,

    /// Required token audience
    #[arg(long, env = "WALLETDASH_JWT_AUDIENCE")]
    pub jwt_audience: Option<String>,

    /// Mail relay endpoint; notices are only logged when unset
    #[arg(long, env = "WALLETDASH_MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,

    /// Sender address for reservation notices
    #[arg(long, env = "WALLETDASH_MAIL_FROM", default_value = "no-reply@localhost")]
    pub mail_from: String,
}

impl ServeArgs {
    fn auth_config(&self) -> Result<AuthConfig> {
        let jwt_public_key_pem = self
            .jwt_public_key
            .as_deref()
            .map(read_key_file)
            .transpose()?;

        Ok(AuthConfig {
            realm_role: self.realm_role.clone(),
            jwt_secret: self.jwt_secret.clone(),
            jwt_public_key_pem,
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
        })
    }

    fn mailer(&self) -> Arc<dyn Mailer> {
        match &self.mail_relay_url {
            Some(url) => {
                tracing::info!(relay = %url, "sending notices through mail relay");
                Arc::new(HttpRelayMailer::new(url.clone()))
            }
            None => {
                tracing::warn!("no mail relay configured, notices will only be logged");
                Arc::new(LogMailer)
            }
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = args.db.connect()?;
    let verifier = TokenVerifier::from_config(&args.auth_config()?)
        .context("Invalid JWT verification key")?;

    let innkeeper = InnkeeperClient::new(InnkeeperConfig {
        base_url: args.innkeeper_url.clone(),
        tenant_id: args.innkeeper_tenant_id.clone(),
        wallet_key: args.innkeeper_wallet_key.clone(),
    });

    let state = AppState {
        db,
        innkeeper,
        mailer: args.mailer(),
        verifier,
        mail_from: args.mail_from.clone(),
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting walletdash server on {}", args.bind);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> ServeArgs {
        let mut argv = vec!["serve", "--database-url", "postgres://localhost/askar"];
        argv.extend_from_slice(extra);
        ServeArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.bind.port(), 5100);
        assert_eq!(args.realm_role, "innkeeper");
        assert_eq!(args.mail_from, "no-reply@localhost");
        assert!(!args.cors_permissive);
    }

    #[test]
    fn secret_and_public_key_conflict() {
        let result = ServeArgs::try_parse_from([
            "serve",
            "--database-url",
            "postgres://localhost/askar",
            "--jwt-secret",
            "s",
            "--jwt-public-key",
            "/tmp/key.pem",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn auth_config_carries_secret() {
        let args = parse(&["--jwt-secret", "hush", "--realm-role", "admin"]);
        let config = args.auth_config().unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some("hush"));
        assert_eq!(config.realm_role, "admin");
        assert!(config.jwt_public_key_pem.is_none());
    }

    #[test]
    fn missing_key_file_is_an_error() {
        let args = parse(&["--jwt-public-key", "/nonexistent/key.pem"]);
        assert!(args.auth_config().is_err());
    }
}
