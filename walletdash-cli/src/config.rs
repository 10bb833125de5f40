//! Environment loading
//!
//! Precedence: command-line flags, then process environment, then `./.env`,
//! then `~/.walletdash/.env`. dotenvy never overwrites variables that are
//! already set, so loading in that order is enough.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Per-user config directory (`~/.walletdash`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".walletdash"))
}

/// Load `.env` files from the current directory and `~/.walletdash`.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env from current directory: {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("Failed to parse ./.env"),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            dotenvy::from_path(&env_file)
                .with_context(|| format!("Failed to parse {}", env_file.display()))?;
            debug!("Loaded .env from {}", env_file.display());
        }
    }

    Ok(())
}

/// Read a PEM key file named on the command line.
pub fn read_key_file(path: &Path) -> Result<String> {
    let pem = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JWT public key {}", path.display()))?;
    if !pem.contains("-----BEGIN") {
        anyhow::bail!("{} does not look like a PEM file", path.display());
    }
    Ok(pem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_dotenv_doesnt_fail_without_files() {
        // No .env in the crate directory
        assert!(load_dotenv().is_ok());
    }

    #[test]
    fn config_dir_is_under_home() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with(".walletdash"));
        }
    }

    #[test]
    fn reads_pem_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----").unwrap();
        let pem = read_key_file(file.path()).unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
    }

    #[test]
    fn rejects_non_pem_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a key").unwrap();
        assert!(read_key_file(file.path()).is_err());
        assert!(read_key_file(Path::new("/nonexistent/key.pem")).is_err());
    }
}
