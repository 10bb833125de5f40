//! Bearer token verification and realm role checks
//!
//! Tokens are issued by the identity provider (Keycloak style: roles under
//! `realm_access.roles`). This module only verifies them against a configured
//! key; issuing and key rotation happen elsewhere.
//!
//! - HS256 with a shared secret, or RS256 with a PEM public key
//! - Optional issuer and audience checks

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Verification settings
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Realm role required by gated routes
    pub realm_role: String,
    /// HS256 shared secret
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM contents)
    pub jwt_public_key_pem: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// Realm role section of the token
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claims this service reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub realm_access: RealmAccess,
    pub exp: u64,
}

impl Claims {
    pub fn has_realm_role(&self, role: &str) -> bool {
        self.realm_access.roles.iter().any(|r| r == role)
    }

    /// Best identifier for logs
    pub fn subject(&self) -> &str {
        self.preferred_username
            .as_deref()
            .or(self.sub.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("{0}")]
    InvalidToken(&'static str),

    #[error("realm role '{0}' required")]
    MissingRole(String),

    #[error("token verification is not configured")]
    NotConfigured,

    #[error("invalid verification key: {0}")]
    InvalidKey(String),
}

/// Verifies bearer tokens and checks the configured realm role
#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
    realm_role: String,
}

impl TokenVerifier {
    /// Build a verifier. An RS256 key wins over a shared secret; with neither,
    /// every token is rejected.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let (key, algorithm) = match (&config.jwt_public_key_pem, &config.jwt_secret) {
            (Some(pem), _) => (
                Some(
                    DecodingKey::from_rsa_pem(pem.as_bytes())
                        .map_err(|e| AuthError::InvalidKey(e.to_string()))?,
                ),
                Algorithm::RS256,
            ),
            (None, Some(secret)) => (Some(DecodingKey::from_secret(secret.as_bytes())), Algorithm::HS256),
            (None, None) => (None, Algorithm::HS256),
        };

        let mut validation = Validation::new(algorithm);
        match &config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &config.issuer {
            validation.set_issuer(&[iss]);
        }

        Ok(Self {
            key,
            validation,
            realm_role: config.realm_role.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    pub fn realm_role(&self) -> &str {
        &self.realm_role
    }

    /// Verify a raw token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let key = self.key.as_ref().ok_or(AuthError::NotConfigured)?;

        decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                AuthError::InvalidToken(match err.kind() {
                    ErrorKind::ExpiredSignature => "token expired",
                    ErrorKind::InvalidSignature => "invalid signature",
                    ErrorKind::InvalidIssuer => "invalid issuer",
                    ErrorKind::InvalidAudience => "invalid audience",
                    _ => "invalid token",
                })
            })
    }

    /// Verify the Authorization header and require the realm role.
    pub fn authorize(&self, auth_header: Option<&str>) -> Result<Claims, AuthError> {
        let token = extract_bearer(auth_header).ok_or(AuthError::MissingToken)?;
        let claims = self.verify(token)?;

        if !claims.has_realm_role(&self.realm_role) {
            tracing::warn!(
                subject = %claims.subject(),
                role = %self.realm_role,
                "token lacks required realm role"
            );
            return Err(AuthError::MissingRole(self.realm_role.clone()));
        }
        Ok(claims)
    }
}

/// Extract token from a `Bearer <token>` Authorization header.
pub fn extract_bearer(auth_header: Option<&str>) -> Option<&str> {
    let token = auth_header?.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
