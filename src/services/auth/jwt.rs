use std::fmt;

use serde::{Deserialize, Serialize};

/// Settings shared by `TokenIssuer` and `TokenVerifier`.
///
/// Tokens are HS256 JWTs signed with `secret`. The secret is not printable via Debug.
#[derive(Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    issuer: String,
    ttl_seconds: u64,
    leeway_seconds: u64,
}

impl AuthConfig {
    pub const DEFAULT_ISSUER: &'static str = "booking-api";
    pub const DEFAULT_TTL_SECONDS: u64 = 60 * 60;

    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            issuer: Self::DEFAULT_ISSUER.to_string(),
            ttl_seconds: Self::DEFAULT_TTL_SECONDS,
            leeway_seconds: 0,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    // Allowed clock skew when checking `exp`.
    pub fn with_leeway_seconds(mut self, leeway_seconds: u64) -> Self {
        self.leeway_seconds = leeway_seconds;
        self
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

/// Access token payload as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}
