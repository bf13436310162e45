use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;
use uuid::Uuid;

use crate::services::auth::clock::Clock;
use crate::services::auth::error::AuthError;
use crate::services::auth::jwt::{AccessTokenClaims, AuthConfig};

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

/// Signs HS256 access tokens carrying an email.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_seconds: u64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            issuer: config.issuer().to_string(),
            ttl_seconds: config.ttl_seconds(),
            clock,
        }
    }

    /// Issue an access token for `email`, valid for `ttl_seconds` from now.
    pub fn issue(&self, email: &str) -> Result<IssuedToken, AuthError> {
        let now = self.clock.now();
        let iat = now.timestamp();
        let exp = iat.saturating_add(i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX));

        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            email: email.to_string(),
            iat,
            exp,
            jti: Some(Uuid::new_v4().to_string()),
        };

        let access_token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| {
            error!(error = %e, "failed to sign access token");
            AuthError::Signing(e)
        })?;

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer",
            expires_in: self.ttl_seconds,
            expires_at: DateTime::from_timestamp(exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }
}
