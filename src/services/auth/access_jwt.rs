use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::services::auth::clock::Clock;
use crate::services::auth::error::AuthError;
use crate::services::auth::identity::IdentityClaim;
use crate::services::auth::jwt::{AccessTokenClaims, AuthConfig};

/// HS256 access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
/// - `exp` is checked against the injected clock, not the system time.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
            leeway_seconds: i64::try_from(config.leeway_seconds()).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Verify the raw `Authorization` header value.
    ///
    /// - absent / empty header => `NoCredential` (checked before any parsing)
    /// - no second whitespace-separated segment => `InvalidCredential`
    /// - the second segment is the token; the scheme word is not inspected
    /// - everything else is decided by `verify_token`
    pub fn verify(&self, authorization: Option<&str>) -> Result<IdentityClaim, AuthError> {
        let header = authorization
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::NoCredential)?;

        let token = header
            .split_whitespace()
            .nth(1)
            .ok_or(AuthError::InvalidCredential)?;

        self.verify_token(token)
    }

    /// Verify signature, issuer and expiry of a bare token.
    pub fn verify_token(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| {
                    debug!(error = %e, "access token rejected");
                    AuthError::InvalidCredential
                })?
                .claims;

        let now = self.clock.now().timestamp();
        if now >= claims.exp.saturating_add(self.leeway_seconds) {
            debug!(exp = claims.exp, now, "access token expired");
            return Err(AuthError::InvalidCredential);
        }

        if claims.email.trim().is_empty() {
            debug!("access token has an empty email claim");
            return Err(AuthError::InvalidCredential);
        }

        IdentityClaim::from_claims(claims).ok_or(AuthError::InvalidCredential)
    }
}
