use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::auth::jwt::AccessTokenClaims;

/// The verified identity carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityClaim {
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IdentityClaim {
    /// Returns None when a timestamp is outside chrono's range.
    pub(crate) fn from_claims(claims: AccessTokenClaims) -> Option<Self> {
        Some(Self {
            issued_at: DateTime::from_timestamp(claims.iat, 0)?,
            expires_at: DateTime::from_timestamp(claims.exp, 0)?,
            email: claims.email,
        })
    }
}
