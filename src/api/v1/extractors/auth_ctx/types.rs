/*
 * Responsibility
 * - The authenticated context a handler sees
 * - middleware::auth::access verifies the bearer token and stores this in request extensions
 */
use crate::services::auth::IdentityClaim;

#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: IdentityClaim,
}

impl AuthCtx {
    pub fn new(identity: IdentityClaim) -> Self {
        Self { identity }
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }
}
