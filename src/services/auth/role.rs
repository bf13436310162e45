use std::sync::Arc;

use tracing::{debug, error};

use crate::repos::UserStore;
use crate::services::auth::error::AuthError;
use crate::services::auth::identity::IdentityClaim;

/// Admin gate: runs after `TokenVerifier` and consults the stored role.
///
/// Fail-closed: a missing record is a denial, and a store failure never permits.
#[derive(Clone)]
pub struct RoleAuthorizer {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for RoleAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAuthorizer")
            .field("users", &self.users.backend_name())
            .finish()
    }
}

impl RoleAuthorizer {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn authorize(&self, identity: &IdentityClaim) -> Result<(), AuthError> {
        let record = self
            .users
            .find_by_email(&identity.email)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    backend = self.users.backend_name(),
                    "user lookup failed during role check"
                );
                AuthError::Store(e)
            })?;

        match record {
            Some(user) if user.role.is_admin() => Ok(()),
            Some(user) => {
                debug!(email = %identity.email, role = %user.role, "admin role required");
                Err(AuthError::InsufficientPrivilege)
            }
            None => {
                debug!(email = %identity.email, "no user record for verified identity");
                Err(AuthError::InsufficientPrivilege)
            }
        }
    }
}
