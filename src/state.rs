/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Everything inside is cheap to clone (Arc / key handles)
 * - Built from an explicit AuthConfig + injected store and clock, so tests can swap both
 */
use std::sync::Arc;

use crate::repos::UserStore;
use crate::services::auth::{AuthConfig, Clock, RoleAuthorizer, TokenIssuer, TokenVerifier};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
    pub authorizer: RoleAuthorizer,
}

impl AppState {
    pub fn new(auth: &AuthConfig, users: Arc<dyn UserStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer: TokenIssuer::new(auth, clock.clone()),
            verifier: TokenVerifier::new(auth, clock),
            authorizer: RoleAuthorizer::new(users.clone()),
            users,
        }
    }
}
