//! Bearer access-token check → `AuthCtx` in request extensions.
//!
//! - no `Authorization` header (or an empty one) → 401, the downstream handler never runs
//! - anything wrong with the credential → 403
//! - on success the verified identity is inserted for `AuthCtxExtractor` / the admin gate

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, IdentityClaim};
use crate::state::AppState;

/// Require a valid bearer token on every route of `router`.
///
/// ```ignore
/// let me = Router::new().route("/me", get(me));
/// let me = middleware::auth::access::apply(me, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths still 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authenticate(&state, &req)?;

    tracing::debug!(email = %identity.email, "access token verified");

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::new(identity));

    Ok(next.run(req).await)
}

// Sync on purpose: the header borrow must end before the request moves on.
fn authenticate(state: &AppState, req: &Request<Body>) -> Result<IdentityClaim, AppError> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::warn!("authorization header is not visible ASCII");
            AppError::from(AuthError::InvalidCredential)
        })?),
    };

    state.verifier.verify(authorization).map_err(|err| {
        match &err {
            AuthError::NoCredential => {
                tracing::debug!(path = %req.uri().path(), "no credential presented")
            }
            _ => tracing::warn!(
                error = %err,
                path = %req.uri().path(),
                "access token verification failed"
            ),
        }
        AppError::from(err)
    })
}
