//! Admin role check for routes that already passed `access`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Require the caller's stored role to be `admin`.
///
/// Must run inside `access::apply`, i.e. apply this first and `access` second:
///
/// ```ignore
/// let admin = access::apply(admin::apply(router, state.clone()), state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, admin_middleware))
}

async fn admin_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Cloned: the request body is not Sync, so no borrow of `req` may live across the await.
    let ctx = req
        .extensions()
        .get::<AuthCtx>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    if let Err(err) = state.authorizer.authorize(&ctx.identity).await {
        tracing::warn!(
            error = %err,
            email = %ctx.email(),
            path = %req.uri().path(),
            "admin check failed"
        );
        return Err(err.into());
    }

    Ok(next.run(req).await)
}
