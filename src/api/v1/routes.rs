/*
 * Responsibility
 * - v1 URL layout
 * - Which routes are public, which need a bearer token, which need the admin role
 *
 *   public : GET /health, PUT /users/{email}
 *   token  : GET /me, GET /users/{email}/admin
 *   admin  : GET /admin/users, PUT /admin/users/{email}
 */
use axum::{
    Router,
    routing::{get, put},
};

use crate::api::v1::handlers::{
    health::health,
    users::{admin_status, list_users, make_admin, me, upsert_user},
};
use crate::middleware::auth::{access, admin};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/{email}", put(upsert_user));

    let authenticated = access::apply(
        Router::new()
            .route("/me", get(me))
            .route("/users/{email}/admin", get(admin_status)),
        state.clone(),
    );

    // admin gate is inner, token gate outer
    let admin_only = access::apply(
        admin::apply(
            Router::new()
                .route("/users", get(list_users))
                .route("/users/{email}", put(make_admin)),
            state.clone(),
        ),
        state,
    );

    public.merge(authenticated).nest("/admin", admin_only)
}
