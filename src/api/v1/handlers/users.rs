/*
 * Responsibility
 * - /users handlers (upsert issues the access token)
 * - /me and the self-service admin status query
 * - /admin/users handlers; the admin gate has already run when these are reached
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::info;

use crate::{
    api::v1::{
        dto::users::{
            AdminStatusResponse, UpsertUserRequest, UpsertUserResponse, UserResponse,
            validate_email,
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::Role,
    services::auth::IdentityClaim,
    state::AppState,
};

fn checked_email(email: &str) -> Result<(), AppError> {
    validate_email(email).map_err(|msg| AppError::bad_request("INVALID_EMAIL", msg))
}

pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    payload: Result<Json<UpsertUserRequest>, JsonRejection>,
) -> Result<Json<UpsertUserResponse>, AppError> {
    checked_email(&email)?;
    let Json(req) =
        payload.map_err(|rej| AppError::bad_request("INVALID_BODY", rej.body_text()))?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_PROFILE", msg))?;

    let user = state.users.upsert(&email, req.into_profile()).await?;
    let issued = state.issuer.issue(&user.email)?;

    info!(email = %user.email, role = %user.role, "user upserted, access token issued");

    Ok(Json(UpsertUserResponse {
        user: user.into(),
        access_token: issued.access_token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
        expires_at: issued.expires_at,
    }))
}

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<IdentityClaim> {
    Json(ctx.identity)
}

/// Callers may only ask about themselves.
pub async fn admin_status(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, AppError> {
    if ctx.email() != email {
        return Err(AppError::forbidden("caller lacks required privilege"));
    }

    let admin = state
        .users
        .find_by_email(&email)
        .await?
        .is_some_and(|u| u.role.is_admin());

    Ok(Json(AdminStatusResponse { admin }))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = state.users.list().await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn make_admin(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    checked_email(&email)?;

    let user = state
        .users
        .set_role(&email, Role::Admin)
        .await?
        .ok_or(AppError::not_found("user"))?;

    info!(email = %user.email, granted_by = %ctx.email(), "admin role granted");

    Ok(Json(user.into()))
}
