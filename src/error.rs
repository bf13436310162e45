/*
 * Responsibility
 * - App-wide AppError and its IntoResponse (HTTP status + JSON error body)
 * - Map AuthError / RepoError onto client-facing statuses
 * - Internal detail (secrets, backend errors) is logged, never rendered
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::repos::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("no credential presented")]
    Unauthorized,
    #[error("{message}")]
    Forbidden { message: &'static str },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: &'static str) -> Self {
        Self::Forbidden { message }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "no credential presented".into(),
            ),
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, "FORBIDDEN", message.into()),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found."),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NoCredential => AppError::Unauthorized,
            AuthError::InvalidCredential => AppError::forbidden("invalid or expired credential"),
            AuthError::InsufficientPrivilege => {
                AppError::forbidden("caller lacks required privilege")
            }
            // already logged where they happened
            AuthError::Signing(_) | AuthError::Store(_) => AppError::Internal,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        error!(error = ?e, "user store error");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn credential_failures_keep_distinct_statuses() {
        let (status, body) = render(AuthError::NoCredential.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, body) = render(AuthError::InvalidCredential.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "invalid or expired credential");

        let (status, body) = render(AuthError::InsufficientPrivilege.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "caller lacks required privilege");
    }

    #[tokio::test]
    async fn store_failure_hides_backend_detail() {
        let err = AuthError::Store(RepoError::Db(sqlx::Error::PoolTimedOut));
        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "internal server error");
    }
}
