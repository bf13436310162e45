use thiserror::Error;

use crate::repos::RepoError;

/// Failures of the bearer-token gate.
///
/// `NoCredential` (401) and `InvalidCredential` (403) stay separate so clients can tell
/// "log in" apart from "this token is no good".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credential presented")]
    NoCredential,

    #[error("invalid or expired credential")]
    InvalidCredential,

    #[error("caller lacks required privilege")]
    InsufficientPrivilege,

    #[error("failed to sign access token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("user store unavailable")]
    Store(#[from] RepoError),
}
