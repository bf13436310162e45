//! Bearer-token gate.
//!
//! - `TokenIssuer` signs an access token for an email.
//! - `TokenVerifier` turns an `Authorization` header into an `IdentityClaim`.
//! - `RoleAuthorizer` checks the stored role of a verified identity.
//!
//! All three take their settings from an explicitly built `AuthConfig` and read time
//! from an injected `Clock`.
pub mod access_jwt;
pub mod clock;
pub mod error;
pub mod identity;
pub mod jwt;
pub mod role;
pub mod token_issuer;

pub use access_jwt::TokenVerifier;
pub use clock::{Clock, SystemClock};
pub use error::AuthError;
pub use identity::IdentityClaim;
pub use jwt::AuthConfig;
pub use role::RoleAuthorizer;
pub use token_issuer::TokenIssuer;
