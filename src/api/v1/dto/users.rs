/*
 * Responsibility
 * - Users request/response DTOs
 * - validate() for shape checks before anything reaches the store
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::{Role, UserProfile, UserRecord};

const MAX_EMAIL_LEN: usize = 254;
const MAX_NAME_LEN: usize = 100;
const MAX_IMAGE_URL_LEN: usize = 256;

/// Shape check only: one `@`, non-empty local and domain parts, no whitespace.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err("email is required");
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("email must be <= 254 chars");
    }
    if email.chars().any(char::is_whitespace) {
        return Err("email must not contain whitespace");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err("email is malformed"),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpsertUserRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

impl UpsertUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(name) = &self.name
            && name.chars().count() > MAX_NAME_LEN
        {
            return Err("name must be <= 100 chars");
        }
        if let Some(url) = &self.image_url
            && url.len() > MAX_IMAGE_URL_LEN
        {
            return Err("image_url must be <= 256 chars");
        }
        Ok(())
    }

    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            name: self.name.map(|n| n.trim().to_string()),
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(u: UserRecord) -> Self {
        Self {
            email: u.email,
            role: u.role,
            name: u.name,
            image_url: u.image_url,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpsertUserResponse {
    pub user: UserResponse,
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("a b@x.com").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn upsert_request_limits() {
        let ok = UpsertUserRequest {
            name: Some("  Alice ".into()),
            image_url: Some("https://img.example/a.png".into()),
        };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.into_profile().name.as_deref(), Some("Alice"));

        assert!(UpsertUserRequest::default().validate().is_ok());

        let blank = UpsertUserRequest {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let long_url = UpsertUserRequest {
            image_url: Some("x".repeat(257)),
            ..Default::default()
        };
        assert!(long_url.validate().is_err());
    }
}
