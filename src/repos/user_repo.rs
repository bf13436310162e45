/*
 * Responsibility
 * - User record / role types shared by every store implementation
 * - The UserStore contract the auth gate and handlers depend on
 * - Lookups are keyed by email, compared exactly as stored
 */
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Map a stored role string. Anything other than `admin` is an ordinary user,
    /// so a corrupted column can never grant privilege.
    pub fn from_stored(raw: &str) -> Self {
        if raw == "admin" {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields written by an upsert.
///
/// `None` leaves the stored value untouched; the role is never part of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>>;

    // Insert with role `user` when absent, otherwise merge the profile. Never touches the role.
    async fn upsert(&self, email: &str, profile: UserProfile) -> RepoResult<UserRecord>;

    // Returns None when no record exists for `email`.
    async fn set_role(&self, email: &str, role: Role) -> RepoResult<Option<UserRecord>>;

    async fn list(&self) -> RepoResult<Vec<UserRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_role_strings_fail_closed() {
        assert_eq!(Role::from_stored("admin"), Role::Admin);
        assert_eq!(Role::from_stored(" ADMIN "), Role::User);
        assert_eq!(Role::from_stored("Admin"), Role::User);
        assert_eq!(Role::from_stored("user"), Role::User);
        assert_eq!(Role::from_stored(""), Role::User);
        assert_eq!(Role::from_stored("superuser"), Role::User);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(Role::default(), Role::User);
    }
}
