//! In-process user store.
//!
//! Used when no `DATABASE_URL` is configured, and as the fake store in tests.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::repos::error::RepoResult;
use crate::repos::user_repo::{Role, UserProfile, UserRecord, UserStore};

#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn upsert(&self, email: &str, profile: UserProfile) -> RepoResult<UserRecord> {
        let now = Utc::now();
        let mut users = self.users.write().await;

        let record = users
            .entry(email.to_string())
            .and_modify(|existing| {
                if let Some(name) = &profile.name {
                    existing.name = Some(name.clone());
                }
                if let Some(url) = &profile.image_url {
                    existing.image_url = Some(url.clone());
                }
                existing.updated_at = now;
            })
            .or_insert_with(|| UserRecord {
                email: email.to_string(),
                role: Role::User,
                name: profile.name.clone(),
                image_url: profile.image_url.clone(),
                created_at: now,
                updated_at: now,
            });

        Ok(record.clone())
    }

    async fn set_role(&self, email: &str, role: Role) -> RepoResult<Option<UserRecord>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(email).map(|record| {
            record.role = role;
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn list(&self) -> RepoResult<Vec<UserRecord>> {
        let mut rows: Vec<UserRecord> = self.users.read().await.values().cloned().collect();
        // newest first, same as the Postgres store
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.email.cmp(&b.email)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>, image_url: Option<&str>) -> UserProfile {
        UserProfile {
            name: name.map(str::to_string),
            image_url: image_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn upsert_inserts_plain_user() {
        let store = MemoryUserStore::new();

        let user = store
            .upsert("a@x.com", profile(Some("Alice"), None))
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.name.as_deref(), Some("Alice"));
        assert_eq!(
            store.find_by_email("a@x.com").await.unwrap(),
            Some(user)
        );
    }

    #[tokio::test]
    async fn upsert_merges_profile_and_keeps_role() {
        let store = MemoryUserStore::new();
        store
            .upsert("a@x.com", profile(Some("Alice"), Some("https://img/a.png")))
            .await
            .unwrap();
        store.set_role("a@x.com", Role::Admin).await.unwrap();

        let user = store
            .upsert("a@x.com", profile(None, Some("https://img/b.png")))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name.as_deref(), Some("Alice"));
        assert_eq!(user.image_url.as_deref(), Some("https://img/b.png"));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_role_on_unknown_email_is_none() {
        let store = MemoryUserStore::new();

        assert!(store.set_role("b@x.com", Role::Admin).await.unwrap().is_none());
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookups_are_exact() {
        let store = MemoryUserStore::new();
        store.upsert("a@x.com", UserProfile::default()).await.unwrap();

        assert!(store.find_by_email("A@x.com").await.unwrap().is_none());
    }
}
