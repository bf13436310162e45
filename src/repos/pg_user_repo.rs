/*
 * Responsibility
 * - users table access via SQLx (schema: migrations/0001_create_users.sql)
 * - Holds a PgPool; connection tuning is left to the pool defaults
 * - connect() applies pending migrations before the store is handed out
 * - role is a TEXT column and is mapped through Role::from_stored
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::repos::error::RepoResult;
use crate::repos::user_repo::{Role, UserProfile, UserRecord, UserStore};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, FromRow)]
struct UserRow {
    email: String,
    role: String,
    name: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            email: row.email,
            role: Role::from_stored(&row.role),
            name: row.name,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> RepoResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        MIGRATOR.run(&pool).await?;
        info!("user store migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, role, name, image_url, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn upsert(&self, email: &str, profile: UserProfile) -> RepoResult<UserRecord> {
        // role is deliberately absent from the UPDATE branch
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, name, image_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET
                name = COALESCE(EXCLUDED.name, users.name),
                image_url = COALESCE(EXCLUDED.image_url, users.image_url),
                updated_at = now()
            RETURNING email, role, name, image_url, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(profile.name)
        .bind(profile.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn set_role(&self, email: &str, role: Role) -> RepoResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET role = $2, updated_at = now()
            WHERE email = $1
            RETURNING email, role, name, image_url, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn list(&self) -> RepoResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, role, name, image_url, created_at, updated_at
            FROM users
            ORDER BY created_at DESC, email ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}
