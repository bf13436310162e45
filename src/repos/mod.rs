pub mod error;
pub mod memory_user_repo;
pub mod pg_user_repo;
pub mod user_repo;

pub use error::{RepoError, RepoResult};
pub use memory_user_repo::MemoryUserStore;
pub use pg_user_repo::PgUserStore;
pub use user_repo::{Role, UserProfile, UserRecord, UserStore};
