//! User store.

use async_trait::async_trait;
use sqlx::PgPool;

use foldergate_core::error::{AppError, ErrorKind};
use foldergate_core::result::AppResult;

/// Read access to user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Login of the user with the given id, if any.
    async fn find_login(&self, user_id: i64) -> AppResult<Option<String>>;
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_login(&self, user_id: i64) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT login FROM \"user\" WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user login", e)
            })
    }
}
