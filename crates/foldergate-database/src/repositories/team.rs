//! Team membership store.

use async_trait::async_trait;
use sqlx::PgPool;

use foldergate_core::error::{AppError, ErrorKind};
use foldergate_core::result::AppResult;

/// Read access to team memberships.
#[async_trait]
pub trait TeamStore: Send + Sync + 'static {
    /// IDs of the teams the user belongs to within an org.
    async fn team_ids_for_user(&self, org_id: i64, user_id: i64) -> AppResult<Vec<i64>>;
}

/// PostgreSQL-backed [`TeamStore`].
#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Create a new team repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for TeamRepository {
    async fn team_ids_for_user(&self, org_id: i64, user_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT team_id FROM team_member WHERE org_id = $1 AND user_id = $2 ORDER BY team_id",
        )
        .bind(org_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list team memberships", e)
        })
    }
}
