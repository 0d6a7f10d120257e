//! Dashboard store.

use async_trait::async_trait;
use sqlx::PgPool;

use foldergate_core::error::{AppError, ErrorKind};
use foldergate_core::result::AppResult;
use foldergate_entity::dashboard::{Dashboard, DashboardRef};

/// Org-scoped access to dashboard records, folders included.
#[async_trait]
pub trait DashboardStore: Send + Sync + 'static {
    /// Find a dashboard by id or slug within an org.
    async fn find(&self, org_id: i64, key: &DashboardRef) -> AppResult<Option<Dashboard>>;

    /// Delete a dashboard and its ACL entries. Returns `true` if a row was removed.
    async fn delete(&self, org_id: i64, id: i64) -> AppResult<bool>;
}

/// PostgreSQL-backed [`DashboardStore`].
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Create a new dashboard repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a dashboard by primary key.
    pub async fn find_by_id(&self, org_id: i64, id: i64) -> AppResult<Option<Dashboard>> {
        sqlx::query_as::<_, Dashboard>("SELECT * FROM dashboard WHERE org_id = $1 AND id = $2")
            .bind(org_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find dashboard by id", e)
            })
    }

    /// Find a dashboard by slug.
    pub async fn find_by_slug(&self, org_id: i64, slug: &str) -> AppResult<Option<Dashboard>> {
        sqlx::query_as::<_, Dashboard>(
            "SELECT * FROM dashboard WHERE org_id = $1 AND slug = $2 ORDER BY id ASC LIMIT 1",
        )
        .bind(org_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find dashboard by slug", e)
        })
    }
}

#[async_trait]
impl DashboardStore for DashboardRepository {
    async fn find(&self, org_id: i64, key: &DashboardRef) -> AppResult<Option<Dashboard>> {
        match key {
            DashboardRef::Id(id) => self.find_by_id(org_id, *id).await,
            DashboardRef::Slug(slug) => self.find_by_slug(org_id, slug).await,
        }
    }

    async fn delete(&self, org_id: i64, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM dashboard_acl WHERE org_id = $1 AND dashboard_id = $2")
            .bind(org_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete ACL entries", e)
            })?;

        let result = sqlx::query("DELETE FROM dashboard WHERE org_id = $1 AND id = $2")
            .bind(org_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete dashboard", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
