//! Dashboard ACL store.

use async_trait::async_trait;
use sqlx::PgPool;

use foldergate_core::error::{AppError, ErrorKind};
use foldergate_core::result::AppResult;
use foldergate_entity::permission::{AclEntry, AclEntryRow};

/// Read access to explicit dashboard ACL entries.
///
/// Whether the entries apply is decided by the dashboard's own `has_acl`
/// flag, read together with the dashboard record.
#[async_trait]
pub trait AclStore: Send + Sync + 'static {
    /// Explicit entries on one dashboard, oldest first.
    async fn acl_entries(&self, org_id: i64, dashboard_id: i64) -> AppResult<Vec<AclEntry>>;
}

/// PostgreSQL-backed [`AclStore`].
#[derive(Debug, Clone)]
pub struct AclRepository {
    pool: PgPool,
}

impl AclRepository {
    /// Create a new ACL repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AclStore for AclRepository {
    async fn acl_entries(&self, org_id: i64, dashboard_id: i64) -> AppResult<Vec<AclEntry>> {
        let rows = sqlx::query_as::<_, AclEntryRow>(
            "SELECT * FROM dashboard_acl WHERE org_id = $1 AND dashboard_id = $2 \
             ORDER BY created ASC",
        )
        .bind(org_id)
        .bind(dashboard_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ACL entries", e))?;

        rows.into_iter().map(AclEntry::try_from).collect()
    }
}
