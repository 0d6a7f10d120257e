//! Guardian for dashboards and folders.
//!
//! Resolution order:
//! 1. Org check — a principal from another org gets nothing.
//! 2. No ACL — the org role decides: Viewer → View, Editor → Edit, Admin → Admin.
//! 3. ACL — role defaults are suppressed; the highest level among entries
//!    matching the principal by user, team or role wins. No match → no access.
//!    Org admins are only exempt when `admin_bypass_acl` is enabled.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use foldergate_core::config::GuardianConfig;
use foldergate_core::result::AppResult;
use foldergate_database::repositories::AclStore;
use foldergate_entity::dashboard::Dashboard;
use foldergate_entity::permission::{DashboardAcl, PermissionLevel};
use foldergate_entity::user::{OrgRole, Principal};

use super::{Guardian, GuardianProvider};

/// Resolves capabilities of one principal on one dashboard.
///
/// The ACL is loaded lazily on the first query and reused by the others;
/// a guardian is meant to live for a single request. Entries are only read
/// when the dashboard record says it has an ACL.
pub struct DashboardGuardian {
    /// Dashboard or folder being checked.
    dashboard_id: i64,
    /// Org the dashboard belongs to.
    org_id: i64,
    /// The dashboard's own `has_acl` flag.
    has_acl: bool,
    /// The requesting actor.
    principal: Principal,
    /// ACL source.
    acl_store: Arc<dyn AclStore>,
    /// Resolution settings.
    config: GuardianConfig,
    /// ACL loaded on first use.
    acl: OnceCell<DashboardAcl>,
}

impl std::fmt::Debug for DashboardGuardian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardGuardian")
            .field("dashboard_id", &self.dashboard_id)
            .field("org_id", &self.org_id)
            .field("has_acl", &self.has_acl)
            .field("user_id", &self.principal.user_id)
            .finish()
    }
}

impl DashboardGuardian {
    /// Creates a guardian for an already fetched dashboard.
    pub fn new(
        dashboard: &Dashboard,
        principal: Principal,
        acl_store: Arc<dyn AclStore>,
        config: GuardianConfig,
    ) -> Self {
        Self {
            dashboard_id: dashboard.id,
            org_id: dashboard.org_id,
            has_acl: dashboard.has_acl,
            principal,
            acl_store,
            config,
            acl: OnceCell::new(),
        }
    }

    async fn load_acl(&self) -> AppResult<DashboardAcl> {
        if !self.has_acl {
            return Ok(DashboardAcl::default());
        }
        let entries = self
            .acl_store
            .acl_entries(self.org_id, self.dashboard_id)
            .await?;
        Ok(DashboardAcl {
            has_acl: true,
            entries,
        })
    }

    async fn acl(&self) -> AppResult<&DashboardAcl> {
        self.acl.get_or_try_init(|| self.load_acl()).await
    }

    /// The principal's effective level, or `None` for no access.
    pub async fn effective_level(&self) -> AppResult<Option<PermissionLevel>> {
        if self.principal.org_id != self.org_id {
            debug!(
                dashboard_id = self.dashboard_id,
                org_id = self.org_id,
                principal_org_id = self.principal.org_id,
                "Principal belongs to another org"
            );
            return Ok(None);
        }

        let acl = self.acl().await?;

        let level = if !acl.has_acl {
            Some(role_default(self.principal.org_role))
        } else if self.config.admin_bypass_acl && self.principal.org_role.is_admin() {
            Some(PermissionLevel::Admin)
        } else {
            acl.highest_for(&self.principal)
        };

        debug!(
            dashboard_id = self.dashboard_id,
            user_id = self.principal.user_id,
            has_acl = acl.has_acl,
            level = ?level,
            "Resolved dashboard permission"
        );

        Ok(level)
    }

    async fn has_permission(&self, required: PermissionLevel) -> AppResult<bool> {
        Ok(self
            .effective_level()
            .await?
            .is_some_and(|level| level.has_at_least(required)))
    }
}

#[async_trait]
impl Guardian for DashboardGuardian {
    async fn can_view(&self) -> AppResult<bool> {
        self.has_permission(PermissionLevel::View).await
    }

    async fn can_edit(&self) -> AppResult<bool> {
        if self.config.viewers_can_edit {
            return self.can_view().await;
        }
        self.has_permission(PermissionLevel::Edit).await
    }

    async fn can_save(&self) -> AppResult<bool> {
        self.has_permission(PermissionLevel::Edit).await
    }

    async fn can_admin(&self) -> AppResult<bool> {
        self.has_permission(PermissionLevel::Admin).await
    }
}

/// Level implied by an org role on a dashboard without ACL.
fn role_default(role: OrgRole) -> PermissionLevel {
    match role {
        OrgRole::Viewer => PermissionLevel::View,
        OrgRole::Editor => PermissionLevel::Edit,
        OrgRole::Admin => PermissionLevel::Admin,
    }
}

/// Builds [`DashboardGuardian`]s sharing one ACL store and config.
#[derive(Clone)]
pub struct DashboardGuardianProvider {
    acl_store: Arc<dyn AclStore>,
    config: GuardianConfig,
}

impl std::fmt::Debug for DashboardGuardianProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardGuardianProvider")
            .field("config", &self.config)
            .finish()
    }
}

impl DashboardGuardianProvider {
    /// Creates a provider.
    pub fn new(acl_store: Arc<dyn AclStore>, config: GuardianConfig) -> Self {
        Self { acl_store, config }
    }
}

impl GuardianProvider for DashboardGuardianProvider {
    fn guardian(&self, dashboard: &Dashboard, principal: &Principal) -> Box<dyn Guardian> {
        Box::new(DashboardGuardian::new(
            dashboard,
            principal.clone(),
            Arc::clone(&self.acl_store),
            self.config.clone(),
        ))
    }
}
