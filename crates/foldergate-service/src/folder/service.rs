//! Folder access gateway — authorized retrieval and deletion of folders.

use std::sync::Arc;

use tracing::{info, warn};

use foldergate_auth::guardian::{Guardian, GuardianProvider};
use foldergate_core::result::AppResult;
use foldergate_database::repositories::DashboardStore;
use foldergate_entity::dashboard::{Dashboard, DashboardRef};
use foldergate_entity::permission::Capabilities;
use foldergate_entity::user::Principal;

use super::error::FolderAccessError;
use super::view::{DeletedFolder, FolderView};
use crate::user::DisplayNameResolver;

/// Reads and deletes folders on behalf of a principal.
#[derive(Clone)]
pub struct FolderService {
    /// Dashboard and folder records.
    dashboards: Arc<dyn DashboardStore>,
    /// Builds per-request guardians.
    guardians: Arc<dyn GuardianProvider>,
    /// Creator/updater labels.
    display_names: DisplayNameResolver,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        dashboards: Arc<dyn DashboardStore>,
        guardians: Arc<dyn GuardianProvider>,
        display_names: DisplayNameResolver,
    ) -> Self {
        Self {
            dashboards,
            guardians,
            display_names,
        }
    }

    /// Looks up a folder in an org. Misses, non-folders and lookup failures
    /// are all reported as `NotFound`.
    pub async fn fetch_folder(
        &self,
        org_id: i64,
        key: &DashboardRef,
    ) -> Result<Dashboard, FolderAccessError> {
        match self.dashboards.find(org_id, key).await {
            Ok(Some(dashboard)) if dashboard.is_folder => Ok(dashboard),
            Ok(_) => Err(FolderAccessError::not_found()),
            Err(e) => {
                warn!(org_id, key = %key, error = %e, "Folder lookup failed");
                Err(FolderAccessError::NotFound { cause: Some(e) })
            }
        }
    }

    /// Returns the folder with the principal's capabilities, provided the
    /// principal may view it.
    pub async fn get_folder(
        &self,
        principal: &Principal,
        key: DashboardRef,
    ) -> Result<FolderView, FolderAccessError> {
        let folder = self.fetch_folder(principal.org_id, &key).await?;
        let guardian: Box<dyn Guardian> = self.guardians.guardian(&folder, principal);

        require(guardian.can_view().await, "view", &folder, principal)?;

        let capabilities = Capabilities {
            can_view: true,
            can_edit: best_effort(guardian.can_edit().await, "edit", folder.id),
            can_save: best_effort(guardian.can_save().await, "save", folder.id),
            can_admin: best_effort(guardian.can_admin().await, "admin", folder.id),
        };

        let created_by = self.display_names.login_for(folder.created_by).await;
        let updated_by = self.display_names.login_for(folder.updated_by).await;

        Ok(FolderView::new(folder, capabilities, created_by, updated_by))
    }

    /// Deletes a folder the principal may save.
    pub async fn delete_folder(
        &self,
        principal: &Principal,
        key: DashboardRef,
    ) -> Result<DeletedFolder, FolderAccessError> {
        let folder = self.fetch_folder(principal.org_id, &key).await?;
        let guardian: Box<dyn Guardian> = self.guardians.guardian(&folder, principal);

        require(guardian.can_save().await, "save", &folder, principal)?;

        let removed = self
            .dashboards
            .delete(folder.org_id, folder.id)
            .await
            .map_err(FolderAccessError::Store)?;

        if !removed {
            // Gone between lookup and delete.
            return Err(FolderAccessError::not_found());
        }

        info!(
            folder_id = folder.id,
            org_id = folder.org_id,
            user_id = principal.user_id,
            "Folder deleted"
        );

        Ok(DeletedFolder {
            message: format!("Folder {} deleted", folder.title),
            title: folder.title,
        })
    }
}

/// Hard gate: an undecidable check is a server failure, a denial is
/// `Forbidden`.
fn require(
    decision: AppResult<bool>,
    capability: &'static str,
    folder: &Dashboard,
    principal: &Principal,
) -> Result<(), FolderAccessError> {
    match decision {
        Ok(true) => Ok(()),
        Ok(false) => {
            info!(
                folder_id = folder.id,
                org_id = folder.org_id,
                user_id = principal.user_id,
                capability,
                "Folder access denied"
            );
            Err(FolderAccessError::Forbidden)
        }
        Err(e) => Err(FolderAccessError::PermissionCheck(e)),
    }
}

fn best_effort(decision: AppResult<bool>, capability: &'static str, folder_id: i64) -> bool {
    decision.unwrap_or_else(|e| {
        warn!(folder_id, capability, error = %e, "Capability check failed, reporting false");
        false
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use foldergate_auth::guardian::DashboardGuardianProvider;
    use foldergate_core::AppError;
    use foldergate_core::config::GuardianConfig;
    use foldergate_database::repositories::{AclStore, UserStore};
    use foldergate_entity::permission::{AclEntry, AclSubject, PermissionLevel};
    use foldergate_entity::user::OrgRole;

    use super::*;
    use crate::user::ANONYMOUS_LOGIN;

    const ORG: i64 = 1;

    #[derive(Default)]
    struct MemoryDashboards {
        rows: Mutex<HashMap<i64, Dashboard>>,
        fail_find: bool,
        fail_delete: bool,
        deletes: AtomicUsize,
    }

    impl MemoryDashboards {
        fn with(rows: Vec<Dashboard>) -> Self {
            Self {
                rows: Mutex::new(rows.into_iter().map(|d| (d.id, d)).collect()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl DashboardStore for MemoryDashboards {
        async fn find(&self, org_id: i64, key: &DashboardRef) -> AppResult<Option<Dashboard>> {
            if self.fail_find {
                return Err(AppError::database("connection reset"));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .find(|d| {
                    d.org_id == org_id
                        && match key {
                            DashboardRef::Id(id) => d.id == *id,
                            DashboardRef::Slug(slug) => &d.slug == slug,
                        }
                })
                .cloned())
        }

        async fn delete(&self, org_id: i64, id: i64) -> AppResult<bool> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                return Err(AppError::database("deadlock detected"));
            }
            let mut rows = self.rows.lock().unwrap();
            match rows.get(&id) {
                Some(d) if d.org_id == org_id => Ok(rows.remove(&id).is_some()),
                _ => Ok(false),
            }
        }
    }

    #[derive(Default)]
    struct MemoryAcls {
        entries: HashMap<i64, Vec<AclEntry>>,
        fail: bool,
    }

    impl MemoryAcls {
        fn with(dashboard_id: i64, entries: Vec<AclEntry>) -> Self {
            let mut acls = Self::default();
            acls.entries.insert(dashboard_id, entries);
            acls
        }
    }

    #[async_trait]
    impl AclStore for MemoryAcls {
        async fn acl_entries(&self, _org_id: i64, dashboard_id: i64) -> AppResult<Vec<AclEntry>> {
            if self.fail {
                return Err(AppError::database("acl table unavailable"));
            }
            Ok(self.entries.get(&dashboard_id).cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct MemoryUsers {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl UserStore for MemoryUsers {
        async fn find_login(&self, user_id: i64) -> AppResult<Option<String>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(match user_id {
                10 => Some("viewer".into()),
                20 => Some("editor".into()),
                _ => None,
            })
        }
    }

    /// Guardian with canned answers. `None` makes the check fail.
    #[derive(Clone)]
    struct Scripted {
        view: Option<bool>,
        edit: Option<bool>,
        save: Option<bool>,
        admin: Option<bool>,
        /// Calls to edit, save and admin.
        secondary: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(
            view: Option<bool>,
            edit: Option<bool>,
            save: Option<bool>,
            admin: Option<bool>,
        ) -> Self {
            Self {
                view,
                edit,
                save,
                admin,
                secondary: Arc::default(),
            }
        }

        fn secondary_calls(&self) -> usize {
            self.secondary.load(Ordering::SeqCst)
        }

        fn counted(&self, value: Option<bool>) -> AppResult<bool> {
            self.secondary.fetch_add(1, Ordering::SeqCst);
            answer(value)
        }
    }

    fn answer(value: Option<bool>) -> AppResult<bool> {
        value.ok_or_else(|| AppError::database("permission lookup failed"))
    }

    #[async_trait]
    impl Guardian for Scripted {
        async fn can_view(&self) -> AppResult<bool> {
            answer(self.view)
        }
        async fn can_edit(&self) -> AppResult<bool> {
            self.counted(self.edit)
        }
        async fn can_save(&self) -> AppResult<bool> {
            self.counted(self.save)
        }
        async fn can_admin(&self) -> AppResult<bool> {
            self.counted(self.admin)
        }
    }

    impl GuardianProvider for Scripted {
        fn guardian(&self, _: &Dashboard, _: &Principal) -> Box<dyn Guardian> {
            Box::new(self.clone())
        }
    }

    fn folder(id: i64, title: &str) -> Dashboard {
        let mut d = Dashboard::new_folder(ORG, title);
        d.id = id;
        d
    }

    fn restricted_folder(id: i64, title: &str) -> Dashboard {
        Dashboard {
            has_acl: true,
            ..folder(id, title)
        }
    }

    fn viewer() -> Principal {
        Principal::new(ORG, 10, "viewer", OrgRole::Viewer)
    }

    fn editor() -> Principal {
        Principal::new(ORG, 20, "editor", OrgRole::Editor)
    }

    fn service_with_users(
        dashboards: Arc<MemoryDashboards>,
        guardians: Arc<dyn GuardianProvider>,
        users: Arc<MemoryUsers>,
    ) -> FolderService {
        FolderService::new(dashboards, guardians, DisplayNameResolver::new(users))
    }

    fn service_with(
        dashboards: Arc<MemoryDashboards>,
        guardians: Arc<dyn GuardianProvider>,
    ) -> FolderService {
        service_with_users(dashboards, guardians, Arc::default())
    }

    fn service(rows: Vec<Dashboard>, acls: MemoryAcls) -> FolderService {
        let guardians =
            DashboardGuardianProvider::new(Arc::new(acls), GuardianConfig::default());
        service_with(Arc::new(MemoryDashboards::with(rows)), Arc::new(guardians))
    }

    fn user_200_may_edit() -> MemoryAcls {
        MemoryAcls::with(
            1,
            vec![AclEntry::new(1, AclSubject::User(200), PermissionLevel::Edit)],
        )
    }

    #[tokio::test]
    async fn test_viewer_without_acl_gets_read_only_view() {
        let svc = service(vec![folder(1, "Ops")], MemoryAcls::default());

        let view = svc.get_folder(&viewer(), DashboardRef::Id(1)).await.unwrap();

        assert_eq!(view.id, 1);
        assert_eq!(view.title, "Ops");
        assert!(!view.has_acl);
        assert_eq!(
            view.capabilities(),
            Capabilities::for_level(Some(PermissionLevel::View))
        );
    }

    #[tokio::test]
    async fn test_editor_without_acl_can_edit_and_save() {
        let svc = service(vec![folder(1, "Ops")], MemoryAcls::default());

        let view = svc.get_folder(&editor(), DashboardRef::Id(1)).await.unwrap();

        assert!(view.can_view && view.can_edit && view.can_save);
        assert!(!view.can_admin);
    }

    #[tokio::test]
    async fn test_stale_entries_on_folder_without_acl_are_ignored() {
        let svc = service(vec![folder(1, "Ops")], user_200_may_edit());

        let view = svc.get_folder(&viewer(), DashboardRef::Id(1)).await.unwrap();

        assert!(!view.has_acl);
        assert_eq!(
            view.capabilities(),
            Capabilities::for_level(Some(PermissionLevel::View))
        );
    }

    #[tokio::test]
    async fn test_acl_without_matching_entry_is_forbidden() {
        let svc = service(vec![restricted_folder(1, "Ops")], user_200_may_edit());

        for principal in [viewer(), editor()] {
            let err = svc.get_folder(&principal, DashboardRef::Id(1)).await.unwrap_err();
            assert!(matches!(err, FolderAccessError::Forbidden));
        }
    }

    #[tokio::test]
    async fn test_acl_matching_user_entry_grants_level() {
        let svc = service(vec![restricted_folder(1, "Ops")], user_200_may_edit());
        let principal = Principal::new(ORG, 200, "owner", OrgRole::Viewer);

        let view = svc.get_folder(&principal, DashboardRef::Id(1)).await.unwrap();

        assert!(view.has_acl);
        assert_eq!(
            view.capabilities(),
            Capabilities::for_level(Some(PermissionLevel::Edit))
        );
    }

    #[tokio::test]
    async fn test_acl_team_entry_grants_level() {
        let acls = MemoryAcls::with(
            1,
            vec![
                AclEntry::new(1, AclSubject::Team(5), PermissionLevel::Edit),
                AclEntry::new(1, AclSubject::Role(OrgRole::Viewer), PermissionLevel::View),
            ],
        );
        let svc = service(vec![restricted_folder(1, "Ops")], acls);

        let view = svc
            .get_folder(&viewer().with_teams(vec![5]), DashboardRef::Id(1))
            .await
            .unwrap();

        assert!(view.can_view && view.can_edit && view.can_save);
        assert!(!view.can_admin);
    }

    #[tokio::test]
    async fn test_missing_and_non_folder_are_identical() {
        let mut dash = folder(2, "Plain dashboard");
        dash.is_folder = false;
        let svc = service(vec![folder(1, "Ops"), dash], MemoryAcls::default());

        let missing = svc.get_folder(&editor(), DashboardRef::Id(99)).await.unwrap_err();
        let not_folder = svc.get_folder(&editor(), DashboardRef::Id(2)).await.unwrap_err();

        assert!(matches!(missing, FolderAccessError::NotFound { cause: None }));
        assert!(matches!(not_folder, FolderAccessError::NotFound { cause: None }));
        assert_eq!(missing.to_string(), not_folder.to_string());
    }

    #[tokio::test]
    async fn test_other_org_is_not_found() {
        let mut other = folder(1, "Ops");
        other.org_id = 2;
        let svc = service(vec![other], MemoryAcls::default());

        let err = svc.get_folder(&editor(), DashboardRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FolderAccessError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_found_with_cause() {
        let dashboards = Arc::new(MemoryDashboards {
            fail_find: true,
            ..MemoryDashboards::default()
        });
        let guardians = DashboardGuardianProvider::new(
            Arc::new(MemoryAcls::default()),
            GuardianConfig::default(),
        );
        let svc = service_with(dashboards, Arc::new(guardians));

        let err = svc.get_folder(&viewer(), DashboardRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FolderAccessError::NotFound { cause: Some(_) }));
    }

    #[tokio::test]
    async fn test_acl_failure_is_permission_check_error() {
        let svc = service(
            vec![restricted_folder(1, "Ops")],
            MemoryAcls {
                fail: true,
                ..MemoryAcls::default()
            },
        );

        let err = svc.get_folder(&viewer(), DashboardRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FolderAccessError::PermissionCheck(_)));
    }

    #[tokio::test]
    async fn test_secondary_check_failures_degrade_to_false() {
        let guardian = Scripted::new(Some(true), None, Some(true), None);
        let svc = service_with(
            Arc::new(MemoryDashboards::with(vec![folder(1, "Ops")])),
            Arc::new(guardian.clone()),
        );

        let view = svc.get_folder(&editor(), DashboardRef::Id(1)).await.unwrap();

        assert!(view.can_view);
        assert!(!view.can_edit);
        assert!(view.can_save);
        assert!(!view.can_admin);
        assert_eq!(guardian.secondary_calls(), 3);
    }

    #[tokio::test]
    async fn test_view_denial_stops_before_secondary_work() {
        let mut f = folder(1, "Ops");
        f.created_by = 20;
        f.updated_by = 10;
        let guardian = Scripted::new(Some(false), Some(true), Some(true), Some(true));
        let users = Arc::new(MemoryUsers::default());
        let svc = service_with_users(
            Arc::new(MemoryDashboards::with(vec![f])),
            Arc::new(guardian.clone()),
            Arc::clone(&users),
        );

        let err = svc.get_folder(&editor(), DashboardRef::Id(1)).await.unwrap_err();

        assert!(matches!(err, FolderAccessError::Forbidden));
        assert_eq!(guardian.secondary_calls(), 0);
        assert_eq!(users.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_view_failure_is_not_degraded() {
        let mut f = folder(1, "Ops");
        f.created_by = 20;
        let guardian = Scripted::new(None, Some(true), Some(true), Some(true));
        let users = Arc::new(MemoryUsers::default());
        let svc = service_with_users(
            Arc::new(MemoryDashboards::with(vec![f])),
            Arc::new(guardian.clone()),
            Arc::clone(&users),
        );

        let err = svc.get_folder(&editor(), DashboardRef::Id(1)).await.unwrap_err();

        assert!(matches!(err, FolderAccessError::PermissionCheck(_)));
        assert_eq!(guardian.secondary_calls(), 0);
        assert_eq!(users.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_actor_logins_and_fallback() {
        let mut f = folder(1, "Ops");
        f.created_by = 20;
        f.updated_by = 0;
        let mut g = folder(3, "Archive");
        g.created_by = 12345;
        g.updated_by = 10;
        let svc = service(vec![f, g], MemoryAcls::default());

        let view = svc.get_folder(&viewer(), DashboardRef::Id(1)).await.unwrap();
        assert_eq!(view.created_by, "editor");
        assert_eq!(view.updated_by, ANONYMOUS_LOGIN);

        let view = svc.get_folder(&viewer(), DashboardRef::Id(3)).await.unwrap();
        assert_eq!(view.created_by, ANONYMOUS_LOGIN);
        assert_eq!(view.updated_by, "viewer");
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let svc = service(vec![folder(1, "Team Ops")], MemoryAcls::default());

        let view = svc
            .get_folder(&viewer(), DashboardRef::Slug("team-ops".into()))
            .await
            .unwrap();
        assert_eq!(view.id, 1);
    }

    #[tokio::test]
    async fn test_editor_deletes_folder() {
        let dashboards = Arc::new(MemoryDashboards::with(vec![folder(1, "Ops")]));
        let guardians = DashboardGuardianProvider::new(
            Arc::new(MemoryAcls::default()),
            GuardianConfig::default(),
        );
        let svc = service_with(Arc::clone(&dashboards), Arc::new(guardians));

        let deleted = svc.delete_folder(&editor(), DashboardRef::Id(1)).await.unwrap();
        assert_eq!(deleted.title, "Ops");
        assert_eq!(deleted.message, "Folder Ops deleted");

        let err = svc.get_folder(&editor(), DashboardRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FolderAccessError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_viewer_cannot_delete() {
        let dashboards = Arc::new(MemoryDashboards::with(vec![folder(1, "Ops")]));
        let guardians = DashboardGuardianProvider::new(
            Arc::new(MemoryAcls::default()),
            GuardianConfig::default(),
        );
        let svc = service_with(Arc::clone(&dashboards), Arc::new(guardians));

        let err = svc.delete_folder(&viewer(), DashboardRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FolderAccessError::Forbidden));
        assert_eq!(dashboards.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_store_failure() {
        let dashboards = Arc::new(MemoryDashboards {
            fail_delete: true,
            ..MemoryDashboards::with(vec![folder(1, "Ops")])
        });
        let guardians = DashboardGuardianProvider::new(
            Arc::new(MemoryAcls::default()),
            GuardianConfig::default(),
        );
        let svc = service_with(dashboards, Arc::new(guardians));

        let err = svc.delete_folder(&editor(), DashboardRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FolderAccessError::Store(_)));
    }
}
