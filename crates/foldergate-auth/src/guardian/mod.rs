//! Capability resolution for dashboards and folders.
//!
//! A [`Guardian`] answers four independent questions about one resource
//! for one principal. Each answer is `Ok(bool)` when it could be decided
//! and `Err` when the underlying lookup failed, so callers can tell
//! "denied" apart from "undetermined".

pub mod dashboard;

use async_trait::async_trait;

use foldergate_core::result::AppResult;
use foldergate_entity::dashboard::Dashboard;
use foldergate_entity::permission::Capabilities;
use foldergate_entity::user::Principal;

pub use dashboard::{DashboardGuardian, DashboardGuardianProvider};

/// Capability queries for a single resource and principal.
#[async_trait]
pub trait Guardian: Send + Sync {
    /// May the principal read the resource.
    async fn can_view(&self) -> AppResult<bool>;

    /// May the principal modify the resource in the editor.
    async fn can_edit(&self) -> AppResult<bool>;

    /// May the principal persist changes to the resource.
    async fn can_save(&self) -> AppResult<bool>;

    /// May the principal manage the resource's permissions.
    async fn can_admin(&self) -> AppResult<bool>;

    /// All four flags, failing if any query fails.
    async fn capabilities(&self) -> AppResult<Capabilities> {
        Ok(Capabilities {
            can_view: self.can_view().await?,
            can_edit: self.can_edit().await?,
            can_save: self.can_save().await?,
            can_admin: self.can_admin().await?,
        })
    }
}

/// Builds guardians; one implementation per resource kind.
pub trait GuardianProvider: Send + Sync + 'static {
    /// A guardian for an already fetched `dashboard` as seen by `principal`.
    fn guardian(&self, dashboard: &Dashboard, principal: &Principal) -> Box<dyn Guardian>;
}
