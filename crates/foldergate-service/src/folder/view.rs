//! Response shapes for folder operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foldergate_entity::dashboard::Dashboard;
use foldergate_entity::permission::Capabilities;

/// A folder as seen by one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderView {
    /// Folder ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Whether explicit ACL entries govern access.
    pub has_acl: bool,
    /// Always true for a returned view.
    pub can_view: bool,
    /// May modify in the editor.
    pub can_edit: bool,
    /// May persist changes.
    pub can_save: bool,
    /// May manage permissions.
    pub can_admin: bool,
    /// Creator login.
    pub created_by: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last updater login.
    pub updated_by: String,
    /// Last update time.
    pub updated: DateTime<Utc>,
    /// Save counter.
    pub version: i32,
}

impl FolderView {
    /// Assembles a view from a folder, resolved capabilities and actor logins.
    pub fn new(
        folder: Dashboard,
        capabilities: Capabilities,
        created_by: String,
        updated_by: String,
    ) -> Self {
        Self {
            id: folder.id,
            title: folder.title,
            slug: folder.slug,
            has_acl: folder.has_acl,
            can_view: capabilities.can_view,
            can_edit: capabilities.can_edit,
            can_save: capabilities.can_save,
            can_admin: capabilities.can_admin,
            created_by,
            created: folder.created,
            updated_by,
            updated: folder.updated,
            version: folder.version,
        }
    }

    /// The capability flags of this view.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            can_view: self.can_view,
            can_edit: self.can_edit,
            can_save: self.can_save,
            can_admin: self.can_admin,
        }
    }
}

/// Confirmation of a deleted folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedFolder {
    /// Title of the removed folder.
    pub title: String,
    /// Human-readable confirmation.
    pub message: String,
}
