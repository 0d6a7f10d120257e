//! The four capability flags reported for a folder.

use serde::{Deserialize, Serialize};

use super::level::PermissionLevel;

/// What a principal may do with one dashboard or folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// May read the resource.
    pub can_view: bool,
    /// May modify the resource in the editor.
    pub can_edit: bool,
    /// May persist changes.
    pub can_save: bool,
    /// May manage permissions.
    pub can_admin: bool,
}

impl Capabilities {
    /// No access at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Flags implied by an effective permission level. Save shares the
    /// edit threshold.
    pub fn for_level(level: Option<PermissionLevel>) -> Self {
        let at_least = |required| level.is_some_and(|l| l.has_at_least(required));
        Self {
            can_view: at_least(PermissionLevel::View),
            can_edit: at_least(PermissionLevel::Edit),
            can_save: at_least(PermissionLevel::Edit),
            can_admin: at_least(PermissionLevel::Admin),
        }
    }
}
