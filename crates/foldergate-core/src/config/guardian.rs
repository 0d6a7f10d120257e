//! Capability resolution settings.

use serde::{Deserialize, Serialize};

/// Tunables for how folder capabilities are derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Grant the edit capability to anyone who can view.
    ///
    /// Editing in the UI does not imply saving: `can_save` still requires
    /// an edit-level grant.
    #[serde(default)]
    pub viewers_can_edit: bool,
    /// Let org admins bypass explicit access control entries.
    ///
    /// Off by default: a folder with access control only opens to org
    /// admins that hold a matching entry.
    #[serde(default)]
    pub admin_bypass_acl: bool,
}
