//! Permission levels granted by ACL entries.

use serde::{Deserialize, Serialize};

/// Permission level on a dashboard or folder.
///
/// Ordered by privilege: Admin > Edit > View. Stored as the numeric
/// discriminant; the gap at 3 is kept so levels stay bit-compatible with
/// existing rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i16)]
pub enum PermissionLevel {
    /// Read-only access.
    View = 1,
    /// Can modify and save.
    Edit = 2,
    /// Can modify, save and manage permissions.
    Admin = 4,
}

impl PermissionLevel {
    /// Check if this level grants at least `required`.
    pub fn has_at_least(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}
