//! Organization role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's role within an organization.
///
/// Roles are ordered by privilege: Admin > Editor > Viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "org_role")]
pub enum OrgRole {
    /// Read-only member.
    Viewer,
    /// Can create and modify content.
    Editor,
    /// Organization administrator.
    Admin,
}

impl OrgRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Editor => 2,
            Self::Viewer => 1,
        }
    }

    /// Whether this role includes every right of `other`.
    pub fn includes(&self, other: &OrgRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an org admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrgRole {
    type Err = foldergate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(foldergate_core::AppError::validation(format!(
                "Invalid org role: '{s}'. Expected one of: Viewer, Editor, Admin"
            ))),
        }
    }
}
