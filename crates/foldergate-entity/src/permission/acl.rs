//! ACL entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use foldergate_core::AppError;

use super::level::PermissionLevel;
use crate::user::{OrgRole, Principal};

/// Who an ACL entry grants its permission to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "id")]
pub enum AclSubject {
    /// A single user.
    User(i64),
    /// Every member of a team.
    Team(i64),
    /// Every org member whose role includes this one.
    Role(OrgRole),
}

impl AclSubject {
    /// Whether this subject covers the given principal.
    ///
    /// User subjects never match an anonymous principal.
    pub fn matches(&self, principal: &Principal) -> bool {
        match self {
            Self::User(user_id) => principal.is_signed_in() && *user_id == principal.user_id,
            Self::Team(team_id) => principal.is_member_of(*team_id),
            Self::Role(role) => principal.org_role.includes(role),
        }
    }
}

/// A permission granted on one dashboard or folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    /// The dashboard or folder this entry applies to.
    pub dashboard_id: i64,
    /// The grantee.
    pub subject: AclSubject,
    /// The granted level.
    pub permission: PermissionLevel,
}

impl AclEntry {
    /// Creates an entry.
    pub fn new(dashboard_id: i64, subject: AclSubject, permission: PermissionLevel) -> Self {
        Self {
            dashboard_id,
            subject,
            permission,
        }
    }
}

/// Raw `dashboard_acl` row; exactly one of `user_id`, `team_id` or `role`
/// is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AclEntryRow {
    /// Unique entry identifier.
    pub id: i64,
    /// Owning organization.
    pub org_id: i64,
    /// The dashboard or folder.
    pub dashboard_id: i64,
    /// User grantee.
    pub user_id: Option<i64>,
    /// Team grantee.
    pub team_id: Option<i64>,
    /// Role grantee.
    pub role: Option<OrgRole>,
    /// Granted level.
    pub permission: PermissionLevel,
    /// When the entry was created.
    pub created: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated: DateTime<Utc>,
}

impl TryFrom<AclEntryRow> for AclEntry {
    type Error = AppError;

    fn try_from(row: AclEntryRow) -> Result<Self, Self::Error> {
        let subject = match (row.user_id, row.team_id, row.role) {
            (Some(user_id), None, None) => AclSubject::User(user_id),
            (None, Some(team_id), None) => AclSubject::Team(team_id),
            (None, None, Some(role)) => AclSubject::Role(role),
            _ => {
                return Err(AppError::validation(format!(
                    "ACL entry {} must name exactly one of user, team or role",
                    row.id
                )));
            }
        };

        Ok(AclEntry::new(row.dashboard_id, subject, row.permission))
    }
}

/// Everything needed to resolve capabilities on one dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardAcl {
    /// Whether explicit entries replace the org role defaults.
    pub has_acl: bool,
    /// Explicit entries (ignored when `has_acl` is false).
    pub entries: Vec<AclEntry>,
}

impl DashboardAcl {
    /// Highest level granted to the principal by any matching entry.
    pub fn highest_for(&self, principal: &Principal) -> Option<PermissionLevel> {
        self.entries
            .iter()
            .filter(|entry| entry.subject.matches(principal))
            .map(|entry| entry.permission)
            .max()
    }
}
