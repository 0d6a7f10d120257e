//! The authenticated actor of a request.

use serde::{Deserialize, Serialize};

use super::role::OrgRole;

/// Who is making the request, evaluated fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Active organization.
    pub org_id: i64,
    /// User ID (0 for anonymous access).
    pub user_id: i64,
    /// Login name.
    pub login: String,
    /// Role within `org_id`.
    pub org_role: OrgRole,
    /// Teams the user belongs to in `org_id`.
    pub team_ids: Vec<i64>,
}

impl Principal {
    /// Creates a principal without team memberships.
    pub fn new(org_id: i64, user_id: i64, login: impl Into<String>, org_role: OrgRole) -> Self {
        Self {
            org_id,
            user_id,
            login: login.into(),
            org_role,
            team_ids: Vec::new(),
        }
    }

    /// Attaches team memberships.
    pub fn with_teams(mut self, team_ids: Vec<i64>) -> Self {
        self.team_ids = team_ids;
        self
    }

    /// Whether the principal is a signed-in user rather than anonymous.
    pub fn is_signed_in(&self) -> bool {
        self.user_id > 0
    }

    /// Whether the principal belongs to the given team.
    pub fn is_member_of(&self, team_id: i64) -> bool {
        self.team_ids.contains(&team_id)
    }
}
