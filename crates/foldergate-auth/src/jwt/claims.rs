//! JWT claims structure used in access tokens.

use serde::{Deserialize, Serialize};

use foldergate_entity::user::{OrgRole, Principal};

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: i64,
    /// Active organization.
    pub org: i64,
    /// Org role at the time of token issuance.
    pub role: OrgRole,
    /// Login for convenience.
    pub login: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    /// Returns the org ID.
    pub fn org_id(&self) -> i64 {
        self.org
    }

    /// Builds the request principal once team memberships are known.
    pub fn into_principal(self, team_ids: Vec<i64>) -> Principal {
        Principal::new(self.org, self.sub, self.login, self.role).with_teams(team_ids)
    }
}
