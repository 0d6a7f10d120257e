//! Login lookup for creator and updater labels.

use std::sync::Arc;

use tracing::warn;

use foldergate_database::repositories::UserStore;

/// Label used when an actor is absent or cannot be resolved.
pub const ANONYMOUS_LOGIN: &str = "Anonymous";

/// Maps user ids to logins. Never fails.
#[derive(Clone)]
pub struct DisplayNameResolver {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for DisplayNameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayNameResolver").finish()
    }
}

impl DisplayNameResolver {
    /// Creates a resolver over a user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Login of `user_id`, or [`ANONYMOUS_LOGIN`] for ids `<= 0`, unknown
    /// users, and lookup failures.
    pub async fn login_for(&self, user_id: i64) -> String {
        if user_id <= 0 {
            return ANONYMOUS_LOGIN.to_string();
        }

        match self.users.find_login(user_id).await {
            Ok(Some(login)) => login,
            Ok(None) => ANONYMOUS_LOGIN.to_string(),
            Err(e) => {
                warn!(user_id, error = %e, "Failed to resolve user login");
                ANONYMOUS_LOGIN.to_string()
            }
        }
    }
}
