//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use foldergate_auth::jwt::JwtDecoder;
use foldergate_core::config::AppConfig;
use foldergate_database::repositories::TeamStore;
use foldergate_service::folder::FolderService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Team membership lookup for principals
    pub team_store: Arc<dyn TeamStore>,
    /// Folder access gateway
    pub folder_service: Arc<FolderService>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("folder_service", &self.folder_service)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Assembles state from already-built components.
    pub fn new(
        config: Arc<AppConfig>,
        jwt_decoder: Arc<JwtDecoder>,
        team_store: Arc<dyn TeamStore>,
        folder_service: Arc<FolderService>,
    ) -> Self {
        Self {
            config,
            jwt_decoder,
            team_store,
            folder_service,
            started_at: Instant::now(),
        }
    }
}
