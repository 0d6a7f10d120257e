//! Route definitions for the FolderGate HTTP API.
//!
//! Routes are mounted under `/api` and receive `AppState` through Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::get,
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router. Middleware is applied in [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Folder reads and deletion
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder).delete(handlers::folder::delete_folder),
        )
        .route(
            "/folders/slug/{slug}",
            get(handlers::folder::get_folder_by_slug),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
