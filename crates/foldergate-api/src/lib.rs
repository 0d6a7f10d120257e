//! # foldergate-api
//!
//! HTTP API layer for FolderGate built on Axum.
//!
//! Provides the folder endpoints, health check, the bearer-token
//! extractor, request logging and CORS middleware, and the mapping from
//! `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
