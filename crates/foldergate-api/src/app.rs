//! Application builder — wires repositories, services and middleware into
//! an Axum app, and runs it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use foldergate_auth::guardian::DashboardGuardianProvider;
use foldergate_auth::jwt::JwtDecoder;
use foldergate_core::config::AppConfig;
use foldergate_core::error::{AppError, ErrorKind};
use foldergate_database::repositories::{
    AclRepository, DashboardRepository, TeamRepository, UserRepository,
};
use foldergate_service::folder::FolderService;
use foldergate_service::user::DisplayNameResolver;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state over a PostgreSQL pool.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let dashboard_repo = Arc::new(DashboardRepository::new(db_pool.clone()));
    let acl_repo = Arc::new(AclRepository::new(db_pool.clone()));
    let team_repo = Arc::new(TeamRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool));

    let guardians = Arc::new(DashboardGuardianProvider::new(
        acl_repo,
        config.guardian.clone(),
    ));
    let folder_service = Arc::new(FolderService::new(
        dashboard_repo,
        guardians,
        DisplayNameResolver::new(user_repo),
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    AppState::new(Arc::new(config), jwt_decoder, team_repo, folder_service)
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Runs the HTTP server until Ctrl-C or SIGTERM.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid server bind address", e)
        })?;
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(build_state(config, db_pool.clone()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "FolderGate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(grace_seconds = grace.as_secs(), "Draining database pool");
    if tokio::time::timeout(grace, db_pool.close()).await.is_err() {
        tracing::warn!("Database pool did not close within the grace period");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
