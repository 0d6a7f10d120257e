//! Database migration command.

use clap::Args;

use crate::output;
use foldergate_core::config::AppConfig;
use foldergate_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {}

/// Apply all pending migrations
pub async fn execute(_args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;

    println!("Running database migrations...");
    foldergate_database::migration::run_migrations(&pool).await?;
    output::print_success("All migrations applied successfully.");

    pool.close().await;
    Ok(())
}
