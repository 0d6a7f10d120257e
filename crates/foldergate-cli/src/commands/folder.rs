//! Folder inspection commands.
//!
//! `folder show` runs the same authorized read the HTTP API serves, as a
//! given user, straight against the configured database.

use clap::{ArgGroup, Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use foldergate_core::config::AppConfig;
use foldergate_core::error::AppError;
use foldergate_database::repositories::{UserRepository, UserStore};
use foldergate_entity::dashboard::DashboardRef;
use foldergate_entity::user::{OrgRole, Principal};
use foldergate_service::folder::FolderView;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show a folder as a given user would see it
    Show(ShowArgs),
}

/// Arguments for `folder show`
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("key").required(true).args(["id", "slug"])))]
pub struct ShowArgs {
    /// Organization ID
    #[arg(short, long, default_value_t = 1)]
    pub org: i64,
    /// Acting user ID
    #[arg(short, long)]
    pub user: i64,
    /// Acting user's org role
    #[arg(short, long, default_value = "viewer")]
    pub role: OrgRole,
    /// Acting user's login (looked up from the user table when omitted)
    #[arg(short, long)]
    pub login: Option<String>,
    /// Folder ID
    #[arg(long)]
    pub id: Option<i64>,
    /// Folder slug
    #[arg(long)]
    pub slug: Option<String>,
}

impl ShowArgs {
    fn key(&self) -> Result<DashboardRef, AppError> {
        match (self.id, &self.slug) {
            (Some(id), None) => Ok(DashboardRef::Id(id)),
            (None, Some(slug)) => Ok(DashboardRef::Slug(slug.clone())),
            _ => Err(AppError::validation("Pass exactly one of --id or --slug")),
        }
    }

    async fn acting_login(&self, users: &dyn UserStore) -> Result<String, AppError> {
        if let Some(login) = &self.login {
            return Ok(login.clone());
        }
        users
            .find_login(self.user)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", self.user)))
    }
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: i64,
    /// Title
    title: String,
    /// Slug
    slug: String,
    /// Explicit ACL
    acl: bool,
    /// Capabilities
    access: String,
    /// Created by
    created_by: String,
    /// Updated
    updated: String,
    /// Version
    version: i32,
}

impl From<FolderView> for FolderRow {
    fn from(view: FolderView) -> Self {
        let flags = [
            (view.can_view, "view"),
            (view.can_edit, "edit"),
            (view.can_save, "save"),
            (view.can_admin, "admin"),
        ];
        let access = flags
            .iter()
            .filter(|(granted, _)| *granted)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            id: view.id,
            title: view.title,
            slug: view.slug,
            acl: view.has_acl,
            access,
            created_by: view.created_by,
            updated: view.updated.format("%Y-%m-%d %H:%M").to_string(),
            version: view.version,
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        FolderCommand::Show(show) => {
            let key = show.key()?;
            let pool = super::create_db_pool(&config).await?;
            let state = foldergate_api::build_state(config, pool.clone());
            let users = UserRepository::new(pool.clone());

            let result = async {
                let login = show.acting_login(&users).await?;
                let team_ids = state
                    .team_store
                    .team_ids_for_user(show.org, show.user)
                    .await?;
                let principal =
                    Principal::new(show.org, show.user, login, show.role).with_teams(team_ids);
                Ok::<_, AppError>(state.folder_service.get_folder(&principal, key).await?)
            }
            .await;
            pool.close().await;
            let view = result?;

            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&view)?;
                    println!("{json}");
                }
                OutputFormat::Table => output::print_list(&[FolderRow::from(view)], format),
            }
        }
    }

    Ok(())
}
