//! Development access tokens.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use foldergate_auth::jwt::{AccessToken, JwtEncoder};
use foldergate_core::config::AppConfig;
use foldergate_core::error::AppError;
use foldergate_entity::user::OrgRole;

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User ID (token subject)
    #[arg(short, long)]
    pub user: i64,
    /// Organization ID
    #[arg(short, long, default_value_t = 1)]
    pub org: i64,
    /// Org role: viewer, editor or admin
    #[arg(short, long, default_value = "viewer")]
    pub role: OrgRole,
    /// Login embedded in the token (defaults to "user<ID>")
    #[arg(short, long)]
    pub login: Option<String>,
}

/// Token display row
#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    /// Encoded JWT
    token: String,
    /// Expiry
    expires_at: String,
}

/// Issue a token signed with the configured secret.
pub fn issue(args: &TokenArgs, config: &AppConfig) -> Result<AccessToken, AppError> {
    let login = args
        .login
        .clone()
        .unwrap_or_else(|| format!("user{}", args.user));
    JwtEncoder::new(&config.auth).issue(args.user, args.org, args.role, &login)
}

/// Print a freshly issued token
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let token = issue(args, config)?;

    match format {
        OutputFormat::Table => {
            output::print_kv("User", &args.user.to_string());
            output::print_kv("Org", &args.org.to_string());
            output::print_kv("Role", args.role.as_str());
            output::print_kv("Expires", &token.expires_at.to_rfc3339());
            println!();
            println!("{}", token.token);
        }
        OutputFormat::Json => output::print_list(
            &[TokenRow {
                token: token.token,
                expires_at: token.expires_at.to_rfc3339(),
            }],
            format,
        ),
    }

    Ok(())
}
