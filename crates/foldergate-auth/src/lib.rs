//! # foldergate-auth
//!
//! Authorization and authentication for FolderGate.
//!
//! ## Modules
//!
//! - `guardian` — per-request capability resolution (view/edit/save/admin)
//!   from org role defaults and dashboard ACL entries
//! - `jwt` — access token creation and validation

pub mod guardian;
pub mod jwt;

pub use guardian::{DashboardGuardian, DashboardGuardianProvider, Guardian, GuardianProvider};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
