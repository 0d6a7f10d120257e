//! # foldergate-service
//!
//! Business logic service layer for FolderGate. Services orchestrate the
//! stores from `foldergate-database` and the guardians from
//! `foldergate-auth` into application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod folder;
pub mod user;

pub use folder::{DeletedFolder, FolderAccessError, FolderService, FolderView};
pub use user::{ANONYMOUS_LOGIN, DisplayNameResolver};
