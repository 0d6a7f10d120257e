//! Authorized folder access.

pub mod error;
pub mod service;
pub mod view;

pub use error::FolderAccessError;
pub use service::FolderService;
pub use view::{DeletedFolder, FolderView};
