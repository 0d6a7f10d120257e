//! Failure modes of folder access and their outward mapping.

use thiserror::Error;

use foldergate_core::error::{AppError, ErrorKind};

/// Why a folder operation did not succeed.
///
/// Retrieval and authorization failures short-circuit the operation. The
/// outward shape of each variant is fixed by the `From` impl below; causes
/// are kept as sources for logging and never reach the response body.
#[derive(Debug, Error)]
pub enum FolderAccessError {
    /// No folder with that key: the id is unknown, the record is not a
    /// folder, or the lookup itself failed.
    #[error("Folder not found")]
    NotFound {
        /// Store failure behind the miss, if any.
        #[source]
        cause: Option<AppError>,
    },
    /// The guardian decided the principal lacks the required capability.
    #[error("Access denied to this folder")]
    Forbidden,
    /// The guardian could not decide.
    #[error("Error while checking folder permissions")]
    PermissionCheck(#[source] AppError),
    /// A write to the store failed after authorization passed.
    #[error("Failed to delete folder")]
    Store(#[source] AppError),
}

impl FolderAccessError {
    /// A plain miss with no underlying failure.
    pub fn not_found() -> Self {
        Self::NotFound { cause: None }
    }

    /// The outward error kind for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden => ErrorKind::Authorization,
            Self::PermissionCheck(_) | Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<FolderAccessError> for AppError {
    fn from(err: FolderAccessError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            FolderAccessError::NotFound { cause: None } | FolderAccessError::Forbidden => {
                AppError::new(kind, message)
            }
            FolderAccessError::NotFound { cause: Some(cause) }
            | FolderAccessError::PermissionCheck(cause)
            | FolderAccessError::Store(cause) => AppError::with_source(kind, message, cause),
        }
    }
}
