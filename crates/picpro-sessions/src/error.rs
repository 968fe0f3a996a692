//! Error types for session operations

use thiserror::Error;

/// Errors returned by session actions.
///
/// Generation failures are not errors here: they move the session to
/// `Failed`, from which the user can retry or reset.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Download requested while no generated image exists
    #[error("No generated image to download")]
    NothingToDownload,

    /// Writing the downloaded file failed
    #[error("Download failed: {0}")]
    Download(#[from] std::io::Error),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
