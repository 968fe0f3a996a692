//! Error types for image ingestion.

use thiserror::Error;

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors that can occur while ingesting an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The selected file does not declare an `image/*` media type.
    #[error("Not an image: {media_type}")]
    InvalidMediaType { media_type: String },

    /// Image file exceeds the configured maximum size.
    #[error("File too large: {size_mb:.1} MB exceeds maximum of {max_mb} MB")]
    FileTooLarge { size_mb: f64, max_mb: u64 },

    /// The file contains no bytes.
    #[error("File is empty")]
    EmptyFile,

    /// File could not be used as an image.
    #[error("Invalid image file: {0}")]
    InvalidFile(String),

    /// A data URL could not be parsed.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ImageError {
    /// Whether this error means "not an image" as opposed to an unreadable file.
    pub fn is_media_type_rejection(&self) -> bool {
        matches!(self, ImageError::InvalidMediaType { .. })
    }
}

impl From<serde_yaml::Error> for ImageError {
    fn from(err: serde_yaml::Error) -> Self {
        ImageError::ConfigError(err.to_string())
    }
}
