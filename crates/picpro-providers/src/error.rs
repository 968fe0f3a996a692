//! Error types for the generation client

use thiserror::Error;

/// Errors that can occur when calling the generation service
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProviderError {
    /// No API key could be found in any configuration source
    #[error("Missing credential: set {0} or add api_key to generation.yaml")]
    MissingCredential(String),

    /// Authentication failed (never includes key details)
    #[error("Authentication failed")]
    AuthError,

    /// Rate limited by the service
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Network error occurred
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The service answered with a non-success status
    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    /// The response body could not be understood
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response was well-formed but carried no image
    #[error("No image generated: {0}")]
    NoImageProduced(String),

    /// The payload cannot be sent
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ProviderError {
    fn from(err: serde_yaml::Error) -> Self {
        ProviderError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else if err.is_timeout() {
            ProviderError::NetworkError("Request timeout".to_string())
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }
}
