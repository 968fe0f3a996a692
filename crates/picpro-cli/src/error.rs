// CLI error type and user-facing messages

use picpro_images::ImageError;
use picpro_providers::ProviderError;
use picpro_sessions::SessionError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The session ended in `Failed`; the message is the one shown to the user
    #[error("Generation failed: {message}")]
    Generation {
        message: String,
        source: Option<ProviderError>,
    },

    #[error("Download error: {0}")]
    Download(#[from] SessionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'picpro --help' for usage information.", message)
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(msg) => {
                format!("Configuration error: {}\n\nRun 'picpro config' to check your configuration.", msg)
            }
            CliError::Image(e) if e.is_media_type_rejection() => {
                format!("{}\n\nChoose a PNG, JPEG, GIF or WebP photo.", e)
            }
            CliError::Image(e) => format!("Could not read the photo: {}", e),
            CliError::Provider(ProviderError::MissingCredential(var)) => format!(
                "No API key configured.\n\nSet {} in your environment or in a .env file.",
                var
            ),
            CliError::Provider(e) => {
                format!("Provider error: {}\n\nCheck your provider configuration with 'picpro config'.", e)
            }
            CliError::Generation { message, .. } => message.clone(),
            CliError::Download(e) => format!("Could not save the image: {}", e),
            CliError::Internal(msg) => format!("Internal error: {}\n\nPlease report this issue.", msg),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        match self {
            CliError::Generation {
                source: Some(cause),
                ..
            } => format!("{:?}", cause),
            other => format!("{:?}", other),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
