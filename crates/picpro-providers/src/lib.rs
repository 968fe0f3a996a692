//! Pic Pro generation client
//!
//! Sends a selfie together with a fixed headshot instruction to an external
//! image-generation model and extracts the generated image from the reply.

pub mod api_key;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use api_key::{ApiKey, API_KEY_ENV_VAR};
pub use config::{GenerationConfig, MODEL_ENV_VAR};
pub use error::ProviderError;
pub use models::{GenerateContentRequest, GenerateContentResponse, InlineData, Part};
pub use prompt::{DEFAULT_MODEL, HEADSHOT_INSTRUCTION};
pub use provider::ImageGenerator;
pub use providers::GoogleImageProvider;
