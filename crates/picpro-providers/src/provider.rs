//! The generation seam used by the session controller

use async_trait::async_trait;
use picpro_images::ImagePayload;

use crate::error::ProviderError;

/// Turns an input photo into a generated image.
///
/// Implementations make exactly one external call per invocation and never
/// retry. The returned payload always has non-empty bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Get the provider identifier
    fn id(&self) -> &str;

    /// Get the model used for generation
    fn model(&self) -> &str;

    /// Generate a new image from `payload`
    async fn generate(&self, payload: &ImagePayload) -> Result<ImagePayload, ProviderError>;
}
