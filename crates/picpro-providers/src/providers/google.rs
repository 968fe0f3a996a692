//! Google Gemini image generation
//!
//! Sends the photo as inline data next to the headshot instruction and takes
//! the first inline image of the reply.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use picpro_images::{is_image_media_type, ImagePayload, OUTPUT_MEDIA_TYPE};
use reqwest::{header::RETRY_AFTER, Client};
use tracing::{debug, error, warn};

use crate::{
    api_key::ApiKey,
    config::GenerationConfig,
    error::ProviderError,
    models::{GenerateContentRequest, GenerateContentResponse},
    prompt::{DEFAULT_BASE_URL, DEFAULT_MODEL, HEADSHOT_INSTRUCTION},
    provider::ImageGenerator,
};

/// Seconds to wait when a 429 carries no usable Retry-After header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Google Gemini image generation client
pub struct GoogleImageProvider {
    api_key: ApiKey,
    client: Arc<Client>,
    base_url: String,
    model: String,
}

impl GoogleImageProvider {
    /// Create a new provider with the default endpoint and model
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_client_and_base_url(Arc::new(Client::new()), api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new provider with a custom base URL
    pub fn with_base_url(api_key: ApiKey, base_url: String) -> Self {
        Self::with_client_and_base_url(Arc::new(Client::new()), api_key, base_url)
    }

    /// Create a new provider with a custom HTTP client and base URL
    pub fn with_client_and_base_url(client: Arc<Client>, api_key: ApiKey, base_url: String) -> Self {
        Self {
            api_key,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Build a provider from configuration; fails with `MissingCredential`
    /// when no key was configured
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ProviderError> {
        let api_key = config.require_api_key()?.clone();
        if config.model.trim().is_empty() {
            return Err(ProviderError::ConfigError("Model must not be empty".to_string()));
        }
        Ok(Self::with_base_url(api_key, config.base_url.clone()).with_model(config.model.clone()))
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn validate_payload(payload: &ImagePayload) -> Result<(), ProviderError> {
        if payload.is_empty() {
            return Err(ProviderError::InvalidPayload("Image is empty".to_string()));
        }
        if !is_image_media_type(payload.media_type()) {
            return Err(ProviderError::InvalidPayload(format!(
                "Unsupported media type: {}",
                payload.media_type()
            )));
        }
        Ok(())
    }

    /// Take the first inline image out of a response
    pub fn extract_image(response: &GenerateContentResponse) -> Result<ImagePayload, ProviderError> {
        let reason = response.stop_reason().unwrap_or("response had no image part");

        let inline = response
            .first_inline_image()
            .ok_or_else(|| ProviderError::NoImageProduced(reason.to_string()))?;

        let bytes = STANDARD
            .decode(inline.data.trim())
            .map_err(|e| ProviderError::MalformedResponse(format!("Invalid image data: {}", e)))?;
        if bytes.is_empty() {
            return Err(ProviderError::NoImageProduced("image part was empty".to_string()));
        }

        ImagePayload::new(bytes, OUTPUT_MEDIA_TYPE)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }

    fn retry_after(response: &reqwest::Response) -> u64 {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
    }
}

#[async_trait]
impl ImageGenerator for GoogleImageProvider {
    fn id(&self) -> &str {
        "google"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, payload: &ImagePayload) -> Result<ImagePayload, ProviderError> {
        Self::validate_payload(payload)?;

        let request = GenerateContentRequest::image_edit(
            payload.media_type(),
            payload.to_base64(),
            HEADSHOT_INSTRUCTION,
        );

        debug!(
            model = %self.model,
            media_type = payload.media_type(),
            size_bytes = payload.len(),
            "Sending image generation request to Google"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Google API request failed: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = Self::retry_after(&response);
            let error_text = response.text().await.unwrap_or_default();
            error!("Google API error ({}): {}", status, error_text);

            return match status.as_u16() {
                401 | 403 => Err(ProviderError::AuthError),
                429 => Err(ProviderError::RateLimited(retry_after)),
                code => Err(ProviderError::ServiceError {
                    status: code,
                    message: status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string(),
                }),
            };
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Google API returned an unreadable body: {}", e);
            ProviderError::MalformedResponse(e.to_string())
        })?;

        let generated = Self::extract_image(&parsed)?;
        debug!(size_bytes = generated.len(), "Received generated image");
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, Content, Part};

    fn key() -> ApiKey {
        ApiKey::new("test-key").unwrap()
    }

    fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { role: Some("model".to_string()), parts }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }

    #[test]
    fn test_provider_identity() {
        let provider = GoogleImageProvider::new(key());
        assert_eq!(provider.id(), "google");
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GoogleImageProvider::with_base_url(key(), "http://localhost:1234/".to_string())
            .with_model("m1");
        assert_eq!(provider.endpoint(), "http://localhost:1234/m1:generateContent");
    }

    #[test]
    fn test_from_config_requires_key() {
        let result = GoogleImageProvider::from_config(&GenerationConfig::default());
        assert!(matches!(result, Err(ProviderError::MissingCredential(_))));
    }

    #[test]
    fn test_from_config_uses_model() {
        let config = GenerationConfig::default().with_api_key(key()).with_model("custom");
        let provider = GoogleImageProvider::from_config(&config).unwrap();
        assert_eq!(provider.model(), "custom");
    }

    #[test]
    fn test_extract_image_forces_png() {
        let response = response_with_parts(vec![Part::inline("image/jpeg", "AQID")]);
        let image = GoogleImageProvider::extract_image(&response).unwrap();
        assert_eq!(image.bytes(), &[1, 2, 3]);
        assert_eq!(image.media_type(), "image/png");
    }

    #[test]
    fn test_extract_image_without_image_part() {
        let response = response_with_parts(vec![Part::text("I can't do that")]);
        assert!(matches!(
            GoogleImageProvider::extract_image(&response),
            Err(ProviderError::NoImageProduced(_))
        ));
    }

    #[test]
    fn test_extract_image_empty_data() {
        let response = response_with_parts(vec![Part::inline("image/png", "")]);
        assert!(matches!(
            GoogleImageProvider::extract_image(&response),
            Err(ProviderError::NoImageProduced(_))
        ));
    }

    #[test]
    fn test_extract_image_bad_base64() {
        let response = response_with_parts(vec![Part::inline("image/png", "not base64!")]);
        assert!(matches!(
            GoogleImageProvider::extract_image(&response),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
