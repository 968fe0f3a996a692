// Effective configuration and session wiring shared by the commands

use std::sync::Arc;

use picpro_images::{ImageConfig, ImageHandler};
use picpro_providers::{GenerationConfig, GoogleImageProvider, ImageGenerator};
use picpro_sessions::SessionController;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Configuration for one run of the binary
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub images: ImageConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Load both configuration hierarchies, then apply the `--model` flag.
    pub fn load(model_override: Option<&str>) -> CliResult<Self> {
        let images = ImageConfig::load_with_hierarchy()?;
        let mut generation = GenerationConfig::load_with_hierarchy()?;
        if let Some(model) = model_override {
            let model = model.trim();
            if model.is_empty() {
                return Err(CliError::InvalidArgument {
                    message: "--model must not be empty".to_string(),
                });
            }
            generation = generation.with_model(model);
        }
        debug!(model = %generation.model, base_url = %generation.base_url, "Configuration loaded");
        Ok(Self { images, generation })
    }

    /// The production generator; fails when no API key is configured.
    pub fn generator(&self) -> CliResult<Arc<dyn ImageGenerator>> {
        let provider = GoogleImageProvider::from_config(&self.generation)?;
        Ok(Arc::new(provider))
    }

    /// A fresh session using `generator`
    pub fn controller_with(&self, generator: Arc<dyn ImageGenerator>) -> SessionController {
        SessionController::new(ImageHandler::new(self.images.clone()), generator)
    }

    /// A fresh session backed by the production generator
    pub fn controller(&self) -> CliResult<SessionController> {
        Ok(self.controller_with(self.generator()?))
    }
}

impl From<picpro_images::ImageConfig> for AppConfig {
    fn from(images: picpro_images::ImageConfig) -> Self {
        Self {
            images,
            generation: GenerationConfig::default(),
        }
    }
}
