//! Generation client configuration
//!
//! Loaded from built-in defaults, then `~/.picpro/config/generation.yaml`,
//! then `config/generation.yaml`, then the environment. The credential is an
//! explicit value here; nothing reads it from a global at call time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api_key::{ApiKey, API_KEY_ENV_VAR};
use crate::error::ProviderError;
use crate::prompt::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Environment variable overriding the model
pub const MODEL_ENV_VAR: &str = "PICPRO_MODEL";

/// Settings for the generation client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Service API key
    #[serde(skip_serializing)]
    pub api_key: Option<ApiKey>,
    /// Model identifier
    pub model: String,
    /// Base URL of the models endpoint
    pub base_url: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Values one config file actually sets
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    api_key: Option<ApiKey>,
    model: Option<String>,
    base_url: Option<String>,
}

impl GenerationConfig {
    /// Load configuration from a YAML file, or defaults if the file doesn't exist
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let mut config = Self::default();
        if let Some(layer) = Self::read_layer(path)? {
            config.apply(layer);
        }
        Ok(config)
    }

    /// Load configuration from files and environment
    pub fn load_with_hierarchy() -> Result<Self, ProviderError> {
        let config = Self::load_from(
            Self::user_config_path().as_deref(),
            Path::new("config/generation.yaml"),
        )?;
        Ok(config.with_env_overrides())
    }

    /// Defaults, then the user file, then the project file. Missing files are
    /// skipped and each file only overrides the fields it sets.
    pub fn load_from(
        user_config: Option<&Path>,
        project_config: &Path,
    ) -> Result<Self, ProviderError> {
        let mut config = Self::default();
        for path in user_config.into_iter().chain(Some(project_config)) {
            if let Some(layer) = Self::read_layer(path)? {
                debug!(path = %path.display(), "Applying generation config file");
                config.apply(layer);
            }
        }
        Ok(config)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".picpro").join("config").join("generation.yaml"))
    }

    fn read_layer(path: &Path) -> Result<Option<ConfigLayer>, ProviderError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(key) = layer.api_key {
            self.api_key = Some(key);
        }
        if let Some(model) = layer.model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        if let Some(base_url) = layer.base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = base_url;
        }
    }

    /// Apply `GEMINI_API_KEY` and `PICPRO_MODEL`
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = ApiKey::from_env() {
            debug!("Using API key from {}", API_KEY_ENV_VAR);
            self.api_key = Some(key);
        }
        if let Ok(model) = std::env::var(MODEL_ENV_VAR) {
            if !model.trim().is_empty() {
                self.model = model.trim().to_string();
            }
        }
        self
    }

    /// Use an explicit key, taking precedence over every other source
    pub fn with_api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The API key, or `MissingCredential` when none was configured
    pub fn require_api_key(&self) -> Result<&ApiKey, ProviderError> {
        self.api_key
            .as_ref()
            .ok_or_else(|| ProviderError::MissingCredential(API_KEY_ENV_VAR.to_string()))
    }
}
