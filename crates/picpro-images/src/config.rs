//! Configuration for image ingestion.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ImageResult;

/// Image ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Ingestion limits
    pub ingestion: IngestionConfig,
}

/// Limits applied when a photo is selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestionConfig {
    /// Maximum accepted file size in MB (inline request limit of the generation API)
    pub max_image_size_mb: u64,
    /// Sniff magic bytes when the file name has no recognizable extension
    pub sniff_unknown_extensions: bool,
}

#[allow(clippy::derivable_impls)]
impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            ingestion: IngestionConfig::default(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_image_size_mb: 20,
            sniff_unknown_extensions: true,
        }
    }
}

/// Values one config file actually sets. Anything left out keeps the value
/// from the level below.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    ingestion: IngestionLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IngestionLayer {
    max_image_size_mb: Option<u64>,
    sniff_unknown_extensions: Option<bool>,
}

impl ImageConfig {
    /// Load configuration from a YAML file, or defaults if the file doesn't exist.
    pub fn from_file(path: &Path) -> ImageResult<Self> {
        let mut config = Self::default();
        if let Some(layer) = Self::read_layer(path)? {
            config.apply(layer);
        }
        Ok(config)
    }

    /// Load configuration with hierarchy support.
    ///
    /// Configuration hierarchy (highest to lowest priority):
    /// 1. Project-level config (`config/images.yaml`)
    /// 2. User-level config (`~/.picpro/config/images.yaml`)
    /// 3. Built-in defaults
    pub fn load_with_hierarchy() -> ImageResult<Self> {
        Self::load_from(
            Self::user_config_path().as_deref(),
            Path::new("config/images.yaml"),
        )
    }

    /// Load defaults, then the user file, then the project file. Missing
    /// files are skipped; unreadable or malformed ones are errors.
    pub fn load_from(user_config: Option<&Path>, project_config: &Path) -> ImageResult<Self> {
        let mut config = Self::default();
        for path in user_config.into_iter().chain(Some(project_config)) {
            if let Some(layer) = Self::read_layer(path)? {
                config.apply(layer);
            }
        }
        Ok(config)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".picpro").join("config").join("images.yaml"))
    }

    fn read_layer(path: &Path) -> ImageResult<Option<ConfigLayer>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    /// Apply the values a file sets. A zero size limit is ignored.
    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(max) = layer.ingestion.max_image_size_mb.filter(|mb| *mb != 0) {
            self.ingestion.max_image_size_mb = max;
        }
        if let Some(sniff) = layer.ingestion.sniff_unknown_extensions {
            self.ingestion.sniff_unknown_extensions = sniff;
        }
    }

    /// Maximum accepted file size in bytes.
    pub fn max_image_size_bytes(&self) -> u64 {
        self.ingestion
            .max_image_size_mb
            .saturating_mul(1024 * 1024)
    }
}
