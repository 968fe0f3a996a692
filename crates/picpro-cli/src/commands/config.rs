// Show the effective configuration

use picpro_providers::{API_KEY_ENV_VAR, MODEL_ENV_VAR};

use super::Command;
use crate::app::AppConfig;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Print the configuration the other commands would use
pub struct ConfigCommand;

impl ConfigCommand {
    pub fn new() -> Self {
        Self
    }

    /// Rendered configuration, with the API key masked
    pub fn render(config: &AppConfig, style: &OutputStyle) -> Vec<String> {
        let key = match &config.generation.api_key {
            Some(key) => key.masked(),
            None => format!("(not set, export {})", API_KEY_ENV_VAR),
        };

        vec![
            style.section("Generation"),
            style.key_value("model", &config.generation.model),
            style.key_value("base_url", &config.generation.base_url),
            style.key_value("api_key", &key),
            style.section("Images"),
            style.key_value(
                "max_image_size_mb",
                &config.images.ingestion.max_image_size_mb.to_string(),
            ),
            style.key_value(
                "sniff_unknown_extensions",
                &config.images.ingestion.sniff_unknown_extensions.to_string(),
            ),
            String::new(),
            style.info("Files: ~/.picpro/config/{generation,images}.yaml, then config/*.yaml"),
            style.info(&format!("Environment: {}, {}", API_KEY_ENV_VAR, MODEL_ENV_VAR)),
        ]
    }
}

impl Default for ConfigCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        let config = AppConfig::load(None)?;
        let style = OutputStyle::default();
        println!("{}", style.header("Pic Pro Configuration"));
        for line in Self::render(&config, &style) {
            println!("{}", line);
        }
        Ok(())
    }
}
