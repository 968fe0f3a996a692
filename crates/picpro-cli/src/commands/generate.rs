// One-shot generation: select, generate, download

use std::path::PathBuf;

use picpro_images::SelectedFile;
use picpro_sessions::{DirectorySink, GenerateOutcome, SelectOutcome, SessionController};
use tracing::debug;

use super::Command;
use crate::app::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::{self, OutputStyle};

/// Turn one photo into a headshot and save it
pub struct GenerateCommand {
    pub photo: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub model: Option<String>,
}

impl GenerateCommand {
    pub fn new(photo: PathBuf) -> Self {
        Self {
            photo,
            output_dir: None,
            model: None,
        }
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Drive `controller` through the whole lifecycle and return the saved path.
    pub async fn run(&self, controller: &SessionController) -> CliResult<PathBuf> {
        match controller.select(&SelectedFile::new(&self.photo)).await {
            SelectOutcome::Accepted => {}
            SelectOutcome::Rejected(e) => return Err(e.into()),
            other => {
                return Err(CliError::Internal(format!(
                    "Selection did not complete: {:?}",
                    other
                )))
            }
        }

        match controller.generate().await {
            GenerateOutcome::Completed => {}
            GenerateOutcome::Failed(cause) => {
                let message = controller
                    .state()
                    .error_message()
                    .unwrap_or(picpro_sessions::messages::GENERATION_FAILED)
                    .to_string();
                return Err(CliError::Generation {
                    message,
                    source: Some(cause),
                });
            }
            other => {
                return Err(CliError::Internal(format!(
                    "Generation did not complete: {:?}",
                    other
                )))
            }
        }

        let sink = DirectorySink::new(self.output_dir());
        let path = controller.download(&sink).await?;
        debug!(path = %path.display(), "Download complete");
        Ok(path)
    }
}

#[async_trait::async_trait]
impl Command for GenerateCommand {
    async fn execute(&self) -> CliResult<()> {
        let config = AppConfig::load(self.model.as_deref())?;
        let controller = config.controller()?;
        let style = OutputStyle::default();

        output::print_info(picpro_sessions::messages::GENERATING_TITLE);
        let path = self.run(&controller).await?;

        output::print_success(picpro_sessions::messages::RESULT_TITLE);
        println!("{}", style.code(&path.display().to_string()));
        Ok(())
    }
}
