// Command handlers for the picpro CLI

pub mod config;
pub mod generate;
pub mod studio;

pub use config::ConfigCommand;
pub use generate::GenerateCommand;
pub use studio::StudioCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
