// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::*;
use crate::error::CliResult;

/// Pic Pro - professional headshots from casual photos
#[derive(Parser, Debug)]
#[command(name = "picpro")]
#[command(bin_name = "picpro")]
#[command(about = "Turn a casual photo into a professional headshot")]
#[command(
    long_about = "Pic Pro: send a casual photo to an AI image model and get a professional headshot back.\n\nQuick start:\n  • export GEMINI_API_KEY=...\n  • picpro generate selfie.jpg    One-shot generation\n  • picpro studio                 Interactive upload, generate and download\n  • picpro config                 Show the effective configuration"
)]
#[command(version)]
#[command(author = "Pic Pro Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Generate a headshot from one photo
    #[command(about = "Generate a professional headshot from a photo and save it")]
    Generate {
        /// Photo to transform
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,

        /// Directory the result is saved into (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,
    },

    /// Interactive studio shell
    #[command(about = "Open the interactive studio: pick or drop a photo, generate, download")]
    Studio {
        /// Directory downloads are saved into (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,
    },

    /// Show configuration
    #[command(about = "Show the effective configuration with the API key redacted")]
    Config,
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli).await
    }

    /// The command to run; the studio when none was given
    pub fn command(cli: &Cli) -> Commands {
        cli.command.clone().unwrap_or(Commands::Studio {
            output: None,
            model: None,
        })
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        match Self::command(cli) {
            Commands::Generate {
                photo,
                output,
                model,
            } => {
                let cmd = GenerateCommand::new(photo)
                    .with_output_dir(output)
                    .with_model(model);
                cmd.execute().await
            }
            Commands::Studio { output, model } => {
                let cmd = StudioCommand::new(output, model);
                cmd.execute().await
            }
            Commands::Config => {
                let cmd = ConfigCommand::new();
                cmd.execute().await
            }
        }
    }
}
