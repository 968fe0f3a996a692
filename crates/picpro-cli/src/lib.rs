// Pic Pro CLI Library

pub mod app;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod render;
pub mod router;
pub mod shell;

pub use app::AppConfig;
pub use commands::studio::{Studio, StudioReply};
pub use error::{CliError, CliResult};
pub use logging::{init_logging, VerbosityLevel};
pub use router::{Cli, CommandRouter, Commands};
pub use shell::ShellInput;
