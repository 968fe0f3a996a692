//! Session lifecycle for picpro.
//!
//! A session walks a single photo through `Idle -> Previewing -> Generating
//! -> Result | Failed`. The [`SessionController`] is the only owner of the
//! state; front ends observe it through a `watch` channel and drive it with
//! `select`, `generate`, `reset` and `download`.

pub mod controller;
pub mod download;
pub mod error;
pub mod messages;
pub mod models;

pub use controller::SessionController;
pub use download::{DirectorySink, DownloadSink, FileSink, DOWNLOAD_FILE_NAME};
pub use error::{SessionError, SessionResult};
pub use models::{GenerateOutcome, IgnoreReason, SelectOutcome, SessionPhase, SessionState};
