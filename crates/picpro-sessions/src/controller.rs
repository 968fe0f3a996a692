//! Session controller: owns the state and applies every transition

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use picpro_images::{ImageHandler, SelectedFile};
use picpro_providers::ImageGenerator;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::download::{DownloadSink, DOWNLOAD_FILE_NAME};
use crate::error::{SessionError, SessionResult};
use crate::messages;
use crate::models::{GenerateOutcome, IgnoreReason, SelectOutcome, SessionPhase, SessionState};

struct ControllerInner {
    state: SessionState,
    /// Bumped when entering `Generating` and on reset
    generation: u64,
    /// Bumped on every selection and on reset
    selection: u64,
}

/// Drives one photo from selection to downloadable headshot.
///
/// Shared behind `Arc`; the lock is never held across an `.await`, so a
/// `reset` issued while a generation is pending takes effect immediately and
/// the late response is dropped.
pub struct SessionController {
    handler: ImageHandler,
    generator: Arc<dyn ImageGenerator>,
    inner: Mutex<ControllerInner>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionController {
    /// Create a controller in `Idle`
    pub fn new(handler: ImageHandler, generator: Arc<dyn ImageGenerator>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);
        Self {
            handler,
            generator,
            inner: Mutex::new(ControllerInner {
                state: SessionState::Idle,
                generation: 0,
                selection: 0,
            }),
            state_tx,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().state.phase()
    }

    /// Receive every state published from now on.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn generator(&self) -> &dyn ImageGenerator {
        self.generator.as_ref()
    }

    fn transition(&self, inner: &mut ControllerInner, next: SessionState) {
        debug!(from = %inner.state.phase(), to = %next.phase(), "Session transition");
        inner.state = next.clone();
        self.state_tx.send_replace(next);
    }

    /// Read `file` and make it the session's original.
    ///
    /// A rejected file leaves the state untouched; a non-image is refused
    /// before it can displace a read already in flight. If another selection
    /// or a reset happens while the file is being read, this one is dropped.
    pub async fn select(&self, file: &SelectedFile) -> SelectOutcome {
        if let Err(e) = self.handler.check_media_type(file) {
            warn!(file = %file.display_name(), error = %e, "Selection rejected");
            return SelectOutcome::Rejected(e);
        }

        let ticket = {
            let mut inner = self.inner.lock();
            if inner.state.is_generating() {
                debug!(file = %file.display_name(), "Selection ignored while generating");
                return SelectOutcome::Busy;
            }
            inner.selection += 1;
            inner.selection
        };

        let read = self.handler.select(file).await;

        let mut inner = self.inner.lock();
        if inner.selection != ticket {
            debug!(file = %file.display_name(), "Selection superseded");
            return SelectOutcome::Superseded;
        }

        match read {
            Ok(original) => {
                if inner.state.is_generating() {
                    return SelectOutcome::Busy;
                }
                info!(
                    file = %file.display_name(),
                    media_type = original.media_type(),
                    bytes = original.len(),
                    "Photo selected"
                );
                self.transition(&mut inner, SessionState::Previewing { original });
                SelectOutcome::Accepted
            }
            Err(e) => {
                warn!(file = %file.display_name(), error = %e, "Selection rejected");
                SelectOutcome::Rejected(e)
            }
        }
    }

    /// Select the first of several files; the others are discarded.
    pub async fn select_first(&self, files: Vec<SelectedFile>) -> SelectOutcome {
        match ImageHandler::first_file(files) {
            Some(file) => self.select(&file).await,
            None => SelectOutcome::NothingSelected,
        }
    }

    /// Send the original to the generator and wait for the headshot.
    pub async fn generate(&self) -> GenerateOutcome {
        let (ticket, original) = {
            let mut inner = self.inner.lock();
            let original = match &inner.state {
                SessionState::Idle => return GenerateOutcome::Ignored(IgnoreReason::NoImage),
                SessionState::Generating { .. } => {
                    return GenerateOutcome::Ignored(IgnoreReason::InProgress)
                }
                SessionState::Result { .. } => {
                    return GenerateOutcome::Ignored(IgnoreReason::AlreadyGenerated)
                }
                SessionState::Previewing { original } | SessionState::Failed { original, .. } => {
                    original.clone()
                }
            };
            inner.generation += 1;
            let ticket = inner.generation;
            self.transition(
                &mut inner,
                SessionState::Generating {
                    original: original.clone(),
                },
            );
            (ticket, original)
        };

        info!(
            provider = self.generator.id(),
            model = self.generator.model(),
            generation = ticket,
            "Generating headshot"
        );
        let result = self.generator.generate(&original).await;

        let mut inner = self.inner.lock();
        if inner.generation != ticket || !inner.state.is_generating() {
            debug!(generation = ticket, "Discarding stale generation result");
            return GenerateOutcome::Stale;
        }

        match result {
            Ok(generated) => {
                info!(
                    generation = ticket,
                    media_type = generated.media_type(),
                    bytes = generated.len(),
                    "Headshot generated"
                );
                self.transition(&mut inner, SessionState::Result { original, generated });
                GenerateOutcome::Completed
            }
            Err(e) => {
                error!(generation = ticket, error = %e, "Headshot generation failed");
                self.transition(
                    &mut inner,
                    SessionState::Failed {
                        original,
                        message: messages::GENERATION_FAILED.to_string(),
                    },
                );
                GenerateOutcome::Failed(e)
            }
        }
    }

    /// Return to `Idle`, dropping any pending read or generation.
    ///
    /// Returns `false` when the session was already idle.
    pub fn reset(&self) -> bool {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.selection += 1;
        if matches!(inner.state, SessionState::Idle) {
            return false;
        }
        self.transition(&mut inner, SessionState::Idle);
        true
    }

    /// Hand the generated image to `sink` under the fixed download name.
    pub async fn download(&self, sink: &dyn DownloadSink) -> SessionResult<PathBuf> {
        let generated = self
            .inner
            .lock()
            .state
            .generated()
            .cloned()
            .ok_or(SessionError::NothingToDownload)?;

        let path = sink.save(DOWNLOAD_FILE_NAME, generated.bytes()).await?;
        info!(path = %path.display(), bytes = generated.len(), "Headshot saved");
        Ok(path)
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase())
            .field("provider", &self.generator.id())
            .finish()
    }
}
