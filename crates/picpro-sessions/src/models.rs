//! Session state and action outcomes.

use std::fmt;

use picpro_images::{ImageError, ImagePayload};
use picpro_providers::ProviderError;

use crate::messages;

/// The visible state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No image selected
    #[default]
    Idle,
    /// Image selected, not yet sent
    Previewing { original: ImagePayload },
    /// Request in flight
    Generating { original: ImagePayload },
    /// Generation succeeded
    Result {
        original: ImagePayload,
        generated: ImagePayload,
    },
    /// Generation failed; the original is kept for a retry
    Failed {
        original: ImagePayload,
        message: String,
    },
}

/// Fieldless view of [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Previewing,
    Generating,
    Result,
    Failed,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Previewing { .. } => SessionPhase::Previewing,
            SessionState::Generating { .. } => SessionPhase::Generating,
            SessionState::Result { .. } => SessionPhase::Result,
            SessionState::Failed { .. } => SessionPhase::Failed,
        }
    }

    /// The selected photo, in every state but `Idle`.
    pub fn original(&self) -> Option<&ImagePayload> {
        match self {
            SessionState::Idle => None,
            SessionState::Previewing { original }
            | SessionState::Generating { original }
            | SessionState::Result { original, .. }
            | SessionState::Failed { original, .. } => Some(original),
        }
    }

    /// The generated headshot, only in `Result`.
    pub fn generated(&self) -> Option<&ImagePayload> {
        match self {
            SessionState::Result { generated, .. } => Some(generated),
            _ => None,
        }
    }

    /// The failure message, only in `Failed`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, SessionState::Generating { .. })
    }

    /// Headline shown for this state.
    pub fn status_text(&self) -> &'static str {
        match self {
            SessionState::Idle => messages::UPLOAD_PROMPT,
            SessionState::Previewing { .. } => messages::PREVIEW_READY,
            SessionState::Generating { .. } => messages::GENERATING_TITLE,
            SessionState::Result { .. } => messages::RESULT_TITLE,
            SessionState::Failed { .. } => messages::GENERATION_FAILED,
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Previewing => "previewing",
            SessionPhase::Generating => "generating",
            SessionPhase::Result => "result",
            SessionPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What happened to a selection.
#[derive(Debug)]
pub enum SelectOutcome {
    /// The photo became the session's original
    Accepted,
    /// The file was not usable; the state did not change
    Rejected(ImageError),
    /// A newer selection or a reset arrived while this file was being read
    Superseded,
    /// A generation is running; selections are not taken meanwhile
    Busy,
    /// The event carried no file
    NothingSelected,
}

impl SelectOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SelectOutcome::Accepted)
    }
}

/// Why a `generate()` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No image selected
    NoImage,
    /// A generation call is already pending
    InProgress,
    /// The session already shows a result
    AlreadyGenerated,
}

/// What happened to a `generate()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// The session moved to `Result`
    Completed,
    /// The session moved to `Failed`; the cause is kept for diagnostics
    Failed(ProviderError),
    /// The session moved on before the response arrived; it was discarded
    Stale,
    /// Nothing was sent
    Ignored(IgnoreReason),
}
