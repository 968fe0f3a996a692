//! Property-based tests for session state transitions.

use std::sync::Arc;

use async_trait::async_trait;
use picpro_images::{ImageConfig, ImageHandler, ImagePayload, SelectedFile};
use picpro_providers::{ImageGenerator, ProviderError};
use picpro_sessions::{GenerateOutcome, SessionController, SessionPhase, SessionState};
use proptest::prelude::*;

/// Echoes the original back as PNG, or fails when asked to.
struct EchoGenerator {
    fail: bool,
}

#[async_trait]
impl ImageGenerator for EchoGenerator {
    fn id(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    async fn generate(&self, payload: &ImagePayload) -> Result<ImagePayload, ProviderError> {
        if self.fail {
            return Err(ProviderError::NetworkError("offline".into()));
        }
        ImagePayload::new(payload.bytes().to_vec(), "image/png")
            .map_err(|e| ProviderError::InvalidPayload(e.to_string()))
    }
}

#[derive(Debug, Clone)]
enum Action {
    SelectPhoto(Vec<u8>),
    SelectDocument,
    Generate,
    Reset,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 1..32).prop_map(|tail| {
            let mut bytes = vec![0xFF, 0xD8, 0xFF];
            bytes.extend(tail);
            Action::SelectPhoto(bytes)
        }),
        Just(Action::SelectDocument),
        Just(Action::Generate),
        Just(Action::Reset),
    ]
}

/// Invariants every reachable state must hold.
fn check_invariants(state: &SessionState) -> Result<(), TestCaseError> {
    match state {
        SessionState::Idle => {
            prop_assert!(state.original().is_none());
            prop_assert!(state.generated().is_none());
        }
        SessionState::Result { original, generated } => {
            prop_assert!(!original.is_empty());
            prop_assert!(!generated.is_empty());
            prop_assert!(generated.media_type().starts_with("image/"));
        }
        SessionState::Failed { original, message } => {
            prop_assert!(!original.is_empty());
            prop_assert!(!message.is_empty());
        }
        SessionState::Previewing { original } => {
            prop_assert!(original.media_type().starts_with("image/"));
        }
        SessionState::Generating { .. } => {
            prop_assert!(false, "sequential actions never leave the session generating");
        }
    }
    Ok(())
}

proptest! {
    /// Any sequence of sequential actions keeps the session consistent, and a
    /// generated image only ever exists alongside its original.
    #[test]
    fn prop_action_sequences_keep_invariants(
        actions in prop::collection::vec(action_strategy(), 1..20),
        fail in any::<bool>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionController::new(
            ImageHandler::new(ImageConfig::default()),
            Arc::new(EchoGenerator { fail }),
        );

        for (i, action) in actions.into_iter().enumerate() {
            let before = session.state();
            match action {
                Action::SelectPhoto(bytes) => {
                    let path = dir.path().join(format!("photo-{}.jpg", i));
                    std::fs::write(&path, &bytes).unwrap();
                    let outcome = tokio_test::block_on(session.select(&SelectedFile::new(&path)));
                    prop_assert!(outcome.is_accepted());
                    let after = session.state();
                    prop_assert_eq!(after.original().map(|p| p.bytes()), Some(&bytes[..]));
                }
                Action::SelectDocument => {
                    let path = dir.path().join(format!("doc-{}.pdf", i));
                    std::fs::write(&path, b"%PDF-1.4").unwrap();
                    tokio_test::block_on(session.select(&SelectedFile::new(&path)));
                    prop_assert_eq!(session.state(), before);
                }
                Action::Generate => {
                    let outcome = tokio_test::block_on(session.generate());
                    match before.phase() {
                        SessionPhase::Previewing | SessionPhase::Failed => {
                            prop_assert!(matches!(
                                outcome,
                                GenerateOutcome::Completed | GenerateOutcome::Failed(_)
                            ));
                            let after = session.state();
                            prop_assert_eq!(after.original(), before.original());
                        }
                        _ => {
                            prop_assert!(matches!(outcome, GenerateOutcome::Ignored(_)));
                            prop_assert_eq!(session.state(), before);
                        }
                    }
                }
                Action::Reset => {
                    session.reset();
                    prop_assert_eq!(session.state(), SessionState::Idle);
                }
            }
            check_invariants(&session.state())?;
        }
    }
}
