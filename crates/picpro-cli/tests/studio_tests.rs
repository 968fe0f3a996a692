//! Studio shell behaviour with a scripted generator

use std::sync::Arc;

use async_trait::async_trait;
use picpro_cli::output::OutputStyle;
use picpro_cli::{AppConfig, ShellInput, Studio};
use picpro_images::{ImageConfig, ImagePayload};
use picpro_providers::{ImageGenerator, ProviderError};
use picpro_sessions::{messages, GenerateOutcome, SessionPhase, DOWNLOAD_FILE_NAME};
use tempfile::TempDir;

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 5];

struct StubGenerator {
    fail: bool,
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    fn id(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _payload: &ImagePayload) -> Result<ImagePayload, ProviderError> {
        if self.fail {
            Err(ProviderError::RateLimited(30))
        } else {
            Ok(ImagePayload::new(PNG.to_vec(), "image/png").unwrap())
        }
    }
}

fn studio(fail: bool, output: &TempDir) -> Studio {
    let controller = AppConfig::from(ImageConfig::default())
        .controller_with(Arc::new(StubGenerator { fail }));
    Studio::new(
        Arc::new(controller),
        output.path().to_path_buf(),
        OutputStyle::plain(),
    )
}

fn photo(dir: &TempDir, name: &str, bytes: &[u8]) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path.display().to_string()
}

#[tokio::test]
async fn test_open_generate_download() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut studio = studio(false, &output);
    let path = photo(&input, "me.jpg", JPEG);

    studio.handle(ShellInput::parse(&format!("open {}", path))).await;
    assert_eq!(studio.controller().phase(), SessionPhase::Previewing);

    studio.handle(ShellInput::Generate).await;
    assert_eq!(studio.wait_for_generation().await, Some(GenerateOutcome::Completed));
    assert_eq!(studio.controller().phase(), SessionPhase::Result);

    let reply = studio.handle(ShellInput::Download(None)).await;
    assert!(reply.lines[0].contains(DOWNLOAD_FILE_NAME));
    assert_eq!(
        std::fs::read(output.path().join(DOWNLOAD_FILE_NAME)).unwrap(),
        PNG
    );
}

#[tokio::test]
async fn test_dropped_path_is_selected() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut studio = studio(false, &output);
    let path = photo(&input, "me.jpg", JPEG);

    let reply = studio.handle(ShellInput::parse(&format!("'{}'", path))).await;
    assert!(reply.lines.is_empty());
    assert_eq!(studio.controller().phase(), SessionPhase::Previewing);
}

#[tokio::test]
async fn test_dropped_document_is_ignored() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut studio = studio(false, &output);
    let path = photo(&input, "document.pdf", b"%PDF-1.7");

    let reply = studio.handle(ShellInput::Drop(path)).await;
    assert_eq!(reply.lines.len(), 1);
    assert_eq!(studio.controller().phase(), SessionPhase::Idle);
}

#[tokio::test]
async fn test_generate_without_photo_prompts_for_upload() {
    let output = tempfile::tempdir().unwrap();
    let mut studio = studio(false, &output);

    let reply = studio.handle(ShellInput::Generate).await;
    assert!(reply.lines[0].contains(messages::UPLOAD_PROMPT));
    assert!(studio.wait_for_generation().await.is_none());
}

#[tokio::test]
async fn test_failure_then_reset() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut studio = studio(true, &output);
    let path = photo(&input, "me.jpg", JPEG);

    studio.handle(ShellInput::parse(&format!("open {}", path))).await;
    studio.handle(ShellInput::Generate).await;
    assert!(matches!(
        studio.wait_for_generation().await,
        Some(GenerateOutcome::Failed(ProviderError::RateLimited(30)))
    ));

    let status = studio.handle(ShellInput::Status).await;
    assert!(status.lines[0].contains(messages::GENERATION_FAILED));

    let download = studio.handle(ShellInput::Download(None)).await;
    assert!(download.lines[0].contains("Nothing to download"));

    studio.handle(ShellInput::Reset).await;
    assert_eq!(studio.controller().phase(), SessionPhase::Idle);
}

#[tokio::test]
async fn test_quit_and_unknown() {
    let output = tempfile::tempdir().unwrap();
    let mut studio = studio(false, &output);

    assert!(studio.handle(ShellInput::Quit).await.quit);
    let reply = studio.handle(ShellInput::parse("frobnicate")).await;
    assert!(!reply.quit);
    assert!(reply.lines[0].contains("frobnicate"));
}
