// Terminal rendering of session states

use picpro_images::ImagePayload;
use picpro_sessions::{messages, SelectOutcome, SessionState};

use crate::output::OutputStyle;

/// Lines shown when the session enters `state`.
pub fn state_lines(state: &SessionState, style: &OutputStyle) -> Vec<String> {
    match state {
        SessionState::Idle => vec![
            style.header(messages::UPLOAD_PROMPT),
            style.tip("open <path>, or drag a photo onto this window"),
        ],
        SessionState::Previewing { original } => vec![
            style.info(&format!("{}: {}", messages::ORIGINAL_LABEL, describe(original))),
            style.tip(&format!("generate: {}", messages::PREVIEW_READY)),
        ],
        SessionState::Generating { .. } => vec![
            style.header(messages::GENERATING_TITLE),
            style.info(messages::GENERATING_DETAIL),
        ],
        SessionState::Result { generated, .. } => vec![
            style.success(messages::RESULT_TITLE),
            style.key_value("Imagem", &describe(generated)),
            style.tip(&format!(
                "download: {}  |  reset: {}",
                messages::DOWNLOAD_ACTION,
                messages::TRY_ANOTHER
            )),
        ],
        SessionState::Failed { message, .. } => vec![
            style.error(message),
            style.tip(&format!("generate to retry  |  reset: {}", messages::TRY_ANOTHER)),
        ],
    }
}

/// Side-by-side description of the original and the result.
pub fn preview_lines(state: &SessionState, style: &OutputStyle) -> Vec<String> {
    let mut lines = Vec::new();
    match state.original() {
        Some(original) => {
            lines.push(style.key_value(messages::ORIGINAL_LABEL, &describe(original)));
            lines.push(style.key_value("sha256", &original.sha256()));
        }
        None => {
            lines.push(style.warning(messages::UPLOAD_PROMPT));
            return lines;
        }
    }
    if let Some(generated) = state.generated() {
        lines.push(style.key_value(messages::RESULT_TITLE, &describe(generated)));
        lines.push(style.key_value("sha256", &generated.sha256()));
    }
    lines
}

/// Message for a selection that did not become the original.
pub fn select_message(outcome: &SelectOutcome, style: &OutputStyle) -> Option<String> {
    match outcome {
        SelectOutcome::Accepted | SelectOutcome::Superseded => None,
        SelectOutcome::Rejected(e) => Some(style.warning(&e.to_string())),
        SelectOutcome::Busy => Some(style.warning(messages::GENERATING_TITLE)),
        SelectOutcome::NothingSelected => Some(style.warning("No file in the drop")),
    }
}

/// One-line summary of an image: type, size and, when decodable, dimensions.
pub fn describe(payload: &ImagePayload) -> String {
    let size = format_size(payload.len());
    match payload.dimensions() {
        Some((width, height)) => format!("{}, {}, {}x{}", payload.media_type(), size, width, height),
        None => format!("{}, {}", payload.media_type(), size),
    }
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < KB * KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / (KB * KB))
    }
}
