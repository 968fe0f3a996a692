//! The upload area: drag hover state plus the two ways a photo gets picked.

use tracing::debug;

use crate::formats::is_image_media_type;
use crate::handler::ImageHandler;
use crate::models::SelectedFile;

/// Upload area state.
///
/// Both entry points hand back at most one file. The drop path also skips a
/// first file that plainly declares a non-image type, so nothing reaches
/// ingestion in that case.
#[derive(Debug, Default, Clone)]
pub struct DropZone {
    dragging: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is hovering over the zone.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Files dropped onto the zone. Only the first is considered.
    pub fn drop(&mut self, files: Vec<SelectedFile>) -> Option<SelectedFile> {
        self.dragging = false;
        let first = ImageHandler::first_file(files)?;

        match ImageHandler::declared_media_type(&first) {
            Some(media_type) if !is_image_media_type(&media_type) => {
                debug!(file = %first.display_name(), %media_type, "Ignoring non-image drop");
                None
            }
            _ => Some(first),
        }
    }

    /// Raw drop text from the terminal.
    pub fn drop_event(&mut self, event_data: &str) -> Option<SelectedFile> {
        self.drop(ImageHandler::files_from_event(event_data))
    }

    /// Files chosen in the file picker. Only the first is considered.
    pub fn pick(&self, files: Vec<SelectedFile>) -> Option<SelectedFile> {
        ImageHandler::first_file(files)
    }
}
