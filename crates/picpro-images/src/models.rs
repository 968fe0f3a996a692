//! Data models for selected files and in-memory image payloads.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::{ImageError, ImageResult};
use crate::formats::is_image_media_type;

/// A file offered by the user through the drop zone or the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Path to the file
    pub path: PathBuf,
    /// Media type declared by the source of the event, if any
    pub declared_media_type: Option<String>,
}

impl SelectedFile {
    /// A file whose media type will be derived from its name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            declared_media_type: None,
        }
    }

    /// Attach the media type the event source declared for this file.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.declared_media_type = Some(media_type.into());
        self
    }

    /// The file name for display, or the full path when it has none.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An image held in memory: its bytes paired with a media type.
///
/// Payloads are immutable. The bytes are reference counted, so cloning a
/// payload into a new session state never copies the image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Arc<[u8]>,
    media_type: String,
}

impl ImagePayload {
    /// Create a payload, rejecting empty content and non-image media types.
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: impl Into<String>) -> ImageResult<Self> {
        let bytes = bytes.into();
        let media_type = media_type.into();

        if !is_image_media_type(&media_type) {
            return Err(ImageError::InvalidMediaType { media_type });
        }
        if bytes.is_empty() {
            return Err(ImageError::EmptyFile);
        }

        Ok(Self { bytes, media_type })
    }

    /// Parse a `data:<media type>;base64,<data>` URL.
    pub fn from_data_url(url: &str) -> ImageResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::InvalidDataUrl("missing data: scheme".to_string()))?;
        let (media_type, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| ImageError::InvalidDataUrl("missing ;base64, marker".to_string()))?;
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| ImageError::InvalidDataUrl(e.to_string()))?;

        Self::new(bytes, media_type)
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared media type, e.g. `image/png`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a constructed payload.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size in MB.
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }

    /// Hex-encoded SHA256 of the bytes.
    pub fn sha256(&self) -> String {
        let hash = Sha256::digest(&self.bytes);
        format!("{:x}", hash)
    }

    /// Whether both payloads share the same allocation.
    pub fn shares_bytes_with(&self, other: &ImagePayload) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Base64 encoding of the bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Data URL used to preview the image.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.to_base64())
    }

    /// Pixel dimensions, when the bytes decode as an image.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::load_from_memory(&self.bytes)
            .ok()
            .map(|img| (img.width(), img.height()))
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_payload_rejects_non_image_media_type() {
        let err = ImagePayload::new(vec![1, 2, 3], "application/pdf").unwrap_err();
        assert!(err.is_media_type_rejection());
    }

    #[test]
    fn test_payload_rejects_empty_bytes() {
        let err = ImagePayload::new(Vec::new(), "image/png").unwrap_err();
        assert!(matches!(err, ImageError::EmptyFile));
    }

    #[test]
    fn test_data_url_format() {
        let payload = ImagePayload::new(b"abc".to_vec(), "image/jpeg").unwrap();
        assert_eq!(payload.data_url(), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn test_from_data_url() {
        let payload = ImagePayload::from_data_url("data:image/png;base64,YWJj").unwrap();
        assert_eq!(payload.media_type(), "image/png");
        assert_eq!(payload.bytes(), b"abc");
    }

    #[test]
    fn test_from_data_url_rejects_garbage() {
        assert!(ImagePayload::from_data_url("image/png;base64,YWJj").is_err());
        assert!(ImagePayload::from_data_url("data:image/png,YWJj").is_err());
        assert!(ImagePayload::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_clone_shares_bytes() {
        let payload = ImagePayload::new(PNG_HEADER.to_vec(), "image/png").unwrap();
        let copy = payload.clone();
        assert!(payload.shares_bytes_with(&copy));
        assert_eq!(payload, copy);
    }

    #[test]
    fn test_sha256_is_hex() {
        let payload = ImagePayload::new(b"test content".to_vec(), "image/png").unwrap();
        let hash = payload.sha256();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_dimensions_of_header_only_png() {
        let payload = ImagePayload::new(PNG_HEADER.to_vec(), "image/png").unwrap();
        // A bare header does not decode
        assert_eq!(payload.dimensions(), None);
    }

    #[test]
    fn test_debug_does_not_dump_bytes() {
        let payload = ImagePayload::new(vec![7u8; 32], "image/png").unwrap();
        let debug = format!("{:?}", payload);
        assert!(debug.contains("len: 32"));
        assert!(!debug.contains("7, 7"));
    }

    #[test]
    fn test_selected_file_display_name() {
        let file = SelectedFile::new("/photos/me.jpg").with_media_type("image/jpeg");
        assert_eq!(file.display_name(), "me.jpg");
        assert_eq!(file.declared_media_type.as_deref(), Some("image/jpeg"));
    }
}
