//! Photo selection: turns a picked or dropped file into an [`ImagePayload`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ImageConfig;
use crate::error::{ImageError, ImageResult};
use crate::formats::{is_image_media_type, ImageFormat};
use crate::models::{ImagePayload, SelectedFile};

/// Media type reported for files whose type cannot be determined.
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Where selected photos are read from.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Size in bytes of the file at `path`; fails when it is not a regular file.
    async fn size(&self, path: &Path) -> ImageResult<u64>;

    /// Full contents of the file at `path`.
    async fn read(&self, path: &Path) -> ImageResult<Vec<u8>>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

#[async_trait]
impl PhotoStore for LocalFiles {
    async fn size(&self, path: &Path) -> ImageResult<u64> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(ImageError::InvalidFile("Path is not a file".to_string()));
        }
        Ok(metadata.len())
    }

    async fn read(&self, path: &Path) -> ImageResult<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }
}

/// Reads selected photos into memory after validating their media type.
#[derive(Clone)]
pub struct ImageHandler {
    config: ImageConfig,
    store: Arc<dyn PhotoStore>,
}

impl ImageHandler {
    /// Create a new image handler with the given configuration.
    pub fn new(config: ImageConfig) -> Self {
        Self {
            config,
            store: Arc::new(LocalFiles),
        }
    }

    /// Read photos from `store` instead of the local filesystem.
    pub fn with_store(mut self, store: Arc<dyn PhotoStore>) -> Self {
        self.store = store;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Media type the file declares: the event's own type, else one guessed
    /// from the file extension.
    pub fn declared_media_type(file: &SelectedFile) -> Option<String> {
        if let Some(media_type) = &file.declared_media_type {
            return Some(media_type.clone());
        }
        mime_guess::from_path(&file.path)
            .first_raw()
            .map(str::to_string)
    }

    /// Reject files that declare a non-image media type, without reading them.
    pub fn check_media_type(&self, file: &SelectedFile) -> ImageResult<Option<String>> {
        match Self::declared_media_type(file) {
            Some(media_type) if is_image_media_type(&media_type) => Ok(Some(media_type)),
            Some(media_type) => Err(ImageError::InvalidMediaType { media_type }),
            None if self.config.ingestion.sniff_unknown_extensions => Ok(None),
            None => Err(ImageError::InvalidMediaType {
                media_type: UNKNOWN_MEDIA_TYPE.to_string(),
            }),
        }
    }

    /// Read a selected file fully into memory.
    ///
    /// Non-image files are rejected with [`ImageError::InvalidMediaType`]
    /// before any bytes are read. Files without a recognizable extension are
    /// sniffed by their header when the configuration allows it.
    pub async fn select(&self, file: &SelectedFile) -> ImageResult<ImagePayload> {
        let declared = self.check_media_type(file)?;

        let size = self.store.size(&file.path).await?;
        if size > self.config.max_image_size_bytes() {
            return Err(ImageError::FileTooLarge {
                size_mb: size as f64 / (1024.0 * 1024.0),
                max_mb: self.config.ingestion.max_image_size_mb,
            });
        }

        let bytes = self.store.read(&file.path).await?;
        if bytes.is_empty() {
            return Err(ImageError::EmptyFile);
        }

        let media_type = match declared {
            Some(media_type) => media_type,
            None => ImageFormat::detect_from_bytes(&bytes)
                .map(|format| format.media_type().to_string())
                .map_err(|_| ImageError::InvalidMediaType {
                    media_type: UNKNOWN_MEDIA_TYPE.to_string(),
                })?,
        };

        let payload = ImagePayload::new(bytes, media_type)?;
        debug!(
            file = %file.display_name(),
            media_type = payload.media_type(),
            size_bytes = payload.len(),
            "Photo read into memory"
        );
        Ok(payload)
    }

    /// Keep only the first of several offered files.
    pub fn first_file(files: Vec<SelectedFile>) -> Option<SelectedFile> {
        let count = files.len();
        let first = files.into_iter().next();
        if count > 1 {
            debug!(discarded = count - 1, "Only the first offered file is used");
        }
        first
    }

    /// Extract file paths from raw drag-and-drop text.
    ///
    /// Terminals paste dropped files as paths separated by newlines or
    /// spaces, sometimes quoted, with backslash-escaped spaces, or as
    /// `file://` URIs.
    pub fn extract_paths_from_event(event_data: &str) -> Vec<PathBuf> {
        tokenize_drop_text(event_data)
            .into_iter()
            .map(|token| match token.strip_prefix("file://") {
                Some(uri_path) => PathBuf::from(percent_decode(uri_path)),
                None => expand_home(&token),
            })
            .collect()
    }

    /// Turn raw drop text into selected files, in drop order.
    pub fn files_from_event(event_data: &str) -> Vec<SelectedFile> {
        Self::extract_paths_from_event(event_data)
            .into_iter()
            .map(SelectedFile::new)
            .collect()
    }
}

impl fmt::Debug for ImageHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Turn a leading `~` into the home directory, as a shell would.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

fn tokenize_drop_text(event_data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = event_data.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let value = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(value) = value {
                decoded.push(value);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
