//! Image ingestion for picpro.
//!
//! This crate turns a user-supplied photo into an in-memory [`ImagePayload`]:
//! - Media type validation (only `image/*` is accepted)
//! - Drag-and-drop and file picker entry points
//! - Data URLs for previewing the original and generated images
//! - Size limits loaded from YAML configuration

pub mod config;
pub mod drop_zone;
pub mod error;
pub mod formats;
pub mod handler;
pub mod models;

pub use config::ImageConfig;
pub use drop_zone::DropZone;
pub use error::{ImageError, ImageResult};
pub use formats::{is_image_media_type, ImageFormat, OUTPUT_MEDIA_TYPE};
pub use handler::{expand_home, ImageHandler, LocalFiles, PhotoStore};
pub use models::{ImagePayload, SelectedFile};
