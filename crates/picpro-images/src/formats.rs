//! Image format detection from magic bytes.

use crate::error::{ImageError, ImageResult};

/// Media type of every generated image.
pub const OUTPUT_MEDIA_TYPE: &str = "image/png";

/// Image formats recognized by their file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG format
    Png,
    /// JPEG format
    Jpeg,
    /// GIF format
    Gif,
    /// WebP format
    WebP,
}

impl ImageFormat {
    /// Detect image format from bytes (magic bytes).
    pub fn detect_from_bytes(bytes: &[u8]) -> ImageResult<Self> {
        if bytes.len() < 4 {
            return Err(ImageError::InvalidFile(
                "File too small to be a valid image".to_string(),
            ));
        }

        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4e, 0x47]) {
            return Ok(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
            return Ok(ImageFormat::Jpeg);
        }

        // GIF87a or GIF89a
        if bytes.starts_with(b"GIF") {
            return Ok(ImageFormat::Gif);
        }

        // WebP: RIFF ... WEBP
        if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && bytes[8..12] == *b"WEBP" {
            return Ok(ImageFormat::WebP);
        }

        Err(ImageError::InvalidFile(
            "Unable to detect image format from file header".to_string(),
        ))
    }

    /// Get the IANA media type for this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }
}

/// Whether a media type names an image (`image/*`).
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
        && media_type.trim().len() > 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png_format() {
        let png_bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
        let format = ImageFormat::detect_from_bytes(&png_bytes).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg_format() {
        let jpeg_bytes = vec![0xff, 0xd8, 0xff, 0xe0];
        let format = ImageFormat::detect_from_bytes(&jpeg_bytes).unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_webp_format() {
        let mut webp_bytes = b"RIFF".to_vec();
        webp_bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        webp_bytes.extend_from_slice(b"WEBP");
        let format = ImageFormat::detect_from_bytes(&webp_bytes).unwrap();
        assert_eq!(format, ImageFormat::WebP);
    }

    #[test]
    fn test_pdf_header_is_not_an_image() {
        let result = ImageFormat::detect_from_bytes(b"%PDF-1.7");
        assert!(result.is_err());
    }

    #[test]
    fn test_media_type_mapping() {
        assert_eq!(ImageFormat::Png.media_type(), OUTPUT_MEDIA_TYPE);
        assert_eq!(ImageFormat::Jpeg.media_type(), "image/jpeg");
        assert_eq!(ImageFormat::WebP.media_type(), "image/webp");
    }

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("Image/HEIC"));
        assert!(!is_image_media_type("image/"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type(""));
    }
}
