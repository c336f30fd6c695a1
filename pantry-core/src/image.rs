//! Image payload handling for food recognition.
//!
//! Uploaded images are never decoded. Their format is sniffed from magic bytes
//! only to label the data URL handed to the vision model.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageFormat;
use thiserror::Error;

/// Allowed image formats for uploads.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Default maximum upload size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Media type assumed when the bytes match no known format.
pub const FALLBACK_MEDIA_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("No image data provided")]
    Empty,

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported image format: {0}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedFormat(String),
}

/// Raw image bytes with their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl ImageData {
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    /// Validate an uploaded payload and label it with its sniffed media type.
    pub fn from_upload(data: Vec<u8>, max_size: usize) -> Result<Self, ImageError> {
        if data.is_empty() {
            return Err(ImageError::Empty);
        }
        if data.len() > max_size {
            return Err(ImageError::TooLarge {
                size: data.len(),
                max: max_size,
            });
        }

        let media_type = detect_media_type(&data)?;
        Ok(Self::new(media_type, data))
    }

    /// Encode as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.data))
    }
}

/// Detect the media type from magic bytes.
///
/// Unrecognized bytes fall back to [`FALLBACK_MEDIA_TYPE`]; recognized formats
/// outside [`ALLOWED_FORMATS`] are rejected.
pub fn detect_media_type(data: &[u8]) -> Result<&'static str, ImageError> {
    match image::guess_format(data) {
        Ok(format) if ALLOWED_FORMATS.contains(&format) => Ok(format.to_mime_type()),
        Ok(format) => Err(ImageError::UnsupportedFormat(format!("{:?}", format))),
        Err(_) => Ok(FALLBACK_MEDIA_TYPE),
    }
}
