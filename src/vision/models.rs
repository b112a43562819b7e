// Upload types and validation

use crate::error::{DetectorError, Result};
use bytes::Bytes;

/// Hard ceiling on upload size, matching the Gemini inline-data limit.
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024;

/// An image as received from the HTTP caller.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied filename, if any.
    pub filename: Option<String>,
    /// Content type declared in the multipart field.
    declared_mime: Option<String>,
    /// Raw bytes exactly as uploaded.
    pub data: Bytes,
}

impl UploadedImage {
    pub fn new(filename: Option<String>, declared_mime: Option<String>, data: Bytes) -> Self {
        Self {
            filename,
            declared_mime,
            data,
        }
    }

    /// MIME type forwarded to the model: the declared type when present,
    /// otherwise sniffed from magic bytes, otherwise `image/jpeg`.
    pub fn mime_type(&self) -> String {
        self.declared_mime
            .clone()
            .or_else(|| detect_format(&self.data).map(|f| f.mime_type().to_string()))
            .unwrap_or_else(|| "image/jpeg".to_string())
    }

    /// Require a declared `image/*` content type.
    ///
    /// Only the freeform endpoint enforces this; the structured endpoint
    /// trusts the decode check instead.
    pub fn ensure_declared_image(&self) -> Result<()> {
        match &self.declared_mime {
            Some(ct) if ct.starts_with("image/") => Ok(()),
            _ => Err(DetectorError::InvalidInput(
                "Uploaded file must have an image content type".to_string(),
            )),
        }
    }

    /// Check that the payload is a non-empty, decodable raster image.
    ///
    /// Decoding is for validation only; the original bytes stay untouched.
    pub fn validate(&self, max_bytes: usize) -> Result<()> {
        if self.data.is_empty() {
            return Err(DetectorError::InvalidInput("Empty file".to_string()));
        }
        let limit = max_bytes.min(MAX_IMAGE_SIZE_BYTES);
        if self.data.len() > limit {
            return Err(DetectorError::InvalidInput(format!(
                "Image size {} bytes exceeds maximum of {} bytes",
                self.data.len(),
                limit
            )));
        }
        image::load_from_memory(&self.data).map_err(|e| {
            DetectorError::InvalidInput(format!("Uploaded file is not a valid image: {e}"))
        })?;
        Ok(())
    }
}

/// Image formats the service recognizes by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }
}

/// Detect format from magic bytes at the start of image data
pub fn detect_format(data: &[u8]) -> Option<ImageFormat> {
    if data.len() < 12 {
        return None;
    }

    if data.starts_with(b"\xFF\xD8\xFF") {
        Some(ImageFormat::Jpeg)
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageFormat::Png)
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some(ImageFormat::Gif)
    } else if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
        Some(ImageFormat::WebP)
    } else {
        None
    }
}
