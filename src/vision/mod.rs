//! Upload handling and image validation.
//!
//! An upload is kept as the caller sent it: the bytes that pass validation
//! here are the bytes forwarded to the model, never a re-encode. Validation
//! proves the payload is a decodable raster image and nothing more.

pub mod models;

pub use models::{detect_format, ImageFormat, UploadedImage, MAX_IMAGE_SIZE_BYTES};
