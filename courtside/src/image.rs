//! Court-diagram encoding for vision requests.
//!
//! Vision models accept images as `data:` URIs. Files are read as raw bytes
//! and base64-encoded; no decoding or resizing happens here.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::Result;

/// MIME type used when none can be guessed.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Encode raw image bytes as a `data:` URI.
#[must_use]
pub fn encode_image_bytes(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file and encode it as a `data:` URI.
///
/// The MIME type is guessed from the extension, falling back to PNG.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub async fn encode_image_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map_or_else(|| DEFAULT_IMAGE_MIME.to_owned(), |mime| mime.to_string());
    debug!(path = %path.display(), bytes = bytes.len(), %mime, "encoded image");
    Ok(encode_image_bytes(&bytes, &mime))
}

/// Turn a client-supplied image payload into something a vision model accepts.
///
/// Blank input yields `None`. `data:` URIs and http(s) URLs pass through
/// trimmed; anything else is taken as bare base64 of a PNG.
#[must_use]
pub fn normalize_image_payload(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("data:")
        || trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
    {
        return Some(trimmed.to_owned());
    }
    Some(format!("data:{DEFAULT_IMAGE_MIME};base64,{trimmed}"))
}
