//! Pet photo decoding: reads an image file and embeds it as a data URL so it
//! can be stored inline with its profile.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Failed to read photo: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported photo format: {0}")]
    UnsupportedFormat(String),
}

/// Image MIME type for a file extension, case-insensitive
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file and encode it as a `data:<mime>;base64,...` URL
pub async fn read_photo_as_data_url(path: &Path) -> Result<String, PhotoError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let mime = mime_for_extension(extension)
        .ok_or_else(|| PhotoError::UnsupportedFormat(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} byte photo from {}", bytes.len(), path.display());

    Ok(encode_data_url(mime, &bytes))
}
