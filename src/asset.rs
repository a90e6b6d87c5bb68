//! Image assets carried inline as base64, plus the file encoder that makes them.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// A base64-encoded image with its MIME type, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Base64 payload without any `data:` prefix.
    pub data: String,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

impl ImageAsset {
    /// Encode raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Read an image file and encode it.
    ///
    /// The MIME type is sniffed from the file contents, then guessed from the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error unchanged if the file cannot be read.
    pub async fn from_file(path: &Path) -> Result<Self, ImageError> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = detect_mime_type(&bytes, path);
        Ok(Self::from_bytes(&bytes, mime_type))
    }

    /// Split a `data:<mime>;base64,<payload>` URL into an asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a base64 data URL.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::InvalidArgument("not a data URL".into()))?;
        let (mime_type, data) = rest.split_once(";base64,").ok_or_else(|| {
            ImageError::InvalidArgument("data URL is not base64-encoded".into())
        })?;
        Ok(Self { data: data.to_string(), mime_type: mime_type.to_string() })
    }

    /// Render as a `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        data_url(&self.mime_type, &self.data)
    }

    /// Decode the base64 payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| ImageError::InvalidArgument(format!("Failed to decode base64: {e}")))
    }
}

/// Build a `data:<mime>;base64,<payload>` URL.
#[must_use]
pub fn data_url(mime_type: &str, base64_payload: &str) -> String {
    format!("data:{mime_type};base64,{base64_payload}")
}

fn detect_mime_type(bytes: &[u8], path: &Path) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }
    image::ImageFormat::from_path(path)
        .map_or_else(|_| "application/octet-stream".to_string(), |f| f.to_mime_type().to_string())
}
