//! JSON bodies exchanged on `POST /api/generateIcon`.

use serde::{Deserialize, Serialize};

use crate::asset::ImageAsset;

/// Request body for icon generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIconRequest {
    /// Subject description.
    #[serde(default)]
    pub prompt: String,
    /// Comma-separated colors, possibly empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<String>,
    /// Reference image to edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<ImageAsset>,
    /// Logo image to combine with the reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_data: Option<ImageAsset>,
}

impl GenerateIconRequest {
    /// Check that the request carries a usable prompt.
    ///
    /// # Errors
    ///
    /// Returns a message if the prompt is blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt is required".to_string());
        }
        Ok(())
    }

    /// Colors string, empty when absent.
    #[must_use]
    pub fn colors(&self) -> &str {
        self.colors.as_deref().unwrap_or_default()
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIconResponse {
    /// `data:<mime>;base64,<payload>` URL of the icon.
    pub image_url: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}
