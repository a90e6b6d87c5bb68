//! HTTP client for a running icon-genie server.

use reqwest::Client;

use crate::error::ImageError;
use crate::request::{ErrorResponse, GenerateIconRequest, GenerateIconResponse};

const FALLBACK_ERROR: &str = "Failed to generate image.";

/// Calls `POST /api/generateIcon` and returns the icon's data URL.
pub struct IconClient {
    client: Client,
    endpoint: String,
}

impl IconClient {
    /// Create a client for the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }

    /// Submit a request and return the `imageUrl` from the response.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Server`] with the server's message on a non-2xx
    /// status, or a network error if the request cannot be sent.
    pub async fn generate_icon(&self, request: &GenerateIconRequest) -> Result<String, ImageError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            return Err(ImageError::Server(message));
        }

        let parsed: GenerateIconResponse = serde_json::from_str(&body).map_err(|e| ImageError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse response: {e}"),
        })?;
        Ok(parsed.image_url)
    }
}
