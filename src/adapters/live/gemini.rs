//! Live adapter for the Gemini content and Imagen predict APIs.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ImageError;
use crate::ports::generative_model::{
    ContentFuture, ContentRequest, ContentResponse, GeneratedImage, GenerativeModel,
    ImagesFuture, ImagesRequest, ImagesResponse,
};

/// Default base URL of the Gemini REST API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini client that calls the Google AI API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client that talks to a different API root.
    #[must_use]
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), api_key, base_url }
    }

    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<String, ImageError> {
        let response =
            self.client.post(url).header("x-goog-api-key", &self.api_key).json(body).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ImageError::Api {
                status: status.as_u16(),
                message: google_error_message(&response_text),
            });
        }
        Ok(response_text)
    }
}

impl GenerativeModel for GeminiClient {
    fn generate_content(&self, request: &ContentRequest) -> ContentFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/{}:generateContent", self.base_url, request.model);
            let body = serde_json::json!({
                "contents": [request.contents],
                "generationConfig": {
                    "responseModalities": request.response_modalities,
                }
            });

            let response_text = self.post(&url, &body).await?;
            serde_json::from_str::<ContentResponse>(&response_text).map_err(|e| ImageError::Api {
                status: 200,
                message: format!("Failed to parse response: {e}"),
            })
        })
    }

    fn generate_images(&self, request: &ImagesRequest) -> ImagesFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/{}:predict", self.base_url, request.model);
            let body = serde_json::json!({
                "instances": [{ "prompt": request.prompt }],
                "parameters": {
                    "sampleCount": request.number_of_images,
                    "aspectRatio": request.aspect_ratio,
                    "outputOptions": { "mimeType": request.output_mime_type },
                }
            });

            let response_text = self.post(&url, &body).await?;
            let parsed: PredictResponse = serde_json::from_str(&response_text).map_err(|e| {
                ImageError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let generated_images = parsed
                .predictions
                .into_iter()
                .map(|p| GeneratedImage {
                    image_bytes: p.bytes_base64_encoded,
                    mime_type: p.mime_type,
                })
                .collect();
            Ok(ImagesResponse { generated_images })
        })
    }
}

/// Pull `error.message` out of a Google error body, else return it truncated.
fn google_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GoogleErrorBody>(body) {
        return parsed.error.message;
    }
    if body.len() > 500 {
        let cut = (0..=500).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

// --- Imagen predict and error response types ---

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    message: String,
}
