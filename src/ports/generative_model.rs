//! Generative model port for the Gemini content and Imagen APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Output modality requested from a multimodal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    /// Image output.
    Image,
    /// Text output.
    Text,
}

/// Inline binary data inside a content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload.
    pub mime_type: String,
    /// Base64 payload.
    pub data: String,
}

/// One part of a multimodal message: text or inline data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline image content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    /// An inline-data part.
    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
        }
    }
}

/// An ordered list of parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// The parts, in order.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A multimodal `generateContent` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The message content.
    pub contents: Content,
    /// Requested output modalities.
    pub response_modalities: Vec<Modality>,
}

/// A candidate answer from a multimodal model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate content. Absent when the candidate was blocked.
    #[serde(default)]
    pub content: Option<Content>,
}

/// Response to a [`ContentRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Candidate answers.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A text-to-image request for a dedicated image model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesRequest {
    /// Model identifier (e.g., `"imagen-4.0-generate-001"`).
    pub model: String,
    /// Text prompt.
    pub prompt: String,
    /// Number of images to generate.
    pub number_of_images: u32,
    /// Output MIME type.
    pub output_mime_type: String,
    /// Aspect ratio (e.g., `"1:1"`).
    pub aspect_ratio: String,
}

/// A single generated image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Base64 image bytes. Absent when the image was filtered.
    #[serde(default)]
    pub image_bytes: Option<String>,
    /// MIME type reported by the API.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Response to an [`ImagesRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesResponse {
    /// The generated images.
    #[serde(default)]
    pub generated_images: Vec<GeneratedImage>,
}

/// Boxed future returned by [`GenerativeModel::generate_content`].
pub type ContentFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ContentResponse, ImageError>> + Send + 'a>>;

/// Boxed future returned by [`GenerativeModel::generate_images`].
pub type ImagesFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImagesResponse, ImageError>> + Send + 'a>>;

/// A hosted generative model that can edit images and create new ones.
pub trait GenerativeModel: Send + Sync {
    /// Submit multimodal content and receive image-bearing candidates.
    fn generate_content(&self, request: &ContentRequest) -> ContentFuture<'_>;

    /// Submit a text prompt and receive generated image bytes.
    fn generate_images(&self, request: &ImagesRequest) -> ImagesFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_uses_gemini_field_names() {
        let json = serde_json::to_value(Part::inline("image/png", "AAAA")).unwrap();
        let expected = serde_json::json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}});
        assert_eq!(json, expected);

        let json = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hi"}));
    }

    #[test]
    fn modalities_serialize_uppercase() {
        let json = serde_json::to_string(&[Modality::Image, Modality::Text]).unwrap();
        assert_eq!(json, r#"["IMAGE","TEXT"]"#);
    }

    #[test]
    fn content_response_tolerates_missing_fields() {
        let response: ContentResponse = serde_json::from_str(r#"{"candidates":[{}]}"#).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert!(response.candidates[0].content.is_none());

        let response: ContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn images_response_tolerates_filtered_image() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"generated_images":[{"mime_type":"image/png"}]}"#).unwrap();
        assert!(response.generated_images[0].image_bytes.is_none());
    }
}
