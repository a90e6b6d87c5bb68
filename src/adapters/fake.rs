//! Scripted in-memory model for unit tests.

use std::sync::Mutex;

use crate::asset::ImageAsset;
use crate::error::ImageError;
use crate::ports::generative_model::{
    Candidate, Content, ContentFuture, ContentRequest, ContentResponse, GeneratedImage,
    GenerativeModel, ImagesFuture, ImagesRequest, ImagesResponse, Part,
};

enum Script {
    Parts(Vec<Part>),
    Image(ImageAsset),
    Empty,
    Fail(String),
}

/// Answers every call from a fixed script and remembers the requests.
pub struct FakeModel {
    script: Script,
    content_calls: Mutex<Vec<ContentRequest>>,
    image_calls: Mutex<Vec<ImagesRequest>>,
}

impl FakeModel {
    fn with(script: Script) -> Self {
        Self { script, content_calls: Mutex::default(), image_calls: Mutex::default() }
    }

    /// Both endpoints return this image.
    pub fn returning_image(image: ImageAsset) -> Self {
        Self::with(Script::Image(image))
    }

    /// Content calls return these parts; image calls return nothing.
    pub fn returning_parts(parts: Vec<Part>) -> Self {
        Self::with(Script::Parts(parts))
    }

    /// Both endpoints succeed with no image.
    pub fn empty() -> Self {
        Self::with(Script::Empty)
    }

    /// Both endpoints fail with this message.
    pub fn failing(message: &str) -> Self {
        Self::with(Script::Fail(message.to_string()))
    }

    /// Recorded `generate_content` requests.
    pub fn content_calls(&self) -> Vec<ContentRequest> {
        self.content_calls.lock().unwrap().clone()
    }

    /// Recorded `generate_images` requests.
    pub fn image_calls(&self) -> Vec<ImagesRequest> {
        self.image_calls.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<ImageError> {
        match &self.script {
            Script::Fail(message) => {
                Some(ImageError::Api { status: 429, message: message.clone() })
            }
            _ => None,
        }
    }
}

impl GenerativeModel for FakeModel {
    fn generate_content(&self, request: &ContentRequest) -> ContentFuture<'_> {
        self.content_calls.lock().unwrap().push(request.clone());
        let result = match self.failure() {
            Some(err) => Err(err),
            None => {
                let parts = match &self.script {
                    Script::Parts(parts) => parts.clone(),
                    Script::Image(img) => {
                        vec![Part::inline(img.mime_type.clone(), img.data.clone())]
                    }
                    Script::Empty | Script::Fail(_) => Vec::new(),
                };
                Ok(ContentResponse {
                    candidates: vec![Candidate { content: Some(Content { parts }) }],
                })
            }
        };
        Box::pin(async move { result })
    }

    fn generate_images(&self, request: &ImagesRequest) -> ImagesFuture<'_> {
        self.image_calls.lock().unwrap().push(request.clone());
        let result = match self.failure() {
            Some(err) => Err(err),
            None => {
                let generated_images = match &self.script {
                    Script::Image(img) => vec![GeneratedImage {
                        image_bytes: Some(img.data.clone()),
                        mime_type: Some(img.mime_type.clone()),
                    }],
                    _ => Vec::new(),
                };
                Ok(ImagesResponse { generated_images })
            }
        };
        Box::pin(async move { result })
    }
}
