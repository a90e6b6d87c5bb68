//! Recording adapter for the `GenerativeModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::generative_model::{
    ContentFuture, ContentRequest, GenerativeModel, ImagesFuture, ImagesRequest,
};

/// Port name used for cassette interactions.
pub const PORT: &str = "generative_model";

/// Records model interactions while delegating to an inner implementation.
pub struct RecordingGenerativeModel {
    inner: Arc<dyn GenerativeModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGenerativeModel {
    /// Creates a new recording model wrapping the given implementation.
    pub fn new(inner: Arc<dyn GenerativeModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl GenerativeModel for RecordingGenerativeModel {
    fn generate_content(&self, request: &ContentRequest) -> ContentFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_content(&request_clone).await;
            record_result(&recorder, PORT, "generate_content", &request_clone, &result);
            result
        })
    }

    fn generate_images(&self, request: &ImagesRequest) -> ImagesFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_images(&request_clone).await;
            record_result(&recorder, PORT, "generate_images", &request_clone, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::FakeModel;
    use crate::asset::ImageAsset;

    #[tokio::test]
    async fn records_both_methods_in_order() {
        let path = std::env::temp_dir().join("icon_genie_recording_test/cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec", "abc")));
        let inner = Arc::new(FakeModel::returning_image(ImageAsset {
            data: "UE5H".into(),
            mime_type: "image/png".into(),
        }));
        let model = RecordingGenerativeModel::new(inner, Arc::clone(&recorder));

        let images = ImagesRequest {
            model: "imagen".into(),
            prompt: "p".into(),
            number_of_images: 1,
            output_mime_type: "image/png".into(),
            aspect_ratio: "1:1".into(),
        };
        model.generate_images(&images).await.unwrap();
        let content = ContentRequest {
            model: "gemini".into(),
            contents: crate::ports::generative_model::Content::default(),
            response_modalities: Vec::new(),
        };
        model.generate_content(&content).await.unwrap();

        let guard = recorder.lock().unwrap();
        let interactions = guard.interactions();
        assert_eq!(interactions.len(), 2);
        assert_eq!(interactions[0].method, "generate_images");
        assert_eq!(interactions[0].output["Ok"]["generated_images"][0]["image_bytes"], "UE5H");
        assert_eq!(interactions[1].method, "generate_content");
        assert_eq!(interactions[1].port, PORT);
    }
}
