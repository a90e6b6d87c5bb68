//! Replaying adapter for the `GenerativeModel` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::adapters::recording::generative_model::PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;
use crate::ports::generative_model::{
    ContentFuture, ContentRequest, ContentResponse, GenerativeModel, ImagesFuture,
    ImagesRequest, ImagesResponse,
};

/// Serves recorded model results from a cassette.
pub struct ReplayingGenerativeModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingGenerativeModel {
    /// Create a replaying model backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

/// Recorded errors are replayed with their original message.
fn replay_error(e: &(dyn std::error::Error + Send + Sync)) -> ImageError {
    ImageError::Server(e.to_string())
}

impl GenerativeModel for ReplayingGenerativeModel {
    fn generate_content(&self, _request: &ContentRequest) -> ContentFuture<'_> {
        let output = next_output(&self.replayer, PORT, "generate_content");
        Box::pin(async move {
            replay_result::<ContentResponse>(output?).map_err(|e| replay_error(e.as_ref()))
        })
    }

    fn generate_images(&self, _request: &ImagesRequest) -> ImagesFuture<'_> {
        let output = next_output(&self.replayer, PORT, "generate_images");
        Box::pin(async move {
            replay_result::<ImagesResponse>(output?).map_err(|e| replay_error(e.as_ref()))
        })
    }
}
