//! Edit-vs-generate dispatch and response unwrapping.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::asset::{data_url, ImageAsset};
use crate::error::ImageError;
use crate::ports::generative_model::{
    Content, ContentRequest, ContentResponse, ImagesRequest, Modality, Part,
};
use crate::ports::GenerativeModel;
use crate::prompt::DesignInstruction;
use crate::request::{GenerateIconRequest, GenerateIconResponse};

/// Multimodal model used to edit or combine images.
pub const EDIT_MODEL: &str = "gemini-2.5-flash-image";

/// Dedicated text-to-image model.
pub const GENERATE_MODEL: &str = "imagen-4.0-generate-001";

const GENERATED_MIME_TYPE: &str = "image/png";
const GENERATED_ASPECT_RATIO: &str = "1:1";

/// Which generation path a request takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Images plus instructions to a multimodal model.
    Edit,
    /// Text-only instructions to an image model.
    Generate,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => f.write_str("edit mode"),
            Self::Generate => f.write_str("generate mode"),
        }
    }
}

/// A generation path together with the images it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode<'a> {
    /// No images: create from text alone.
    Generate,
    /// Edit the given images, ordered reference first, then logo.
    Edit(Vec<&'a ImageAsset>),
}

impl<'a> GenerationMode<'a> {
    /// Select the mode from which images are present.
    ///
    /// Any image at all means edit mode, even a lone reference that the user
    /// meant as a style hint.
    #[must_use]
    pub fn select(reference: Option<&'a ImageAsset>, logo: Option<&'a ImageAsset>) -> Self {
        let images: Vec<&ImageAsset> = reference.into_iter().chain(logo).collect();
        if images.is_empty() {
            Self::Generate
        } else {
            Self::Edit(images)
        }
    }

    /// The label of this mode.
    #[must_use]
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Generate => ModeKind::Generate,
            Self::Edit(_) => ModeKind::Edit,
        }
    }
}

/// Turns design instructions into a single image data URL.
pub struct Dispatcher {
    model: Arc<dyn GenerativeModel>,
}

impl Dispatcher {
    /// Create a dispatcher over the given model.
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Build the design instruction for a request and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns an error if the model call fails or yields no image.
    pub async fn generate_icon(
        &self,
        request: &GenerateIconRequest,
    ) -> Result<GenerateIconResponse, ImageError> {
        let instruction = DesignInstruction::build(&request.prompt, request.colors());
        let image_url = self
            .dispatch(&instruction, request.image_data.as_ref(), request.logo_data.as_ref())
            .await?;
        Ok(GenerateIconResponse { image_url })
    }

    /// Call the model in edit or generate mode and return a data URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the model call fails or yields no image.
    pub async fn dispatch(
        &self,
        instruction: &DesignInstruction,
        reference: Option<&ImageAsset>,
        logo: Option<&ImageAsset>,
    ) -> Result<String, ImageError> {
        let mode = GenerationMode::select(reference, logo);
        info!(mode = %mode.kind(), "Dispatching icon request");
        let instruction_json = instruction.to_pretty_json();

        match mode {
            GenerationMode::Edit(images) => self.edit(&images, &instruction_json).await,
            GenerationMode::Generate => self.generate(&instruction_json).await,
        }
    }

    async fn edit(
        &self,
        images: &[&ImageAsset],
        instruction_json: &str,
    ) -> Result<String, ImageError> {
        let mut parts: Vec<Part> = images
            .iter()
            .map(|img| Part::inline(img.mime_type.clone(), img.data.clone()))
            .collect();
        parts.push(Part::text(format!(
            "Use this JSON as your design instruction: {instruction_json}"
        )));

        let request = ContentRequest {
            model: EDIT_MODEL.to_string(),
            contents: Content { parts },
            response_modalities: vec![Modality::Image, Modality::Text],
        };
        let response = self.model.generate_content(&request).await?;
        let image = first_inline_image(&response).ok_or(ImageError::NoImage(ModeKind::Edit))?;
        debug!(mime_type = %image.mime_type, "Edited image received");
        Ok(image.to_data_url())
    }

    async fn generate(&self, instruction_json: &str) -> Result<String, ImageError> {
        let request = ImagesRequest {
            model: GENERATE_MODEL.to_string(),
            prompt: format!(
                "Create an icon using the following JSON design structure:\n{instruction_json}"
            ),
            number_of_images: 1,
            output_mime_type: GENERATED_MIME_TYPE.to_string(),
            aspect_ratio: GENERATED_ASPECT_RATIO.to_string(),
        };
        let response = self.model.generate_images(&request).await?;
        let bytes = response
            .generated_images
            .first()
            .and_then(|img| img.image_bytes.as_deref())
            .filter(|b| !b.is_empty())
            .ok_or(ImageError::NoImage(ModeKind::Generate))?;
        debug!(len = bytes.len(), "Generated image received");
        Ok(data_url(GENERATED_MIME_TYPE, bytes))
    }
}

/// The first inline-data part of the first candidate.
fn first_inline_image(response: &ContentResponse) -> Option<ImageAsset> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .find_map(|part| part.inline_data.as_ref())
        .map(|inline| ImageAsset {
            data: inline.data.clone(),
            mime_type: inline.mime_type.clone(),
        })
}
