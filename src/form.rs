//! Icon form state: input modes, submit gating, and file encoding.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::warn;

use crate::asset::ImageAsset;
use crate::error::ImageError;
use crate::params::validate_upload_type;
use crate::request::GenerateIconRequest;

/// The two mutually exclusive ways of describing an icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputMode {
    /// Describe the icon in text, optionally with a style reference.
    #[default]
    Text,
    /// Edit a reference image, optionally combining a logo.
    Edit,
}

/// Inputs collected before submission.
#[derive(Debug, Clone, Default)]
pub struct IconForm {
    mode: InputMode,
    /// Subject description.
    pub prompt: String,
    /// Comma-separated colors.
    pub colors: String,
    /// Reference image file.
    pub reference: Option<PathBuf>,
    /// Logo image file, only sent in edit mode.
    pub logo: Option<PathBuf>,
}

impl IconForm {
    /// An empty form in the given mode.
    #[must_use]
    pub fn new(mode: InputMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Current input mode.
    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch modes. Switching to a different mode clears every input.
    pub fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            *self = Self::new(mode);
        }
    }

    /// Check the inputs, explaining what is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt is blank, or if edit mode has no
    /// reference image.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.prompt.trim().is_empty() {
            return Err(ImageError::InvalidArgument("A prompt is required".into()));
        }
        if self.mode == InputMode::Edit && self.reference.is_none() {
            return Err(ImageError::InvalidArgument(
                "Edit mode requires a reference image (--reference)".into(),
            ));
        }
        Ok(())
    }

    /// Validate the form and encode its files into a request.
    ///
    /// The reference is encoded before the logo starts.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or a file cannot be read or is
    /// not an accepted image type.
    pub async fn submit(&self) -> Result<GenerateIconRequest, ImageError> {
        self.validate()?;

        let logo = match (self.mode, &self.logo) {
            (InputMode::Edit, Some(path)) => Some(path.as_path()),
            (InputMode::Text, Some(path)) => {
                warn!("Ignoring logo {} outside edit mode", path.display());
                None
            }
            (_, None) => None,
        };

        let image_data = match &self.reference {
            Some(path) => Some(encode_upload(path).await?),
            None => None,
        };
        let logo_data = match logo {
            Some(path) => Some(encode_upload(path).await?),
            None => None,
        };

        Ok(GenerateIconRequest {
            prompt: self.prompt.trim().to_string(),
            colors: Some(self.colors.clone()),
            image_data,
            logo_data,
        })
    }
}

async fn encode_upload(path: &Path) -> Result<ImageAsset, ImageError> {
    let asset = ImageAsset::from_file(path).await?;
    validate_upload_type(&asset.mime_type)
        .map_err(|e| ImageError::InvalidArgument(format!("{}: {e}", path.display())))?;
    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("icon_genie_form_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        image::DynamicImage::new_rgb8(1, 1)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn blank_prompt_blocks_submit() {
        let mut form = IconForm::new(InputMode::Text);
        assert!(form.validate().is_err());
        form.prompt = "   ".into();
        assert!(form.validate().is_err());
        form.prompt = "a robot".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn edit_mode_requires_reference() {
        let mut form = IconForm::new(InputMode::Edit);
        form.prompt = "combine these".into();
        assert!(form.validate().unwrap_err().to_string().contains("reference image"));
        form.reference = Some(PathBuf::from("ref.png"));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn switching_mode_clears_inputs() {
        let mut form = IconForm::new(InputMode::Text);
        form.prompt = "a robot".into();
        form.colors = "red".into();
        form.reference = Some(PathBuf::from("ref.png"));

        form.set_mode(InputMode::Text);
        assert_eq!(form.prompt, "a robot");

        form.set_mode(InputMode::Edit);
        assert_eq!(form.mode(), InputMode::Edit);
        assert!(form.prompt.is_empty());
        assert!(form.colors.is_empty());
        assert!(form.reference.is_none());
        assert!(form.logo.is_none());
    }

    #[tokio::test]
    async fn submit_encodes_reference_and_logo_in_edit_mode() {
        let mut form = IconForm::new(InputMode::Edit);
        form.prompt = "  combine these ".into();
        form.colors = "gold, navy blue".into();
        form.reference = Some(png_file("edit_ref.png"));
        form.logo = Some(png_file("edit_logo.png"));

        let request = form.submit().await.unwrap();
        assert_eq!(request.prompt, "combine these");
        assert_eq!(request.colors(), "gold, navy blue");
        assert_eq!(request.image_data.unwrap().mime_type, "image/png");
        assert_eq!(request.logo_data.unwrap().mime_type, "image/png");
    }

    #[tokio::test]
    async fn text_mode_drops_logo_keeps_reference() {
        let mut form = IconForm::new(InputMode::Text);
        form.prompt = "a robot".into();
        form.reference = Some(png_file("text_ref.png"));
        form.logo = Some(png_file("text_logo.png"));

        let request = form.submit().await.unwrap();
        assert!(request.image_data.is_some());
        assert!(request.logo_data.is_none());
    }

    #[tokio::test]
    async fn unreadable_reference_fails_submit() {
        let mut form = IconForm::new(InputMode::Edit);
        form.prompt = "x".into();
        form.reference = Some(PathBuf::from("/nonexistent/ref.png"));
        assert!(matches!(form.submit().await.unwrap_err(), ImageError::Io(_)));
    }

    #[tokio::test]
    async fn non_image_upload_rejected() {
        let dir = std::env::temp_dir().join("icon_genie_form_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let mut form = IconForm::new(InputMode::Edit);
        form.prompt = "x".into();
        form.reference = Some(path);
        let err = form.submit().await.unwrap_err();
        assert!(err.to_string().contains("Unsupported image type"));
    }
}
