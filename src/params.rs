//! Output formats and accepted upload types.

use std::fmt;
use std::str::FromStr;

use image::ImageFormat;

/// Image types the form accepts for upload.
pub const ACCEPTED_UPLOAD_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Format of the saved icon file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, the format the generate path returns.
    #[default]
    Png,
    /// No alpha channel.
    Jpeg,
    /// WebP.
    Webp,
}

impl OutputFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// MIME type of files in this format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Matching `image` crate encoder.
    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Webp => ImageFormat::WebP,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            _ => Err(format!("Unsupported format '{s}'. Valid: png, jpeg, webp")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
        })
    }
}

/// Validate that an uploaded file is one of [`ACCEPTED_UPLOAD_TYPES`].
///
/// # Errors
///
/// Returns an error naming the rejected type.
pub fn validate_upload_type(mime_type: &str) -> Result<(), String> {
    if ACCEPTED_UPLOAD_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported image type '{mime_type}'. Valid: {}",
            ACCEPTED_UPLOAD_TYPES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("jpg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("webp".parse::<OutputFormat>(), Ok(OutputFormat::Webp));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "bmp".parse::<OutputFormat>().unwrap_err();
        assert!(err.starts_with("Unsupported format 'bmp'"));
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn jpeg_uses_short_extension() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Jpeg.to_string(), "jpeg");
        assert_eq!(OutputFormat::Webp.mime_type(), "image/webp");
    }

    #[test]
    fn upload_types() {
        for accepted in ACCEPTED_UPLOAD_TYPES {
            assert!(validate_upload_type(accepted).is_ok());
        }
        let err = validate_upload_type("image/gif").unwrap_err();
        assert!(err.contains("image/gif"));
        assert!(validate_upload_type("application/octet-stream").is_err());
    }
}
