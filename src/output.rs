//! Saving generated icons to disk.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::asset::ImageAsset;
use crate::error::ImageError;
use crate::params::OutputFormat;

const MAX_SLUG_LEN: usize = 50;

/// `<prompt-slug>-<timestamp>.<ext>` for the given prompt.
#[must_use]
pub fn auto_filename(prompt: &str, format: OutputFormat) -> String {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    format!("{}-{stamp}.{}", slug(prompt, MAX_SLUG_LEN), format.extension())
}

/// Lowercase kebab-case of the ASCII alphanumeric words in `input`, cut at a
/// word boundary within `max_len`. Falls back to `icon`.
#[must_use]
pub fn slug(input: &str, max_len: usize) -> String {
    let mut out = String::new();
    for word in input.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        let needed = word.len() + usize::from(!out.is_empty());
        if out.len() + needed > max_len {
            if out.is_empty() {
                out.extend(word.chars().take(max_len));
            }
            break;
        }
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        "icon".to_string()
    } else {
        out.to_ascii_lowercase()
    }
}

/// `explicit` if given, otherwise an auto-generated name in the current directory.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, prompt: &str, format: OutputFormat) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(auto_filename(prompt, format)), PathBuf::from)
}

/// Decode an icon data URL and write it as `format`.
///
/// Bytes already in the requested format are written untouched; anything
/// else is decoded and re-encoded.
///
/// # Errors
///
/// Returns an error if the URL is not a base64 data URL, the image cannot be
/// converted, or the file cannot be written.
pub fn save_icon(image_url: &str, format: OutputFormat, path: &Path) -> Result<(), ImageError> {
    let asset = ImageAsset::from_data_url(image_url)?;
    let bytes = asset.decode()?;

    if asset.mime_type == format.mime_type() {
        std::fs::write(path, bytes)?;
        return Ok(());
    }

    debug!(from = %asset.mime_type, to = %format, "Converting icon");
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to decode image: {e}")))?;
    let decoded = match format {
        OutputFormat::Jpeg => image::DynamicImage::ImageRgb8(decoded.to_rgb8()),
        OutputFormat::Png | OutputFormat::Webp => decoded,
    };
    decoded
        .save_with_format(path, format.image_format())
        .map_err(|e| ImageError::ImageConversion(format!("Failed to save as {format}: {e}")))
}
