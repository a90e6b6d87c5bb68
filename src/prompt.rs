//! Structured design instruction sent to the model alongside any images.

use serde::Serialize;

/// Palette used when the user gives no colors.
pub const DEFAULT_PALETTE: [&str; 6] = ["green", "white", "black", "yellow", "red", "blue"];

const STYLE: &str = "3D realistic, glossy, professional, icon design";
const LIGHTING: &str = "studio soft light, realistic reflections";
const BACKGROUND: &str = "simple gradient or solid neutral tone";
const FORMAT: &str = "high resolution, transparent background if possible";

/// Design instruction describing the icon to render.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignInstruction {
    /// The user's subject description.
    pub prompt: String,
    /// Visual style.
    pub style: String,
    /// Lighting setup.
    pub lighting: String,
    /// Ordered color palette.
    pub color_palette: Vec<String>,
    /// Background treatment.
    pub background: String,
    /// Output format hints.
    pub format: String,
}

impl DesignInstruction {
    /// Build the instruction from a prompt and a comma-separated color list.
    #[must_use]
    pub fn build(prompt: &str, colors: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            style: STYLE.to_string(),
            lighting: LIGHTING.to_string(),
            color_palette: parse_colors(colors),
            background: BACKGROUND.to_string(),
            format: FORMAT.to_string(),
        }
    }

    /// Pretty-printed JSON, as embedded in the model prompt.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        // Only strings and a Vec<String>: serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Split a comma-separated color list, falling back to [`DEFAULT_PALETTE`]
/// when the input is empty.
#[must_use]
pub fn parse_colors(colors: &str) -> Vec<String> {
    if colors.is_empty() {
        return DEFAULT_PALETTE.iter().map(ToString::to_string).collect();
    }
    colors.split(',').map(str::trim).filter(|c| !c.is_empty()).map(String::from).collect()
}
