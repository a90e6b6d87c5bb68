//! Unified error type for icon-genie.

use thiserror::Error;

use crate::dispatch::ModeKind;

/// Errors that can occur while generating an icon.
#[derive(Debug, Error)]
pub enum ImageError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No API key configured for Gemini.
    #[error("{env_var} is not set")]
    MissingApiKey {
        /// The environment variable name.
        env_var: String,
    },

    /// The model call succeeded but carried no usable image.
    #[error("No image was returned by Gemini ({0}).")]
    NoImage(ModeKind),

    /// The icon service answered with an error body.
    #[error("{0}")]
    Server(String),
}
