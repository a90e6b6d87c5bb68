//! On-disk cassette format.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in call order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Sequence number across the whole cassette.
    pub seq: u64,
    /// Port name (e.g., `"generative_model"`).
    pub port: String,
    /// Method name (e.g., `"generate_images"`).
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized `{"Ok": ..}` or `{"Err": ".."}` result.
    pub output: serde_json::Value,
}

impl Cassette {
    /// An empty cassette stamped with the current time.
    pub fn new(name: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Read a YAML cassette.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Config`] if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self, ImageError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ImageError::Config(format!("Failed to read cassette {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ImageError::Config(format!("Failed to parse cassette {}: {e}", path.display()))
        })
    }

    /// Write as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<(), ImageError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| ImageError::Config(format!("Failed to serialize cassette: {e}")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, yaml)?;
        Ok(())
    }
}
