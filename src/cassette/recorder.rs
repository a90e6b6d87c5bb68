//! Accumulates interactions and saves them as a cassette.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};
use crate::error::ImageError;

/// Collects port interactions for one recording session.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Start a session that saves to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), cassette: Cassette::new(name, commit) }
    }

    /// Append an interaction, numbering it after the ones already held.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Interactions recorded so far.
    #[cfg(test)]
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.cassette.interactions
    }

    /// Save everything recorded so far.
    ///
    /// Takes `&self` because a running server still holds the recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(&self) -> Result<PathBuf, ImageError> {
        let mut cassette = self.cassette.clone();
        cassette.recorded_at = Utc::now();
        cassette.write(&self.path)?;
        Ok(self.path.clone())
    }
}
