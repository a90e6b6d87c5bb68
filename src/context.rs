//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::adapters::live::gemini::GeminiClient;
use crate::adapters::recording::generative_model::RecordingGenerativeModel;
use crate::adapters::replaying::generative_model::ReplayingGenerativeModel;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::{Config, GEMINI_API_KEY_ENV};
use crate::error::ImageError;
use crate::ports::GenerativeModel;

/// Environment variable naming a cassette to replay instead of calling the API.
pub const REPLAY_ENV: &str = "ICON_GENIE_REPLAY";

/// Environment variable that turns on cassette recording.
pub const RECORD_ENV: &str = "ICON_GENIE_REC";

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Generative model port.
    pub model: Arc<dyn GenerativeModel>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, ImageError> {
        let recorder = self
            .recorder
            .lock()
            .map_err(|e| ImageError::Config(format!("Recorder lock poisoned: {e}")))?;
        recorder.finish()
    }
}

impl ServiceContext {
    /// Create a live context that calls the Gemini API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(config: &Config) -> Result<Self, ImageError> {
        let key = config
            .gemini_key()
            .ok_or_else(|| ImageError::MissingApiKey { env_var: GEMINI_API_KEY_ENV.into() })?;
        let model: Arc<dyn GenerativeModel> =
            Arc::new(GeminiClient::with_base_url(key, config.gemini.base_url.clone()));
        Ok(Self { model })
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), ImageError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = PathBuf::from(".icon-genie/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("generative_model.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-generative_model"),
            &commit,
        )));

        let model = Arc::new(RecordingGenerativeModel::new(live_ctx.model, Arc::clone(&recorder)));

        Ok((Self { model }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::from_file(path)?));
        let model = Arc::new(ReplayingGenerativeModel::new(replayer));
        Ok(Self { model })
    }

    /// Pick replaying, recording or live mode from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen mode cannot be set up.
    pub fn from_env(config: &Config) -> Result<(Self, Option<RecordingSession>), ImageError> {
        if let Ok(cassette_path) = std::env::var(REPLAY_ENV) {
            info!("Replaying from: {cassette_path}");
            return Ok((Self::replaying(Path::new(&cassette_path))?, None));
        }

        let is_recording = std::env::var(RECORD_ENV).is_ok_and(|v| v == "true" || v == "1");
        if is_recording {
            info!("Recording mode enabled");
            let (ctx, session) = Self::recording(config)?;
            return Ok((ctx, Some(session)));
        }

        Ok((Self::live(config)?, None))
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
