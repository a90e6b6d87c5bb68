//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::gemini::GEMINI_API_BASE;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Settings for `generate` when it talks to a server.
    #[serde(default)]
    pub client: ClientConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Gemini API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL of the models endpoint.
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self { base_url: GEMINI_API_BASE.to_string() }
    }
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub listen: String,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: "127.0.0.1:3000".to_string(), max_body_bytes: 20 * 1024 * 1024 }
    }
}

/// Client settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { endpoint: "http://127.0.0.1:3000/api/generateIcon".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring the environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        let present = |k: &String| !k.trim().is_empty();
        std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(present)
            .or_else(|| self.keys.gemini.clone().filter(present))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `ICON_GENIE_CONFIG` environment variable
/// 3. `~/.config/icon-genie/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("ICON_GENIE_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/icon-genie/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/icon-genie/config.toml")
    } else {
        PathBuf::from("icon-genie.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.gemini.is_none());
        assert_eq!(config.gemini.base_url, GEMINI_API_BASE);
        assert_eq!(config.server.listen, "127.0.0.1:3000");
        assert_eq!(config.server.max_body_bytes, 20 * 1024 * 1024);
        assert_eq!(config.client.endpoint, "http://127.0.0.1:3000/api/generateIcon");
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:3000");
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("icon_genie_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
gemini = "test-gemini-key"

[gemini]
base_url = "http://localhost:9999/models"

[server]
listen = "0.0.0.0:8080"
max_body_bytes = 1024

[client]
endpoint = "http://icons.internal/api/generateIcon"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.gemini.as_deref(), Some("test-gemini-key"));
        assert_eq!(config.gemini.base_url, "http://localhost:9999/models");
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.server.max_body_bytes, 1024);
        assert_eq!(config.client.endpoint, "http://icons.internal/api/generateIcon");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = toml::from_str("[server]\nlisten = \"0.0.0.0:80\"\n").unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:80");
        assert_eq!(config.server.max_body_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("icon_genie_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn gemini_key_from_file() {
        let config = Config {
            keys: KeysConfig { gemini: Some("from-file".into()) },
            ..Config::default()
        };

        // Without env var, returns file value
        std::env::remove_var(GEMINI_API_KEY_ENV);
        assert_eq!(config.gemini_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
