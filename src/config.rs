//! Configuration loading
//!
//! Config file location: ~/.vocab-tui/config.yaml. A missing file means
//! defaults; `VOCAB_API_URL` overrides the API URL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_LOG_FILE,
    DEFAULT_SPEECH_LANGUAGE, DEFAULT_SPEECH_RATE, PREFERRED_VOICES,
};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    /// No client-side timeout unless set
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    pub speech: SpeechConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            request_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            speech: SpeechConfig::default(),
        }
    }
}

/// Text-to-speech settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub backend: SpeechBackendChoice,
    pub language: String,
    pub rate: f32,
    pub preferred_voices: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfig {
            enabled: true,
            backend: SpeechBackendChoice::Auto,
            language: String::from(DEFAULT_SPEECH_LANGUAGE),
            rate: DEFAULT_SPEECH_RATE,
            preferred_voices: PREFERRED_VOICES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Which speech program to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SpeechBackendChoice {
    #[default]
    Auto,
    Say,
    EspeakNg,
    Espeak,
    SpdSay,
}

impl Config {
    /// Default config file path
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path())?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url_override(&url);
        }
        Ok(config)
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        // An empty file parses as YAML null
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn apply_api_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api_url = url.to_string();
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api_url: http://vocab.local/api\nspeech:\n  backend: espeak-ng\n  rate: 1.2\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "http://vocab.local/api");
        assert_eq!(config.speech.backend, SpeechBackendChoice::EspeakNg);
        assert_eq!(config.speech.rate, 1.2);
        assert_eq!(config.speech.language, DEFAULT_SPEECH_LANGUAGE);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_url: [unterminated").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.request_timeout_secs = Some(15);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let mut config = Config::default();
        config.apply_api_url_override("   ");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        config.apply_api_url_override("http://10.0.0.2:8080/api");
        assert_eq!(config.api_url, "http://10.0.0.2:8080/api");
    }
}
