//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Base URL of the vocabulary API
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the configured API URL
pub const API_URL_ENV: &str = "VOCAB_API_URL";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "vocab-tui.log";

/// Name of the directory under `$HOME` holding the config file
pub const CONFIG_DIR_NAME: &str = ".vocab-tui";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Language tag handed to the speech engine
pub const DEFAULT_SPEECH_LANGUAGE: &str = "en-US";

/// Speech rate relative to the engine's normal speed
pub const DEFAULT_SPEECH_RATE: f32 = 0.9;

/// Voices picked when available, matched by name substring
pub const PREFERRED_VOICES: &[&str] = &["Google US English", "Samantha"];

/// Application name
pub const APP_NAME: &str = "VocabBuilder";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
