//! # VocabBuilder TUI
//!
//! A terminal client for an English-Bangla vocabulary service.
//!
//! ## Features
//! - Browse all words with their Bangla meaning
//! - Save words and review them grouped by the day they were saved
//! - Search by English term
//! - Practice saved words by writing example sentences
//! - Add new words
//! - Pronunciation through the platform's speech program
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;
pub mod speech;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use models::{Catalog, SavedEntry, Sentence, Word};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, ApiError, NetworkActor};
