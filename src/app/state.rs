//! App state - pure data structure with no I/O logic

use chrono::Local;

use crate::app::practice::PracticeModal;
use crate::messages::ui_events::{FormField, InputMode};
use crate::messages::RenderState;
use crate::models::Catalog;
use crate::view::compose;
use crate::view::derive::{derive_view, Tab, ViewState};

/// Add-word popup contents
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddWordForm {
    pub english: String,
    pub bangla: String,
    pub field: FormField,
    /// Set while the word is being stored
    pub request_id: Option<u64>,
}

impl AddWordForm {
    pub fn current_mut(&mut self) -> &mut String {
        match self.field {
            FormField::English => &mut self.english,
            FormField::Bangla => &mut self.bangla,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.english.trim().is_empty() && !self.bangla.trim().is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.request_id.is_some()
    }
}

/// Main application state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    // Server snapshot, always replaced as a whole
    pub catalog: Catalog,
    pub loaded: bool,

    // Navigation
    pub active_tab: Tab,
    pub query: String,
    pub searching: bool,
    pub selected: usize,

    // Popups
    pub practice: PracticeModal,
    pub add_word: Option<AddWordForm>,
    pub show_help: bool,

    // Requests
    pub next_request_id: u64,
    pub pending_write: Option<u64>,
    pub pending_load: Option<u64>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            next_request_id: 1,
            ..AppState::default()
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// What receives keystrokes, topmost popup first
    pub fn input_mode(&self) -> InputMode {
        if self.show_help {
            InputMode::Help
        } else if self.practice.is_open() {
            InputMode::Practice
        } else if self.add_word.is_some() {
            InputMode::AddWord
        } else if self.searching {
            InputMode::Search
        } else {
            InputMode::Normal
        }
    }

    /// The list for the active tab, as of the local clock
    pub fn view(&self) -> ViewState {
        derive_view(
            &self.catalog.words,
            &self.catalog.saved,
            self.active_tab,
            &self.query,
            &Local::now(),
        )
    }

    pub fn is_busy(&self) -> bool {
        self.pending_write.is_some()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        compose::compose(self, &Local::now())
    }
}
