//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{FormField, InputMode};
use crate::view::derive::Tab;

/// Actions a card offers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    Save,
    Remove,
    Pronounce,
    Practice,
}

impl CardAction {
    /// Key hint shown on the card
    pub fn hint(&self) -> &'static str {
        match self {
            CardAction::Save => "s save",
            CardAction::Remove => "d remove",
            CardAction::Pronounce => "p pronounce",
            CardAction::Practice => "⏎ practice",
        }
    }
}

/// One word card
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub word_id: String,
    pub english: String,
    /// Bangla meaning, shown on the browse tab only
    pub meaning: Option<String>,
    pub saved_indicator: bool,
    pub actions: Vec<CardAction>,
    pub prompt: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RowView {
    /// Date group heading on the saved tab
    Header(String),
    Card(CardView),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListBody {
    Loading,
    Empty(String),
    Rows(Vec<RowView>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PracticeView {
    pub english: String,
    pub sentences: Vec<String>,
    pub draft: String,
    pub loading: bool,
    pub submitting: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddWordView {
    pub english: String,
    pub bangla: String,
    pub field: FormField,
    pub submitting: bool,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    // Tab bar
    pub active_tab: Tab,
    pub saved_count: usize,

    // List
    pub section_title: String,
    pub query: String,
    pub input_mode: InputMode,
    pub body: ListBody,
    /// Index into the rows of `body`, pointing at a card
    pub selected_row: Option<usize>,

    // Popups
    pub practice: Option<PracticeView>,
    pub add_word: Option<AddWordView>,
    pub show_help: bool,

    // Status
    pub is_loading: bool,
    pub is_busy: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_tab: Tab::Browse,
            saved_count: 0,
            section_title: String::from("All Words"),
            query: String::new(),
            input_mode: InputMode::Normal,
            body: ListBody::Loading,
            selected_row: None,
            practice: None,
            add_word: None,
            show_help: false,
            is_loading: true,
            is_busy: false,
        }
    }
}
