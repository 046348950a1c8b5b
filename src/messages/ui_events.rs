//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::view::derive::Tab;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tabs
    SwitchTab(Tab),
    ToggleTab,

    // Selection
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,

    // Search
    StartSearch,
    StopSearch,
    SearchChar(char),
    SearchBackspace,
    ClearSearch,

    // Card actions
    SaveSelected,
    RemoveSelected,
    PronounceSelected,
    PracticeSelected,
    Reload,

    // Practice modal
    PracticeChar(char),
    PracticeBackspace,
    SubmitSentence,
    PronouncePracticeWord,
    ClosePractice,

    // Add-word form
    OpenAddWord,
    FormChar(char),
    FormBackspace,
    NextFormField,
    SubmitWord,
    CancelAddWord,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// What currently receives keystrokes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Practice,
    AddWord,
    Help,
}

/// Field of the add-word form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormField {
    #[default]
    English,
    Bangla,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::English => FormField::Bangla,
            FormField::Bangla => FormField::English,
        }
    }
}

/// Convert a key event to a UiEvent based on what has focus
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('p') if input_mode == InputMode::Practice => {
                return Some(UiEvent::PronouncePracticeWord)
            }
            KeyCode::Char('u') if input_mode == InputMode::Search => {
                return Some(UiEvent::ClearSearch)
            }
            _ => {}
        }
    }

    match input_mode {
        InputMode::Help => Some(UiEvent::CloseHelp),
        InputMode::Search => handle_search_keys(key),
        InputMode::Practice => handle_practice_keys(key),
        InputMode::AddWord => handle_form_keys(key),
        InputMode::Normal => handle_normal_keys(key),
    }
}

fn handle_normal_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') => Some(UiEvent::SwitchTab(Tab::Browse)),
        KeyCode::Char('2') => Some(UiEvent::SwitchTab(Tab::Saved)),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::ToggleTab),
        KeyCode::Char('/') => Some(UiEvent::StartSearch),
        KeyCode::Esc => Some(UiEvent::ClearSearch),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Home | KeyCode::Char('g') => Some(UiEvent::SelectFirst),
        KeyCode::End | KeyCode::Char('G') => Some(UiEvent::SelectLast),
        KeyCode::Char('s') => Some(UiEvent::SaveSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::RemoveSelected),
        KeyCode::Char('p') => Some(UiEvent::PronounceSelected),
        KeyCode::Enter | KeyCode::Char('o') => Some(UiEvent::PracticeSelected),
        KeyCode::Char('a') => Some(UiEvent::OpenAddWord),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        _ => None,
    }
}

fn handle_search_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopSearch),
        KeyCode::Backspace => Some(UiEvent::SearchBackspace),
        KeyCode::Down => Some(UiEvent::SelectNext),
        KeyCode::Up => Some(UiEvent::SelectPrev),
        KeyCode::Char(c) => Some(UiEvent::SearchChar(c)),
        _ => None,
    }
}

fn handle_practice_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::ClosePractice),
        KeyCode::Enter => Some(UiEvent::SubmitSentence),
        KeyCode::Backspace => Some(UiEvent::PracticeBackspace),
        KeyCode::Char(c) => Some(UiEvent::PracticeChar(c)),
        _ => None,
    }
}

fn handle_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CancelAddWord),
        KeyCode::Enter => Some(UiEvent::SubmitWord),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            Some(UiEvent::NextFormField)
        }
        KeyCode::Backspace => Some(UiEvent::FormBackspace),
        KeyCode::Char(c) => Some(UiEvent::FormChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_are_text_while_typing() {
        let key = press(KeyCode::Char('s'));
        assert_eq!(
            key_to_ui_event(key, InputMode::Normal),
            Some(UiEvent::SaveSelected)
        );
        assert_eq!(
            key_to_ui_event(key, InputMode::Search),
            Some(UiEvent::SearchChar('s'))
        );
        assert_eq!(
            key_to_ui_event(key, InputMode::Practice),
            Some(UiEvent::PracticeChar('s'))
        );
        assert_eq!(
            key_to_ui_event(key, InputMode::AddWord),
            Some(UiEvent::FormChar('s'))
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, InputMode::Practice), Some(UiEvent::Quit));
    }

    #[test]
    fn test_help_swallows_any_key() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), InputMode::Help),
            Some(UiEvent::CloseHelp)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, InputMode::Normal), None);
    }
}
