//! Command handlers - business logic for processing UI events

use crate::app::state::AddWordForm;
use crate::app::AppState;
use crate::messages::network::ApiAction;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Word;
use crate::view::derive::Tab;

impl AppState {
    // ========================
    // Loading
    // ========================

    /// Fetch words and bookmarks; used at startup and on `r`
    pub fn load_catalog(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_load = Some(id);
        NetworkCommand::LoadCatalog { id }
    }

    // ========================
    // Tabs and search
    // ========================

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.selected = 0;
        }
    }

    pub fn toggle_tab(&mut self) {
        self.switch_tab(self.active_tab.toggle());
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn stop_search(&mut self) {
        self.searching = false;
    }

    pub fn search_char(&mut self, c: char) {
        self.query.push(c);
        self.clamp_selection();
    }

    pub fn search_backspace(&mut self) {
        self.query.pop();
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
        self.clamp_selection();
    }

    // ========================
    // Selection
    // ========================

    pub fn select_next(&mut self) {
        let len = self.view().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.view().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.view().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// The word under the cursor on the active tab
    pub fn selected_word(&self) -> Option<Word> {
        self.view().words().get(self.selected).map(|w| (*w).clone())
    }

    fn is_saved(&self, word_id: &str) -> bool {
        self.catalog.saved.iter().any(|s| s.word_id == word_id)
    }

    // ========================
    // Writes
    // ========================

    /// Claim the single write slot
    fn begin_write(&mut self, what: &str) -> Option<u64> {
        if let Some(pending) = self.pending_write {
            tracing::debug!(pending, action = what, "Write in flight, ignoring");
            return None;
        }
        let id = self.next_id();
        self.pending_write = Some(id);
        Some(id)
    }

    pub fn save_selected(&mut self) -> Option<NetworkCommand> {
        if self.active_tab != Tab::Browse {
            return None;
        }
        let word = self.selected_word()?;
        if self.is_saved(&word.id) {
            return None;
        }
        let id = self.begin_write(ApiAction::SaveWord.as_str())?;
        Some(NetworkCommand::SaveWord {
            id,
            word_id: word.id,
        })
    }

    pub fn remove_selected(&mut self) -> Option<NetworkCommand> {
        if self.active_tab != Tab::Saved {
            return None;
        }
        let word = self.selected_word()?;
        let id = self.begin_write(ApiAction::RemoveSaved.as_str())?;
        Some(NetworkCommand::RemoveSaved {
            id,
            word_id: word.id,
        })
    }

    // ========================
    // Practice
    // ========================

    pub fn open_practice_selected(&mut self) -> Option<NetworkCommand> {
        if self.active_tab != Tab::Saved {
            return None;
        }
        let word = self.selected_word()?;
        let id = self.next_id();
        Some(self.practice.open(word, id))
    }

    pub fn practice_char(&mut self, c: char) {
        self.practice.push_char(c);
    }

    pub fn practice_backspace(&mut self) {
        self.practice.backspace();
    }

    pub fn submit_sentence(&mut self) -> Option<NetworkCommand> {
        if !self.practice.can_submit() {
            return None;
        }
        let id = self.begin_write(ApiAction::AddSentence.as_str())?;
        let cmd = self.practice.submit(id);
        if cmd.is_none() {
            self.pending_write = None;
        }
        cmd
    }

    pub fn close_practice(&mut self) {
        self.practice.close();
    }

    // ========================
    // Add-word form
    // ========================

    pub fn open_add_word(&mut self) {
        if self.add_word.is_none() {
            self.add_word = Some(AddWordForm::default());
        }
    }

    pub fn form_char(&mut self, c: char) {
        if let Some(form) = self.add_word.as_mut().filter(|f| !f.is_submitting()) {
            form.current_mut().push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = self.add_word.as_mut().filter(|f| !f.is_submitting()) {
            form.current_mut().pop();
        }
    }

    pub fn next_form_field(&mut self) {
        if let Some(form) = self.add_word.as_mut() {
            form.field = form.field.next();
        }
    }

    pub fn submit_word(&mut self) -> Option<NetworkCommand> {
        let ready = self
            .add_word
            .as_ref()
            .is_some_and(|f| f.is_complete() && !f.is_submitting());
        if !ready {
            return None;
        }
        let id = self.begin_write(ApiAction::AddWord.as_str())?;
        let form = self.add_word.as_mut()?;
        form.request_id = Some(id);
        Some(NetworkCommand::AddWord {
            id,
            english: form.english.trim().to_string(),
            bangla: form.bangla.trim().to_string(),
        })
    }

    pub fn cancel_add_word(&mut self) {
        self.add_word = None;
    }

    // ========================
    // Speech
    // ========================

    pub fn pronounce_selected(&self) -> Option<String> {
        self.selected_word().map(|w| w.english)
    }

    pub fn pronounce_practice_word(&self) -> Option<String> {
        self.practice.word().map(|w| w.english.clone())
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let id = response.id();
        if self.pending_write == Some(id) {
            self.pending_write = None;
        }
        if self.pending_load == Some(id) {
            self.pending_load = None;
        }

        match response {
            NetworkResponse::CatalogLoaded { catalog, .. } => {
                self.catalog = catalog;
                self.loaded = true;
                if self
                    .add_word
                    .as_ref()
                    .is_some_and(|f| f.request_id == Some(id))
                {
                    self.add_word = None;
                }
                self.clamp_selection();
            }

            NetworkResponse::SentencesLoaded {
                word_id, sentences, ..
            } => {
                if !self.practice.on_sentences(id, &word_id, sentences) {
                    tracing::debug!(id, word_id = %word_id, "Dropping stale sentences");
                }
            }

            NetworkResponse::Failed { action, .. } => {
                // Words and bookmarks stay as they were
                if action == ApiAction::LoadCatalog {
                    self.loaded = true;
                }
                self.practice.on_failure(id, action);

                if let Some(form) = self.add_word.as_mut() {
                    if form.request_id == Some(id) {
                        if action.is_write() {
                            form.request_id = None;
                        } else {
                            // Stored, only the reload failed
                            self.add_word = None;
                        }
                    }
                }
            }
        }
    }
}
