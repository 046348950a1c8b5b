//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::speech::Speaker;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    speaker: Speaker,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        speaker: Speaker,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            speaker,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let cmd = self.state.load_catalog();
        self.send(cmd);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event).await {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::warn!("Network actor is gone, dropping command");
        }
    }

    fn send_opt(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            self.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    async fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Tabs
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),
            UiEvent::ToggleTab => self.state.toggle_tab(),

            // Selection
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectFirst => self.state.select_first(),
            UiEvent::SelectLast => self.state.select_last(),

            // Search
            UiEvent::StartSearch => self.state.start_search(),
            UiEvent::StopSearch => self.state.stop_search(),
            UiEvent::SearchChar(c) => self.state.search_char(c),
            UiEvent::SearchBackspace => self.state.search_backspace(),
            UiEvent::ClearSearch => self.state.clear_search(),

            // Card actions
            UiEvent::SaveSelected => {
                let cmd = self.state.save_selected();
                self.send_opt(cmd);
            }
            UiEvent::RemoveSelected => {
                let cmd = self.state.remove_selected();
                self.send_opt(cmd);
            }
            UiEvent::PracticeSelected => {
                let cmd = self.state.open_practice_selected();
                self.send_opt(cmd);
            }
            UiEvent::PronounceSelected => {
                if let Some(text) = self.state.pronounce_selected() {
                    self.speaker.speak(&text).await;
                }
            }
            UiEvent::Reload => {
                let cmd = self.state.load_catalog();
                self.send(cmd);
            }

            // Practice modal
            UiEvent::PracticeChar(c) => self.state.practice_char(c),
            UiEvent::PracticeBackspace => self.state.practice_backspace(),
            UiEvent::SubmitSentence => {
                let cmd = self.state.submit_sentence();
                self.send_opt(cmd);
            }
            UiEvent::PronouncePracticeWord => {
                if let Some(text) = self.state.pronounce_practice_word() {
                    self.speaker.speak(&text).await;
                }
            }
            UiEvent::ClosePractice => self.state.close_practice(),

            // Add-word form
            UiEvent::OpenAddWord => self.state.open_add_word(),
            UiEvent::FormChar(c) => self.state.form_char(c),
            UiEvent::FormBackspace => self.state.form_backspace(),
            UiEvent::NextFormField => self.state.next_form_field(),
            UiEvent::SubmitWord => {
                let cmd = self.state.submit_word();
                self.send_opt(cmd);
            }
            UiEvent::CancelAddWord => self.state.cancel_add_word(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
