//! Practice modal - writing example sentences for one word
//!
//! `Closed -> Opening -> Open -> Submitting -> Open`. Opening another word
//! replaces whatever was there; closing drops everything.

use crate::messages::network::ApiAction;
use crate::messages::NetworkCommand;
use crate::models::{Sentence, Word};

#[derive(Clone, Debug, PartialEq, Default)]
pub enum PracticeModal {
    #[default]
    Closed,
    /// Waiting for the first sentence list
    Opening { word: Word, request_id: u64 },
    Open {
        word: Word,
        sentences: Vec<Sentence>,
        draft: String,
    },
    /// A sentence is being stored; the list is refetched afterwards
    Submitting {
        word: Word,
        sentences: Vec<Sentence>,
        draft: String,
        request_id: u64,
    },
}

impl PracticeModal {
    /// Start practicing `word`, replacing any previous modal state
    pub fn open(&mut self, word: Word, request_id: u64) -> NetworkCommand {
        let word_id = word.id.clone();
        *self = PracticeModal::Opening { word, request_id };
        NetworkCommand::LoadSentences {
            id: request_id,
            word_id,
        }
    }

    pub fn close(&mut self) {
        *self = PracticeModal::Closed;
    }

    /// Store the draft. Blank drafts never reach the network.
    pub fn submit(&mut self, request_id: u64) -> Option<NetworkCommand> {
        if !self.can_submit() {
            return None;
        }

        match std::mem::take(self) {
            PracticeModal::Open {
                word,
                sentences,
                draft,
            } => {
                let cmd = NetworkCommand::AddSentence {
                    id: request_id,
                    word_id: word.id.clone(),
                    content: draft.trim().to_string(),
                };
                *self = PracticeModal::Submitting {
                    word,
                    sentences,
                    draft,
                    request_id,
                };
                Some(cmd)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, PracticeModal::Open { draft, .. } if !draft.trim().is_empty())
    }

    pub fn push_char(&mut self, c: char) {
        if let PracticeModal::Open { draft, .. } = self {
            draft.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let PracticeModal::Open { draft, .. } = self {
            draft.pop();
        }
    }

    /// Apply a fresh sentence list. Returns false when it belongs to a
    /// request or word that is no longer on screen.
    pub fn on_sentences(&mut self, id: u64, word_id: &str, sentences: Vec<Sentence>) -> bool {
        if !self.awaits(id, word_id) {
            return false;
        }

        // Keep only this word's sentences even if the server sent more
        let sentences: Vec<Sentence> = sentences
            .into_iter()
            .filter(|s| s.word_id == word_id)
            .collect();

        let word = match std::mem::take(self) {
            PracticeModal::Opening { word, .. } | PracticeModal::Submitting { word, .. } => word,
            other => {
                *self = other;
                return false;
            }
        };

        *self = PracticeModal::Open {
            word,
            sentences,
            draft: String::new(),
        };
        true
    }

    /// Fall back to `Open` after a failed call
    pub fn on_failure(&mut self, id: u64, action: ApiAction) -> bool {
        if self.pending_request() != Some(id) {
            return false;
        }

        *self = match std::mem::take(self) {
            PracticeModal::Opening { word, .. } => PracticeModal::Open {
                word,
                sentences: Vec::new(),
                draft: String::new(),
            },
            PracticeModal::Submitting {
                word,
                sentences,
                draft,
                ..
            } => {
                // The sentence was stored when only the refetch failed
                let draft = if action == ApiAction::AddSentence {
                    draft
                } else {
                    String::new()
                };
                PracticeModal::Open {
                    word,
                    sentences,
                    draft,
                }
            }
            other => other,
        };
        true
    }

    fn awaits(&self, id: u64, word_id: &str) -> bool {
        self.pending_request() == Some(id) && self.word().map(|w| w.id.as_str()) == Some(word_id)
    }

    pub fn pending_request(&self) -> Option<u64> {
        match self {
            PracticeModal::Opening { request_id, .. }
            | PracticeModal::Submitting { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    pub fn word(&self) -> Option<&Word> {
        match self {
            PracticeModal::Closed => None,
            PracticeModal::Opening { word, .. }
            | PracticeModal::Open { word, .. }
            | PracticeModal::Submitting { word, .. } => Some(word),
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        match self {
            PracticeModal::Open { sentences, .. } | PracticeModal::Submitting { sentences, .. } => {
                sentences
            }
            _ => &[],
        }
    }

    pub fn draft(&self) -> &str {
        match self {
            PracticeModal::Open { draft, .. } | PracticeModal::Submitting { draft, .. } => draft,
            _ => "",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, PracticeModal::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PracticeModal::Opening { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, PracticeModal::Submitting { .. })
    }
}
