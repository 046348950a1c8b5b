//! Network messages - communication between App and Network layers

use crate::models::{Catalog, Sentence};

/// Commands sent from App layer to Network layer.
///
/// Write commands run their call and the follow-up reload as one task,
/// so the App only ever sees a full snapshot or a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Fetch words and saved entries
    LoadCatalog { id: u64 },
    /// Bookmark a word, then reload the catalog
    SaveWord { id: u64, word_id: String },
    /// Remove a bookmark, then reload the catalog
    RemoveSaved { id: u64, word_id: String },
    /// Create a word, then reload the catalog
    AddWord {
        id: u64,
        english: String,
        bangla: String,
    },
    /// Fetch the sentences of one word
    LoadSentences { id: u64, word_id: String },
    /// Append a sentence, then refetch that word's sentences
    AddSentence {
        id: u64,
        word_id: String,
        content: String,
    },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkCommand::LoadCatalog { id }
            | NetworkCommand::SaveWord { id, .. }
            | NetworkCommand::RemoveSaved { id, .. }
            | NetworkCommand::AddWord { id, .. }
            | NetworkCommand::LoadSentences { id, .. }
            | NetworkCommand::AddSentence { id, .. } => Some(*id),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// The API step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    LoadCatalog,
    SaveWord,
    RemoveSaved,
    AddWord,
    LoadSentences,
    AddSentence,
}

impl ApiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiAction::LoadCatalog => "load catalog",
            ApiAction::SaveWord => "save word",
            ApiAction::RemoveSaved => "remove saved word",
            ApiAction::AddWord => "add word",
            ApiAction::LoadSentences => "load sentences",
            ApiAction::AddSentence => "add sentence",
        }
    }

    /// Whether the failed step was a write (nothing was applied)
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ApiAction::SaveWord | ApiAction::RemoveSaved | ApiAction::AddWord | ApiAction::AddSentence
        )
    }
}

/// Responses sent from Network layer to App layer. Every command gets
/// exactly one response.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Fresh words + saved snapshot
    CatalogLoaded { id: u64, catalog: Catalog },
    /// Fresh sentence list for one word
    SentencesLoaded {
        id: u64,
        word_id: String,
        sentences: Vec<Sentence>,
    },
    /// A step failed; `action` names which one
    Failed {
        id: u64,
        action: ApiAction,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::CatalogLoaded { id, .. } => *id,
            NetworkResponse::SentencesLoaded { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
