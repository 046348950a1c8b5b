use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vocabulary entry: an English term and its Bangla meaning
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub english: String,
    pub bangla: String,
}

impl Word {
    pub fn new(id: impl Into<String>, english: impl Into<String>, bangla: impl Into<String>) -> Self {
        Word {
            id: id.into(),
            english: english.into(),
            bangla: bangla.into(),
        }
    }
}

/// A bookmark linking a word to the moment it was saved
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEntry {
    pub word_id: String,
    pub saved_at: DateTime<Utc>,
}

/// A user-written example sentence for a word
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub word_id: String,
    pub content: String,
}

/// Body of `POST /words`
#[derive(Clone, Debug, Serialize)]
pub struct NewWord {
    pub english: String,
    pub bangla: String,
}

/// Body of `POST /saved-words`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWordBody {
    pub word_id: String,
}

/// Body of `POST /sentences`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSentence {
    pub word_id: String,
    pub content: String,
}

/// Snapshot of the two collections that drive the main views.
/// Always replaced as a whole after a reload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub words: Vec<Word>,
    pub saved: Vec<SavedEntry>,
}
