//! View-state derivation - pure functions from the catalog to what is shown
//!
//! Nothing here performs I/O or reads the clock; callers pass `now`.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{SavedEntry, Word};

/// Which list is on screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tab {
    #[default]
    Browse,
    Saved,
}

impl Tab {
    pub fn toggle(&self) -> Tab {
        match self {
            Tab::Browse => Tab::Saved,
            Tab::Saved => Tab::Browse,
        }
    }
}

/// A word on the browse tab
#[derive(Clone, Debug, PartialEq)]
pub struct BrowseItem {
    pub word: Word,
    pub is_saved: bool,
}

/// A word on the saved tab, joined with its bookmark time
#[derive(Clone, Debug, PartialEq)]
pub struct SavedItem {
    pub word: Word,
    pub saved_at: DateTime<Utc>,
}

/// Saved items sharing a date label
#[derive(Clone, Debug, PartialEq)]
pub struct SavedGroup {
    pub label: String,
    pub items: Vec<SavedItem>,
}

/// Why a list is empty
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// The source collection itself is empty
    NothingYet,
    /// The search filtered everything out
    NoMatches,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Listing {
    Browse(Vec<BrowseItem>),
    Saved(Vec<SavedGroup>),
}

/// Everything the list area needs
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub listing: Listing,
    pub empty: Option<EmptyState>,
}

impl ViewState {
    /// Words in display order, flattened across groups
    pub fn words(&self) -> Vec<&Word> {
        match &self.listing {
            Listing::Browse(items) => items.iter().map(|i| &i.word).collect(),
            Listing::Saved(groups) => groups
                .iter()
                .flat_map(|g| g.items.iter().map(|i| &i.word))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.listing {
            Listing::Browse(items) => items.len(),
            Listing::Saved(groups) => groups.iter().map(|g| g.items.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Case-insensitive substring match on the English term.
/// The query is trimmed; an empty query matches everything.
pub fn matches_query(word: &Word, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || word.english.to_lowercase().contains(&query.to_lowercase())
}

pub fn saved_ids(saved: &[SavedEntry]) -> HashSet<&str> {
    saved.iter().map(|s| s.word_id.as_str()).collect()
}

/// Browse tab: every word, filtered, flagged when bookmarked
pub fn browse_items(words: &[Word], saved: &[SavedEntry], query: &str) -> Vec<BrowseItem> {
    let ids = saved_ids(saved);
    words
        .iter()
        .filter(|w| matches_query(w, query))
        .map(|w| BrowseItem {
            word: w.clone(),
            is_saved: ids.contains(w.id.as_str()),
        })
        .collect()
}

/// Join bookmarks to their words, newest first. Bookmarks without a word
/// are dropped; duplicates keep the most recent bookmark.
pub fn join_saved(words: &[Word], saved: &[SavedEntry]) -> Vec<SavedItem> {
    let mut joined: Vec<SavedItem> = saved
        .iter()
        .filter_map(|entry| {
            words.iter().find(|w| w.id == entry.word_id).map(|w| SavedItem {
                word: w.clone(),
                saved_at: entry.saved_at,
            })
        })
        .collect();

    // Stable, so equal timestamps keep server order
    joined.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));

    let mut seen = HashSet::new();
    joined.retain(|item| seen.insert(item.word.id.clone()));
    joined
}

/// Label for the day a word was saved, relative to `now`'s calendar
pub fn date_label<Tz: TimeZone>(saved_at: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let tz = now.timezone();
    let saved_day = saved_at.with_timezone(&tz).date_naive();
    let today = now.date_naive();

    if saved_day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(saved_day) {
        "Yesterday".to_string()
    } else {
        saved_day.format("%b %-d, %Y").to_string()
    }
}

/// Group sorted items by date label, groups ordered by first member
pub fn group_by_date<Tz: TimeZone>(items: Vec<SavedItem>, now: &DateTime<Tz>) -> Vec<SavedGroup> {
    let mut groups: Vec<SavedGroup> = Vec::new();
    for item in items {
        let label = date_label(&item.saved_at, now);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.items.push(item),
            None => groups.push(SavedGroup {
                label,
                items: vec![item],
            }),
        }
    }
    groups
}

/// Number of distinct bookmarked words that still exist
pub fn saved_count(words: &[Word], saved: &[SavedEntry]) -> usize {
    join_saved(words, saved).len()
}

/// Derive the list for the active tab
pub fn derive_view<Tz: TimeZone>(
    words: &[Word],
    saved: &[SavedEntry],
    tab: Tab,
    query: &str,
    now: &DateTime<Tz>,
) -> ViewState {
    match tab {
        Tab::Browse => {
            let items = browse_items(words, saved, query);
            let empty = if words.is_empty() {
                Some(EmptyState::NothingYet)
            } else if items.is_empty() {
                Some(EmptyState::NoMatches)
            } else {
                None
            };
            ViewState {
                listing: Listing::Browse(items),
                empty,
            }
        }
        Tab::Saved => {
            let all = join_saved(words, saved);
            let source_empty = all.is_empty();
            let filtered: Vec<SavedItem> = all
                .into_iter()
                .filter(|i| matches_query(&i.word, query))
                .collect();
            let empty = if source_empty {
                Some(EmptyState::NothingYet)
            } else if filtered.is_empty() {
                Some(EmptyState::NoMatches)
            } else {
                None
            };
            ViewState {
                listing: Listing::Saved(group_by_date(filtered, now)),
                empty,
            }
        }
    }
}
