//! Maps application state to the render view-model

use chrono::{DateTime, TimeZone};

use crate::app::AppState;
use crate::messages::render::{
    AddWordView, CardAction, CardView, ListBody, PracticeView, RenderState, RowView,
};
use crate::view::derive::{derive_view, saved_count, BrowseItem, EmptyState, Listing, SavedItem, Tab};

pub const BROWSE_TITLE: &str = "Explore Vocabulary";
pub const SAVED_TITLE: &str = "My Collection";
pub const PRACTICE_PROMPT: &str = "Press Enter to practice";

fn empty_message(tab: Tab, empty: EmptyState) -> &'static str {
    match (tab, empty) {
        (_, EmptyState::NothingYet) => "No words found here yet.",
        (Tab::Browse, EmptyState::NoMatches) => "No words match your search.",
        (Tab::Saved, EmptyState::NoMatches) => "No saved words match your search.",
    }
}

fn browse_card(item: BrowseItem) -> CardView {
    let mut actions = Vec::new();
    if !item.is_saved {
        actions.push(CardAction::Save);
    }
    actions.push(CardAction::Pronounce);

    CardView {
        word_id: item.word.id,
        english: item.word.english,
        meaning: Some(item.word.bangla),
        saved_indicator: item.is_saved,
        actions,
        prompt: None,
    }
}

fn saved_card(item: SavedItem) -> CardView {
    CardView {
        word_id: item.word.id,
        english: item.word.english,
        meaning: None,
        saved_indicator: true,
        actions: vec![CardAction::Remove, CardAction::Pronounce, CardAction::Practice],
        prompt: Some(PRACTICE_PROMPT.to_string()),
    }
}

/// Rows for the list, plus the row index of each card in order
fn rows(listing: Listing) -> (Vec<RowView>, Vec<usize>) {
    let mut rows = Vec::new();
    let mut card_rows = Vec::new();
    match listing {
        Listing::Browse(items) => {
            for item in items {
                card_rows.push(rows.len());
                rows.push(RowView::Card(browse_card(item)));
            }
        }
        Listing::Saved(groups) => {
            for group in groups {
                rows.push(RowView::Header(group.label));
                for item in group.items {
                    card_rows.push(rows.len());
                    rows.push(RowView::Card(saved_card(item)));
                }
            }
        }
    }
    (rows, card_rows)
}

/// Build everything the UI draws from `state`, dating groups against `now`
pub fn compose<Tz: TimeZone>(state: &AppState, now: &DateTime<Tz>) -> RenderState {
    let words = &state.catalog.words;
    let saved = &state.catalog.saved;

    let (body, selected_row) = if !state.loaded {
        (ListBody::Loading, None)
    } else {
        let view = derive_view(words, saved, state.active_tab, &state.query, now);
        match view.empty {
            Some(empty) => (
                ListBody::Empty(empty_message(state.active_tab, empty).to_string()),
                None,
            ),
            None => {
                let (rows, card_rows) = rows(view.listing);
                let selected = card_rows
                    .get(state.selected)
                    .or(card_rows.last())
                    .copied();
                (ListBody::Rows(rows), selected)
            }
        }
    };

    let practice = state.practice.word().map(|word| PracticeView {
        english: word.english.clone(),
        sentences: state
            .practice
            .sentences()
            .iter()
            .map(|s| s.content.clone())
            .collect(),
        draft: state.practice.draft().to_string(),
        loading: state.practice.is_loading(),
        submitting: state.practice.is_submitting(),
    });

    let add_word = state.add_word.as_ref().map(|form| AddWordView {
        english: form.english.clone(),
        bangla: form.bangla.clone(),
        field: form.field,
        submitting: form.is_submitting(),
    });

    RenderState {
        active_tab: state.active_tab,
        saved_count: saved_count(words, saved),
        section_title: match state.active_tab {
            Tab::Browse => BROWSE_TITLE,
            Tab::Saved => SAVED_TITLE,
        }
        .to_string(),
        query: state.query.clone(),
        input_mode: state.input_mode(),
        body,
        selected_row,
        practice,
        add_word,
        show_help: state.show_help,
        is_loading: state.pending_load.is_some() || !state.loaded,
        is_busy: state.is_busy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, SavedEntry, Word};
    use chrono::{Duration, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap()
    }

    fn state_with(saved: Vec<SavedEntry>) -> AppState {
        let mut state = AppState::new();
        state.catalog = Catalog {
            words: vec![
                Word::new("w1", "Apple", "আপেল"),
                Word::new("w2", "Grape", "আঙুর"),
            ],
            saved,
        };
        state.loaded = true;
        state
    }

    fn cards(render: &RenderState) -> Vec<&CardView> {
        match &render.body {
            ListBody::Rows(rows) => rows
                .iter()
                .filter_map(|r| match r {
                    RowView::Card(card) => Some(card),
                    RowView::Header(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_loading_before_first_snapshot() {
        let state = AppState::new();
        let render = compose(&state, &now());
        assert_eq!(render.body, ListBody::Loading);
        assert!(render.is_loading);
    }

    #[test]
    fn test_browse_cards_show_meaning_and_save() {
        let saved = vec![SavedEntry {
            word_id: "w2".into(),
            saved_at: now(),
        }];
        let render = compose(&state_with(saved), &now());
        assert_eq!(render.section_title, BROWSE_TITLE);
        assert_eq!(render.saved_count, 1);

        let cards = cards(&render);
        assert_eq!(cards[0].meaning.as_deref(), Some("আপেল"));
        assert_eq!(cards[0].actions, vec![CardAction::Save, CardAction::Pronounce]);
        assert!(!cards[0].saved_indicator);
        assert_eq!(cards[1].actions, vec![CardAction::Pronounce]);
        assert!(cards[1].saved_indicator);
    }

    #[test]
    fn test_saved_cards_are_grouped_under_headers() {
        let saved = vec![
            SavedEntry {
                word_id: "w1".into(),
                saved_at: now() - Duration::days(1),
            },
            SavedEntry {
                word_id: "w2".into(),
                saved_at: now(),
            },
        ];
        let mut state = state_with(saved);
        state.active_tab = Tab::Saved;
        state.selected = 1;
        let render = compose(&state, &now());

        let ListBody::Rows(rows) = &render.body else {
            panic!("expected rows, got {:?}", render.body);
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], RowView::Header("Today".into()));
        assert_eq!(rows[2], RowView::Header("Yesterday".into()));
        // Second card sits below the second header
        assert_eq!(render.selected_row, Some(3));

        let cards = cards(&render);
        assert!(cards.iter().all(|c| c.meaning.is_none()));
        assert_eq!(cards[0].prompt.as_deref(), Some(PRACTICE_PROMPT));
        assert!(cards[0].actions.contains(&CardAction::Practice));
    }

    #[test]
    fn test_empty_messages() {
        let mut state = state_with(Vec::new());
        state.active_tab = Tab::Saved;
        let render = compose(&state, &now());
        assert_eq!(render.body, ListBody::Empty("No words found here yet.".into()));

        state.active_tab = Tab::Browse;
        state.query = "zebra".into();
        let render = compose(&state, &now());
        assert_eq!(render.body, ListBody::Empty("No words match your search.".into()));
        assert_eq!(render.selected_row, None);
    }

    #[test]
    fn test_practice_popup_follows_modal() {
        let mut state = state_with(Vec::new());
        assert!(compose(&state, &now()).practice.is_none());

        state.practice.open(Word::new("w1", "Apple", "আপেল"), 5);
        let practice = compose(&state, &now()).practice.unwrap();
        assert_eq!(practice.english, "Apple");
        assert!(practice.loading);
        assert!(practice.sentences.is_empty());
    }
}
