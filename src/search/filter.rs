//! Free-text filtering over card metadata
//!
//! A card matches when the lowercased query is a substring of its title, of
//! any of its tags, or of its note. Blank queries match everything.

use crate::model::{CardImage, Deck};

/// Normalized query; `None` means "show everything"
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Whether `card` matches an already lowercased query
#[must_use]
pub fn card_matches(card: &CardImage, needle: &str) -> bool {
    card.title.to_lowercase().contains(needle)
        || card.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
        || card.note.to_lowercase().contains(needle)
}

/// Positions (in the deck's unfiltered order) of the cards matching `query`
///
/// Order is preserved; the deck is never modified.
#[must_use]
pub fn filter_indices(deck: &Deck, query: &str) -> Vec<usize> {
    match normalize_query(query) {
        None => (0..deck.len()).collect(),
        Some(needle) => deck
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card_matches(card, &needle))
            .map(|(index, _)| index)
            .collect(),
    }
}
