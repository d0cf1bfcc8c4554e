//! Card and deck mutations as pure collection transforms
//!
//! Every function takes the current [`Collection`] and returns the next one.
//! Only the targeted card and its deck are reallocated; every other `Arc` is
//! shared with the input. A mutation that changes nothing (unknown deck,
//! duplicate tag, missing tag) returns a collection whose snapshot is
//! identical to the input.
//!
//! Card indices must come from the deck's current `cards`. An out-of-range
//! index is ignored.

use crate::model::{CardImage, Collection, DeckId, DeckSettings, FormError};
use tracing::debug;

/// A single edit to one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMutation {
    ToggleFlip,
    SetTitle(String),
    SetNote(String),
    AddTag(String),
    RemoveTag(String),
}

impl CardMutation {
    /// Apply to a card; `None` means nothing would change
    #[must_use]
    pub fn apply_to(&self, card: &CardImage) -> Option<CardImage> {
        match self {
            Self::ToggleFlip => Some(CardImage {
                is_flipped: !card.is_flipped,
                ..card.clone()
            }),
            Self::SetTitle(title) => Some(CardImage {
                title: title.clone(),
                ..card.clone()
            }),
            Self::SetNote(note) => Some(CardImage {
                note: note.clone(),
                ..card.clone()
            }),
            Self::AddTag(tag) => {
                let mut tags = card.tags.clone();
                tags.insert(tag).then(|| CardImage {
                    tags,
                    ..card.clone()
                })
            }
            Self::RemoveTag(tag) => {
                let mut tags = card.tags.clone();
                tags.remove(tag).then(|| CardImage {
                    tags,
                    ..card.clone()
                })
            }
        }
    }
}

/// Apply `mutation` to card `index` of deck `deck_id`
#[must_use]
pub fn apply(collection: &Collection, deck_id: &DeckId, index: usize, mutation: &CardMutation) -> Collection {
    if let Some(deck) = collection.get(deck_id)
        && index >= deck.len()
    {
        debug!(deck = %deck_id, index, len = deck.len(), "card index out of range, ignoring {mutation:?}");
    }
    collection.update_card(deck_id, index, |card| mutation.apply_to(card))
}

#[must_use]
pub fn toggle_flip(collection: &Collection, deck_id: &DeckId, index: usize) -> Collection {
    apply(collection, deck_id, index, &CardMutation::ToggleFlip)
}

#[must_use]
pub fn set_title(collection: &Collection, deck_id: &DeckId, index: usize, title: &str) -> Collection {
    apply(collection, deck_id, index, &CardMutation::SetTitle(title.to_string()))
}

#[must_use]
pub fn set_note(collection: &Collection, deck_id: &DeckId, index: usize, note: &str) -> Collection {
    apply(collection, deck_id, index, &CardMutation::SetNote(note.to_string()))
}

#[must_use]
pub fn add_tag(collection: &Collection, deck_id: &DeckId, index: usize, tag: &str) -> Collection {
    apply(collection, deck_id, index, &CardMutation::AddTag(tag.to_string()))
}

#[must_use]
pub fn remove_tag(collection: &Collection, deck_id: &DeckId, index: usize, tag: &str) -> Collection {
    apply(collection, deck_id, index, &CardMutation::RemoveTag(tag.to_string()))
}

/// Replace a deck's editable settings
///
/// # Errors
///
/// Returns `FormError::MissingName` for a blank name; the collection is not
/// touched in that case.
pub fn update_settings(
    collection: &Collection,
    deck_id: &DeckId,
    settings: DeckSettings,
) -> Result<Collection, FormError> {
    settings.validate()?;
    Ok(collection.update_deck(deck_id, |deck| Some(deck.with_settings(settings))))
}

#[must_use]
pub fn remove_deck(collection: &Collection, deck_id: &DeckId) -> Collection {
    collection.without(deck_id)
}

/// Attach (or replace) a deck's analysis text
#[must_use]
pub fn set_analysis(collection: &Collection, deck_id: &DeckId, analysis: String) -> Collection {
    collection.update_deck(deck_id, |deck| {
        let mut deck = deck.clone();
        deck.analysis = Some(analysis);
        Some(deck)
    })
}

#[must_use]
pub fn clear_analysis(collection: &Collection, deck_id: &DeckId) -> Collection {
    collection.update_deck(deck_id, |deck| {
        deck.analysis.as_ref()?;
        let mut deck = deck.clone();
        deck.analysis = None;
        Some(deck)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_collection;
    use std::sync::Arc;

    fn tags_of(collection: &Collection, id: &DeckId, index: usize) -> Vec<String> {
        collection.get(id).unwrap().cards[index].tags.as_slice().to_vec()
    }

    #[test]
    fn test_toggle_flip_twice_restores() {
        let (collection, id) = sample_collection(3);
        let once = toggle_flip(&collection, &id, 1);
        assert!(once.get(&id).unwrap().cards[1].is_flipped);
        let twice = toggle_flip(&once, &id, 1);
        assert!(!twice.get(&id).unwrap().cards[1].is_flipped);
    }

    #[test]
    fn test_card_edits_share_image_bytes() {
        let (collection, id) = sample_collection(2);
        let edited = add_tag(&toggle_flip(&collection, &id, 0), &id, 0, "moon");
        let (before, after) = (&collection.get(&id).unwrap().cards[0], &edited.get(&id).unwrap().cards[0]);
        assert!(!Arc::ptr_eq(before, after));
        assert!(after.image.shares_payload(&before.image));
    }

    #[test]
    fn test_mutation_touches_only_target() {
        let (collection, id) = sample_collection(3);
        let extra = crate::testing::deck_named("other", 2);
        let collection = collection.prepend(extra);

        let updated = set_title(&collection, &id, 2, "Renamed");

        assert!(Arc::ptr_eq(&collection.decks()[0], &updated.decks()[0]));
        let (before, after) = (collection.get(&id).unwrap(), updated.get(&id).unwrap());
        assert!(Arc::ptr_eq(&before.cards[0], &after.cards[0]));
        assert!(Arc::ptr_eq(&before.cards[1], &after.cards[1]));
        assert_eq!(after.cards[2].title, "Renamed");
        assert_eq!(after.len(), before.len());
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let (collection, id) = sample_collection(1);
        let once = add_tag(&collection, &id, 0, " dragon ");
        let twice = add_tag(&once, &id, 0, "dragon");
        assert_eq!(tags_of(&twice, &id, 0), ["dragon"]);
        assert!(twice.same_snapshot(&once));
    }

    #[test]
    fn test_add_blank_tag_is_noop() {
        let (collection, id) = sample_collection(1);
        assert!(add_tag(&collection, &id, 0, "   ").same_snapshot(&collection));
        assert!(add_tag(&collection, &id, 0, "").same_snapshot(&collection));
    }

    #[test]
    fn test_remove_tag_round_trip() {
        let (collection, id) = sample_collection(1);
        let base = add_tag(&collection, &id, 0, "red");
        let added = add_tag(&base, &id, 0, "blue");
        let removed = remove_tag(&added, &id, 0, "blue");
        assert_eq!(tags_of(&removed, &id, 0), tags_of(&base, &id, 0));

        assert!(remove_tag(&base, &id, 0, "green").same_snapshot(&base));
    }

    #[test]
    fn test_title_and_note_verbatim() {
        let (collection, id) = sample_collection(1);
        let updated = set_note(&set_title(&collection, &id, 0, ""), &id, 0, "  spaced  ");
        let card = &updated.get(&id).unwrap().cards[0];
        assert_eq!(card.title, "");
        assert_eq!(card.note, "  spaced  ");
    }

    #[test]
    fn test_unknown_deck_and_bad_index_are_noops() {
        let (collection, id) = sample_collection(2);
        assert!(toggle_flip(&collection, &DeckId::generate(), 0).same_snapshot(&collection));
        assert!(toggle_flip(&collection, &id, 5).same_snapshot(&collection));
    }

    #[test]
    fn test_update_settings_rejects_blank_name() {
        let (collection, id) = sample_collection(1);
        let result = update_settings(&collection, &id, DeckSettings::named(""));
        assert_eq!(result, Err(FormError::MissingName));

        let mut settings = collection.get(&id).unwrap().settings();
        settings.notes = "edited".into();
        let updated = update_settings(&collection, &id, settings).unwrap();
        assert_eq!(updated.get(&id).unwrap().notes, "edited");
    }

    #[test]
    fn test_analysis_set_and_clear() {
        let (collection, id) = sample_collection(1);
        let analysed = set_analysis(&collection, &id, "Moody".into());
        assert_eq!(analysed.get(&id).unwrap().analysis.as_deref(), Some("Moody"));
        let cleared = clear_analysis(&analysed, &id);
        assert!(cleared.get(&id).unwrap().analysis.is_none());
        assert!(clear_analysis(&cleared, &id).same_snapshot(&cleared));
    }
}
