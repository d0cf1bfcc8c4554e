//! The ordered list of decks, the unit of persistence
//!
//! Every transform returns a new `Collection`. Decks and cards that were not
//! touched keep their `Arc` identity, so a renderer (or the persistence
//! layer) can detect change with `Arc::ptr_eq` instead of deep comparison.

use super::card::CardImage;
use super::deck::{Deck, DeckId};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    decks: Vec<Arc<Deck>>,
}

impl Collection {
    #[must_use]
    pub const fn new() -> Self {
        Self { decks: Vec::new() }
    }

    #[must_use]
    pub fn decks(&self) -> &[Arc<Deck>] {
        &self.decks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Deck>> {
        self.decks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &DeckId) -> Option<&Arc<Deck>> {
        self.decks.iter().find(|deck| deck.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &DeckId) -> bool {
        self.get(id).is_some()
    }

    /// New collection with `deck` first (most recent first)
    #[must_use]
    pub fn prepend(&self, deck: Deck) -> Self {
        let mut decks = Vec::with_capacity(self.decks.len() + 1);
        decks.push(Arc::new(deck));
        decks.extend(self.decks.iter().cloned());
        Self { decks }
    }

    /// New collection without the deck `id`
    #[must_use]
    pub fn without(&self, id: &DeckId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        Self {
            decks: self.decks.iter().filter(|d| d.id != *id).cloned().collect(),
        }
    }

    /// Replace deck `id` with the result of `f`
    ///
    /// `f` returns `None` to signal no change; the collection is then returned
    /// with every `Arc` untouched. Unknown ids are a no-op as well.
    #[must_use]
    pub fn update_deck<F>(&self, id: &DeckId, f: F) -> Self
    where
        F: FnOnce(&Deck) -> Option<Deck>,
    {
        let Some(position) = self.decks.iter().position(|d| d.id == *id) else {
            return self.clone();
        };
        let Some(updated) = f(&self.decks[position]) else {
            return self.clone();
        };
        let mut decks = self.decks.clone();
        decks[position] = Arc::new(updated);
        Self { decks }
    }

    /// Replace card `index` of deck `id` with the result of `f`
    ///
    /// Same no-op rules as [`Collection::update_deck`]; an out-of-range index
    /// leaves the collection untouched.
    #[must_use]
    pub fn update_card<F>(&self, id: &DeckId, index: usize, f: F) -> Self
    where
        F: FnOnce(&CardImage) -> Option<CardImage>,
    {
        self.update_deck(id, |deck| {
            let card = deck.cards.get(index)?;
            let updated = f(card)?;
            let mut cards = deck.cards.clone();
            cards[index] = Arc::new(updated);
            Some(Deck {
                cards,
                ..deck.clone()
            })
        })
    }

    /// Whether `other` holds exactly the same deck allocations in order
    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        self.decks.len() == other.decks.len()
            && self
                .decks
                .iter()
                .zip(&other.decks)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl From<Vec<Deck>> for Collection {
    fn from(decks: Vec<Deck>) -> Self {
        Self {
            decks: decks.into_iter().map(Arc::new).collect(),
        }
    }
}
