//! Top-level controller owning all session state
//!
//! [`DeckStore`] holds the collection, the viewer state, the search query and
//! the in-flight flags of the two asynchronous flows (archive import and deck
//! analysis). Every operation is a synchronous transition: the pure transforms
//! from [`crate::mutations`] and [`crate::shuffle`] produce the next
//! [`Collection`], and a single commit step swaps it in.
//!
//! Persistence follows one rule: once [`DeckStore::load`] has run, every
//! committed change saves the latest full snapshot. A transform that returns
//! the same snapshot is not a change and is not saved. Save failures are
//! logged and otherwise ignored.

mod flows;

pub use flows::ImportTicket;

use crate::db::DeckRepository;
use crate::model::{CardImage, Collection, Deck, DeckId, DeckSettings, FormError};
use crate::mutations;
use crate::search::SearchCache;
use crate::shuffle::{RandomSource, shuffle_deck};
use crate::viewer::{InputEvent, NavCommand, SwipeTracker, ViewState, map_input};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Session controller generic over storage and randomness
pub struct DeckStore<R, G> {
    collection: Collection,
    view: ViewState,
    query: String,
    swipe: SwipeTracker,
    search: SearchCache,
    repo: R,
    rng: G,
    loaded: bool,
    import_pending: bool,
    next_ticket: u64,
    analyses_pending: HashSet<DeckId>,
}

impl<R: DeckRepository, G: RandomSource> DeckStore<R, G> {
    /// Empty, not yet loaded store
    pub fn new(repo: R, rng: G) -> Self {
        Self {
            collection: Collection::new(),
            view: ViewState::Grid,
            query: String::new(),
            swipe: SwipeTracker::default(),
            search: SearchCache::default(),
            repo,
            rng,
            loaded: false,
            import_pending: false,
            next_ticket: 0,
            analyses_pending: HashSet::new(),
        }
    }

    /// Minimum horizontal travel for a swipe to navigate
    #[must_use]
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe = SwipeTracker::with_threshold(threshold);
        self
    }

    #[must_use]
    pub fn with_search_capacity(mut self, capacity: u64) -> Self {
        self.search = SearchCache::new(capacity);
        self
    }

    /// Load the stored collection; only the first call has any effect
    ///
    /// A failed load starts the session with an empty collection.
    pub fn load(&mut self) {
        if self.loaded {
            debug!("collection already loaded");
            return;
        }
        self.collection = match self.repo.load_all() {
            Ok(decks) => {
                info!(decks = decks.len(), "loaded collection");
                Collection::from(decks)
            }
            Err(e) => {
                error!("failed to load collection, starting empty: {e}");
                Collection::new()
            }
        };
        self.loaded = true;
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn collection(&self) -> &Collection {
        &self.collection
    }

    #[must_use]
    pub const fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    #[must_use]
    pub fn selected_deck(&self) -> Option<&Arc<Deck>> {
        self.view.selected_deck().and_then(|id| self.collection.get(&id))
    }

    /// Card shown in detail or browse
    #[must_use]
    pub fn active_card(&self) -> Option<&Arc<CardImage>> {
        let index = self.view.active_index()?;
        self.selected_deck()?.card(index)
    }

    /// Positions of the selected deck's cards matching the current query
    #[must_use]
    pub fn visible_cards(&self) -> Arc<[usize]> {
        match self.view.selected_deck() {
            Some(id) => self.filter_cards(&id, &self.query),
            None => Arc::from(Vec::new()),
        }
    }

    /// Positions of `deck`'s cards matching `query`, without selecting it
    #[must_use]
    pub fn filter_cards(&self, deck: &DeckId, query: &str) -> Arc<[usize]> {
        self.collection
            .get(deck)
            .map_or_else(|| Arc::from(Vec::new()), |deck| self.search.filter(deck, query))
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select a deck, shuffling and jumping into browse as its settings ask
    ///
    /// Returns `false` for an unknown id.
    pub fn select_deck(&mut self, id: &DeckId) -> bool {
        let Some(deck) = self.collection.get(id) else {
            debug!(deck = %id, "select ignored, unknown deck");
            return false;
        };
        if deck.start_shuffled {
            let next = self
                .collection
                .update_deck(id, |deck| Some(shuffle_deck(deck, &mut self.rng)));
            self.commit(next);
        }
        let Some(deck) = self.collection.get(id) else {
            return false;
        };
        self.view = ViewState::opened(deck);
        self.query.clear();
        debug!(deck = %id, mode = ?self.view.mode(), "deck selected");
        true
    }

    pub fn deselect(&mut self) {
        self.view = self.view.deselect();
        self.query.clear();
    }

    /// Open the card at unfiltered position `index`
    pub fn open_card(&mut self, index: usize) {
        let Some(deck) = self.selected_deck() else {
            return;
        };
        if index >= deck.len() {
            debug!(index, len = deck.len(), "open ignored, index out of range");
            return;
        }
        self.view = self.view.open_card(index);
    }

    pub fn close_card(&mut self) {
        self.view = self.view.close_card();
    }

    pub fn enter_browse(&mut self) {
        self.view = self.view.enter_browse();
    }

    pub fn exit_browse(&mut self) {
        self.view = self.view.exit_browse();
    }

    pub fn escape(&mut self) {
        self.view = self.view.escape();
    }

    pub fn next(&mut self) {
        let len = self.selected_deck().map_or(0, |deck| deck.len());
        self.view = self.view.next(len);
    }

    pub fn previous(&mut self) {
        self.view = self.view.previous();
    }

    /// Toggle the face of the active card
    pub fn flip_active(&mut self) {
        if let (Some(deck), Some(index)) = (self.view.selected_deck(), self.view.active_index()) {
            self.toggle_flip(&deck, index);
        }
    }

    /// Shuffle a deck; an open card view restarts at the first card
    pub fn shuffle(&mut self, id: &DeckId) {
        let next = self
            .collection
            .update_deck(id, |deck| Some(shuffle_deck(deck, &mut self.rng)));
        if self.commit(next) && self.view.selected_deck() == Some(*id) {
            self.view = self.view.restart();
        }
    }

    /// Feed one raw input event through the viewer's input mapping
    pub fn handle_input(&mut self, event: InputEvent) -> Option<NavCommand> {
        let command = map_input(&self.view, &mut self.swipe, event)?;
        match command {
            NavCommand::Previous => self.previous(),
            NavCommand::Next => self.next(),
            NavCommand::Flip => self.flip_active(),
            NavCommand::Escape => self.escape(),
        }
        Some(command)
    }

    pub fn toggle_flip(&mut self, deck: &DeckId, index: usize) {
        let next = mutations::toggle_flip(&self.collection, deck, index);
        self.commit(next);
    }

    pub fn set_title(&mut self, deck: &DeckId, index: usize, title: &str) {
        let next = mutations::set_title(&self.collection, deck, index, title);
        self.commit(next);
    }

    pub fn set_note(&mut self, deck: &DeckId, index: usize, note: &str) {
        let next = mutations::set_note(&self.collection, deck, index, note);
        self.commit(next);
    }

    pub fn add_tag(&mut self, deck: &DeckId, index: usize, tag: &str) {
        let next = mutations::add_tag(&self.collection, deck, index, tag);
        self.commit(next);
    }

    pub fn remove_tag(&mut self, deck: &DeckId, index: usize, tag: &str) {
        let next = mutations::remove_tag(&self.collection, deck, index, tag);
        self.commit(next);
    }

    /// # Errors
    ///
    /// Returns `FormError` if the settings do not validate.
    pub fn update_deck_settings(&mut self, deck: &DeckId, settings: DeckSettings) -> Result<(), FormError> {
        let next = mutations::update_settings(&self.collection, deck, settings)?;
        self.commit(next);
        Ok(())
    }

    /// Delete a deck; returns `false` if it did not exist
    pub fn delete_deck(&mut self, deck: &DeckId) -> bool {
        let next = mutations::remove_deck(&self.collection, deck);
        let removed = self.commit(next);
        if removed {
            info!(deck = %deck, "deleted deck");
        }
        removed
    }

    pub fn clear_analysis(&mut self, deck: &DeckId) {
        let next = mutations::clear_analysis(&self.collection, deck);
        self.commit(next);
    }

    /// Swap in `next`; returns whether anything changed
    fn commit(&mut self, next: Collection) -> bool {
        if next.same_snapshot(&self.collection) {
            return false;
        }
        self.collection = next;

        if let Some(id) = self.view.selected_deck()
            && !self.collection.contains(&id)
        {
            debug!(deck = %id, "selected deck is gone, back to grid");
            self.view = ViewState::Grid;
            self.query.clear();
        }

        if self.loaded
            && let Err(e) = self.repo.save_all(self.collection.decks())
        {
            warn!("failed to save collection: {e}");
        }
        true
    }
}

#[cfg(test)]
mod tests;
