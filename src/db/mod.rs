//! Persistence for the deck collection
//!
//! The collection is always loaded and saved as a whole. [`DeckRepository`] is
//! the seam; two backends ship:
//!
//! - [`Database`]: sled embedded database, one tree `decks`
//! - [`MemoryRepository`]: in-process, for tests and embedders
//!
//! sled layout: key is the deck's position as a big-endian `u64` (so tree
//! order is collection order), value is the deck as JSON. JSON keeps older
//! records readable when fields are added; missing `tags`/`note` default to
//! empty on load.

pub mod error;
pub mod memory;

pub use error::PersistenceError;
pub use memory::MemoryRepository;

use crate::model::Deck;
use sled::{Batch, Db, Tree};
use std::path::Path;
use std::sync::Arc;

/// Durable storage for the full list of decks
pub trait DeckRepository {
    /// Load every stored deck in collection order
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the backend fails or a record is unreadable.
    fn load_all(&self) -> Result<Vec<Deck>, PersistenceError>;

    /// Replace the stored decks with `decks`
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the write fails.
    fn save_all(&self, decks: &[Arc<Deck>]) -> Result<(), PersistenceError>;
}

impl<R: DeckRepository + ?Sized> DeckRepository for &R {
    fn load_all(&self) -> Result<Vec<Deck>, PersistenceError> {
        (**self).load_all()
    }

    fn save_all(&self, decks: &[Arc<Deck>]) -> Result<(), PersistenceError> {
        (**self).save_all(decks)
    }
}

/// sled-backed deck repository
pub struct Database {
    db: Db,
    decks: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use deckmaster::db::Database;
    /// let db = Database::open("my_decks").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let db = sled::open(path)?;
        let decks = db.open_tree("decks")?;
        Ok(Self { db, decks })
    }

    /// Number of stored decks
    #[must_use]
    pub fn count(&self) -> usize {
        self.decks.len()
    }

    /// Remove every stored deck
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the tree cannot be cleared.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.decks.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the flush fails.
    pub fn flush(&self) -> Result<(), PersistenceError> {
        self.db.flush()?;
        Ok(())
    }

    fn position_key(position: u64) -> [u8; 8] {
        position.to_be_bytes()
    }
}

impl DeckRepository for Database {
    fn load_all(&self) -> Result<Vec<Deck>, PersistenceError> {
        let mut decks = Vec::with_capacity(self.decks.len());
        for entry in &self.decks {
            let (key, value) = entry?;
            let position = key
                .as_ref()
                .try_into()
                .map(u64::from_be_bytes)
                .unwrap_or(u64::MAX);
            let deck = serde_json::from_slice(&value)
                .map_err(|source| PersistenceError::Decode { position, source })?;
            decks.push(deck);
        }
        Ok(decks)
    }

    fn save_all(&self, decks: &[Arc<Deck>]) -> Result<(), PersistenceError> {
        let mut batch = Batch::default();

        for (position, deck) in (0u64..).zip(decks) {
            let value = serde_json::to_vec(deck.as_ref()).map_err(PersistenceError::Encode)?;
            batch.insert(Self::position_key(position).to_vec(), value);
        }

        // Drop positions beyond the new length
        let stale_from = Self::position_key(decks.len() as u64);
        for key in self.decks.range(stale_from..).keys() {
            batch.remove(key?);
        }

        self.decks.apply_batch(batch)?;
        self.db.flush()?;
        Ok(())
    }
}
