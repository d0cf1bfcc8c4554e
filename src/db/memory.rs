//! In-process deck repository

use super::{DeckRepository, PersistenceError};
use crate::model::Deck;
use std::sync::{Arc, Mutex, PoisonError};

/// Repository keeping the last saved snapshot in memory
///
/// Counts saves and can be told to fail, which makes it handy for exercising
/// the controller's persistence policy.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    decks: Vec<Deck>,
    saves: usize,
    fail_load: bool,
    fail_save: bool,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `decks`
    #[must_use]
    pub fn with_decks(decks: Vec<Deck>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                decks,
                ..Inner::default()
            }),
        }
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.lock().fail_load = fail;
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.lock().fail_save = fail;
    }

    /// Number of successful saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Last saved decks
    #[must_use]
    pub fn stored(&self) -> Vec<Deck> {
        self.lock().decks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeckRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Deck>, PersistenceError> {
        let inner = self.lock();
        if inner.fail_load {
            return Err(PersistenceError::Unavailable("load refused".into()));
        }
        Ok(inner.decks.clone())
    }

    fn save_all(&self, decks: &[Arc<Deck>]) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if inner.fail_save {
            return Err(PersistenceError::Unavailable("save refused".into()));
        }
        inner.decks = decks.iter().map(|d| Deck::clone(d)).collect();
        inner.saves += 1;
        Ok(())
    }
}
