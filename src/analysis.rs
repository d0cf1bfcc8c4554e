//! AI critique collaborator contract
//!
//! The core never talks to a model itself. It prepares an [`AnalysisRequest`]
//! (deck name, notes, and a bounded sample of cards) and hands it to a
//! [`DeckAnalyzer`]. Any failure is treated the same way: nothing is stored.

use crate::model::{CardImage, Deck, DeckId};
use std::sync::Arc;
use thiserror::Error;

/// Cards sent along with an analysis request, taken from the top of the deck
pub const SAMPLE_SIZE: usize = 5;

/// Analysis errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Deck id does not resolve
    #[error("Deck not found: {0}")]
    UnknownDeck(DeckId),

    /// Nothing to show the analyzer
    #[error("Deck has no cards to analyze")]
    EmptyDeck,

    /// An analysis for this deck is still pending
    #[error("Analysis already in progress for deck {0}")]
    InProgress(DeckId),

    /// Collaborator failed (network, auth, quota, ...)
    #[error("AI analysis failed: {0}")]
    Failed(String),

    /// Collaborator returned no text
    #[error("AI analysis returned an empty response")]
    EmptyResponse,
}

/// Produces a free-text critique of a deck
pub trait DeckAnalyzer {
    /// # Errors
    ///
    /// Returns `AnalysisError::Failed` on any collaborator failure.
    fn analyze(&self, name: &str, notes: &str, sample: &[Arc<CardImage>]) -> Result<String, AnalysisError>;
}

/// Everything an analyzer needs, captured when the request is dispatched
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub deck_id: DeckId,
    pub name: String,
    pub notes: String,
    pub sample: Vec<Arc<CardImage>>,
}

impl AnalysisRequest {
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyDeck` if the deck has no cards.
    pub fn for_deck(deck: &Deck) -> Result<Self, AnalysisError> {
        if deck.is_empty() {
            return Err(AnalysisError::EmptyDeck);
        }
        Ok(Self {
            deck_id: deck.id,
            name: deck.name.clone(),
            notes: deck.notes.clone(),
            sample: deck.cards.iter().take(SAMPLE_SIZE).cloned().collect(),
        })
    }

    /// Run the request against an analyzer
    ///
    /// # Errors
    ///
    /// Propagates analyzer failures; blank text becomes `EmptyResponse`.
    pub fn run(&self, analyzer: &impl DeckAnalyzer) -> Result<String, AnalysisError> {
        let text = analyzer.analyze(&self.name, &self.notes, &self.sample)?;
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        Ok(text)
    }
}
