//! Deckmaster - a personal collection manager for image card decks
//!
//! Decks are imported from zip archives of images, browsed card by card,
//! shuffled with an optional per-card inversion chance, and annotated with
//! titles, tags and notes. The whole collection is kept in an embedded
//! database and saved after every change.
//!
//! # Architecture
//!
//! - [`model`]: decks, cards and the immutable collection
//! - [`import`]: archive extraction and deck construction
//! - [`shuffle`]: permutation and rotation rolls over an injected random source
//! - [`mutations`]: pure collection transforms for card and deck edits
//! - [`viewer`]: view state machine and input mapping
//! - [`search`]: card filtering and its memo cache
//! - [`analysis`]: contract for the AI critique collaborator
//! - [`db`]: persistence seam and the sled backend
//! - [`store`]: the controller tying all of the above together

use thiserror::Error;

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod mutations;
pub mod output;
pub mod search;
pub mod shuffle;
pub mod store;
pub mod viewer;

#[cfg(test)]
pub mod testing;

pub use model::{CardImage, Collection, Deck, DeckId, DeckSettings};
pub use store::DeckStore;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DeckmasterError {
    /// Persistence error
    #[error("Database error: {0}")]
    Persistence(#[from] db::PersistenceError),
    /// Import error
    #[error("Import error: {0}")]
    Import(#[from] import::ImportError),
    /// Archive error
    #[error("Archive error: {0}")]
    Archive(#[from] import::ArchiveError),
    /// Deck form error
    #[error("Invalid deck settings: {0}")]
    Form(#[from] model::FormError),
    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(#[from] analysis::AnalysisError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
