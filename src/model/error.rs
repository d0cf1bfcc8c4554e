//! Validation errors for deck settings
//!
//! Raised when form input (import or edit) does not describe a valid deck.

use thiserror::Error;

/// Deck form validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Deck name is empty or whitespace
    #[error("Deck name is required")]
    MissingName,

    /// Rotation chance outside of 0..=100
    #[error("Rotation chance must be between 0 and 100, got {0}")]
    RotationChanceOutOfRange(u32),
}
