//! Card and deck data model
//!
//! Pure shapes plus the invariants they enforce:
//!
//! - `TagList` never contains an empty entry or a duplicate
//! - `RotationChance` is always within 0..=100
//! - `Collection` transforms never edit a deck or card in place

pub mod card;
pub mod collection;
pub mod deck;
pub mod error;

pub use card::{CardImage, ImageData, Rotation, TagList, default_title};
pub use collection::Collection;
pub use deck::{Deck, DeckId, DeckSettings, RotationChance};
pub use error::FormError;
