//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against a loaded [`DeckStore`].

pub mod browse;
pub mod cards;
pub mod decks;
pub mod import;
pub mod list;

pub use browse::execute as browse;
pub use import::execute as import;
pub use list::{list, show};

use crate::db::DeckRepository;
use crate::model::{Collection, DeckId};
use crate::shuffle::RandomSource;
use crate::{DeckStore, DeckmasterError};

type Result<T> = std::result::Result<T, DeckmasterError>;

/// Resolve a deck reference: full id, exact name, or unique id prefix
///
/// A name wins over a prefix only when the prefix matches nothing else.
///
/// # Errors
///
/// Returns `DeckmasterError::InvalidInput` if nothing or more than one deck
/// matches.
pub fn resolve_deck(collection: &Collection, reference: &str) -> Result<DeckId> {
    if let Ok(id) = reference.parse::<DeckId>()
        && collection.contains(&id)
    {
        return Ok(id);
    }

    let by_prefix: Vec<_> = collection
        .iter()
        .filter(|deck| deck.id.to_string().starts_with(reference))
        .collect();
    let by_name: Vec<_> = collection.iter().filter(|deck| deck.name == reference).collect();

    match (by_name.as_slice(), by_prefix.as_slice()) {
        ([named], prefixed) if prefixed.iter().all(|deck| deck.id == named.id) => Ok(named.id),
        ([], [deck]) => Ok(deck.id),
        ([], []) => Err(DeckmasterError::InvalidInput(format!("No deck matches '{reference}'"))),
        _ => Err(DeckmasterError::InvalidInput(format!(
            "'{reference}' matches more than one deck; use the full id"
        ))),
    }
}

/// Convert a 1-based card position to an index into `deck`
///
/// # Errors
///
/// Returns `DeckmasterError::InvalidInput` if the position is outside the deck.
pub fn card_index<R: DeckRepository, G: RandomSource>(
    store: &DeckStore<R, G>,
    deck: &DeckId,
    position: usize,
) -> Result<usize> {
    let len = store.collection().get(deck).map_or(0, |deck| deck.len());
    if position == 0 || position > len {
        return Err(DeckmasterError::InvalidInput(format!(
            "Card {position} does not exist (deck has {len} card(s))"
        )));
    }
    Ok(position - 1)
}
