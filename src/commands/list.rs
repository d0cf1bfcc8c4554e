//! List and show commands - inspect the collection

use crate::db::DeckRepository;
use crate::shuffle::RandomSource;
use crate::{DeckStore, DeckmasterError, output};

use super::resolve_deck;

type Result<T> = std::result::Result<T, DeckmasterError>;

/// Execute the list command
pub fn list<R: DeckRepository, G: RandomSource>(store: &DeckStore<R, G>, quiet: bool) {
    let collection = store.collection();
    if collection.is_empty() {
        if !quiet {
            println!("No decks yet. Import one with 'deckmaster import <archive> --name <name>'.");
        }
        return;
    }

    if !quiet {
        println!("Decks:");
    }
    for deck in collection.iter() {
        println!("{}", output::deck_line(deck, quiet));
    }
}

/// Execute the show command
///
/// Card positions printed are always positions in the full deck, also when
/// a query narrows the list.
///
/// # Errors
///
/// Returns `DeckmasterError::InvalidInput` if the deck cannot be resolved.
pub fn show<R: DeckRepository, G: RandomSource>(
    store: &DeckStore<R, G>,
    deck: &str,
    query: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    let Some(deck) = store.collection().get(&id).cloned() else {
        return Ok(());
    };

    // Selecting would apply open-time shuffles, so filter without selecting
    let visible = store.filter_cards(&id, query.unwrap_or_default());

    if !quiet {
        println!("{}\n", output::deck_header(&deck));
        if visible.is_empty() {
            println!("No cards match.");
        }
    }
    for &index in visible.iter() {
        println!("{}", output::card_line(index, &deck.cards[index], quiet));
    }
    Ok(())
}
