//! Card-level commands - flip, title, note, tags

use crate::cli::TagCommands;
use crate::db::DeckRepository;
use crate::shuffle::RandomSource;
use crate::{DeckStore, DeckmasterError, output};

use super::{card_index, resolve_deck};

type Result<T> = std::result::Result<T, DeckmasterError>;

/// Edit applied by one of the card commands
#[derive(Debug, Clone, Copy)]
pub enum CardEdit<'a> {
    Flip,
    Title(&'a str),
    Note(&'a str),
    AddTag(&'a str),
    RemoveTag(&'a str),
}

impl TagCommands {
    /// Deck reference, card position and edit for this tag command
    #[must_use]
    pub fn as_edit(&self) -> (&str, usize, CardEdit<'_>) {
        match self {
            Self::Add { deck, card, tag } => (deck, *card, CardEdit::AddTag(tag)),
            Self::Remove { deck, card, tag } => (deck, *card, CardEdit::RemoveTag(tag)),
        }
    }
}

/// Execute a card edit against card `position` (1-based) of `deck`
///
/// # Errors
///
/// Returns `DeckmasterError::InvalidInput` if the deck or card cannot be resolved.
pub fn execute<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    position: usize,
    edit: CardEdit<'_>,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    let index = card_index(store, &id, position)?;

    match edit {
        CardEdit::Flip => store.toggle_flip(&id, index),
        CardEdit::Title(title) => store.set_title(&id, index, title),
        CardEdit::Note(note) => store.set_note(&id, index, note),
        CardEdit::AddTag(tag) => store.add_tag(&id, index, tag),
        CardEdit::RemoveTag(tag) => store.remove_tag(&id, index, tag),
    }

    if !quiet && let Some(card) = store.collection().get(&id).and_then(|deck| deck.card(index)) {
        println!("{}", output::card_line(index, card, false));
    }
    Ok(())
}
