//! Browse command - line-driven card viewer
//!
//! Reads one command per line and feeds it through the viewer's key mapping:
//!
//! - `n` / `next` / `right`: next card
//! - `p` / `prev` / `left`: previous card
//! - `f` / `flip` / empty line: flip the card
//! - `b` / `esc`: back out one level (browse, then detail, then exit)
//! - `s` / `shuffle`: shuffle the deck and restart
//! - `q` / `quit`: exit

use crate::db::DeckRepository;
use crate::shuffle::RandomSource;
use crate::viewer::{InputEvent, Key, ViewMode};
use crate::{DeckStore, DeckmasterError, output};
use colored::Colorize;
use std::io::{self, BufRead, Write};

use super::resolve_deck;

type Result<T> = std::result::Result<T, DeckmasterError>;

/// One parsed line of viewer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Key(Key),
    Shuffle,
    Quit,
    Unknown,
}

fn parse_action(line: &str) -> Action {
    match line.trim().to_lowercase().as_str() {
        "n" | "next" | "right" => Action::Key(Key::ArrowRight),
        "p" | "prev" | "left" => Action::Key(Key::ArrowLeft),
        "" | "f" | "flip" => Action::Key(Key::Space),
        "b" | "esc" | "back" => Action::Key(Key::Escape),
        "s" | "shuffle" => Action::Shuffle,
        "q" | "quit" | "exit" => Action::Quit,
        _ => Action::Unknown,
    }
}

/// Execute the browse command on stdin/stdout
///
/// # Errors
///
/// Returns an error if the deck cannot be resolved or the terminal fails.
pub fn execute<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    quiet: bool,
) -> Result<()> {
    let stdin = io::stdin();
    run(store, deck, stdin.lock(), io::stdout(), quiet)
}

/// Run the viewer loop over arbitrary input and output
///
/// # Errors
///
/// Returns an error if the deck cannot be resolved or reading or writing fails.
pub fn run<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    input: impl BufRead,
    mut out: impl Write,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    store.select_deck(&id);

    if store.view().mode() == ViewMode::DeckOpen {
        store.open_card(0);
        store.enter_browse();
    }
    if !store.view().card_is_open() {
        writeln!(out, "Deck has no cards.")?;
        return Ok(());
    }

    if !quiet {
        writeln!(out, "{}", "n/p: move  f: flip  b: back  s: shuffle  q: quit".dimmed())?;
    }
    render(store, &mut out)?;

    for line in input.lines() {
        match parse_action(&line?) {
            Action::Key(key) => {
                store.handle_input(InputEvent::Key(key));
            }
            Action::Shuffle => store.shuffle(&id),
            Action::Quit => break,
            Action::Unknown => {
                writeln!(out, "{}", "Unknown command".yellow())?;
                continue;
            }
        }
        if !store.view().card_is_open() {
            break;
        }
        render(store, &mut out)?;
    }

    store.deselect();
    Ok(())
}

fn render<R: DeckRepository, G: RandomSource>(store: &DeckStore<R, G>, out: &mut impl Write) -> Result<()> {
    if let (Some(deck), Some(index)) = (store.selected_deck(), store.view().active_index()) {
        let mode = match store.view().mode() {
            ViewMode::Browse => "browse",
            _ => "detail",
        };
        writeln!(out, "[{mode}] {}", output::card_view(deck, index))?;
    }
    Ok(())
}
