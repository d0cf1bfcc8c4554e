//! Output formatting for CLI display
//!
//! This module provides utilities for formatting decks and cards in the CLI.
//! Quiet variants drop decoration so output can be piped.

use crate::model::{CardImage, Deck, Rotation};
use crate::viewer::{FaceImage, face_of, position_label};
use colored::Colorize;

/// Short form of a deck id used in listings
#[must_use]
pub fn short_id(deck: &Deck) -> String {
    deck.id.to_string().chars().take(8).collect()
}

/// One line per deck for `list`
#[must_use]
pub fn deck_line(deck: &Deck, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", deck.id, deck.name);
    }

    let mut flags = Vec::new();
    if deck.start_face_down {
        flags.push("face-down");
    }
    if deck.start_shuffled {
        flags.push("shuffled");
    }
    if deck.start_in_browse {
        flags.push("browse");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };

    format!(
        "  {} {} ({} card(s), {}% inverted){}",
        short_id(deck).dimmed(),
        deck.name.bold(),
        deck.len(),
        deck.rotation_chance.percent(),
        flags.cyan()
    )
}

/// One line per card for `show`; `index` is 0-based
#[must_use]
pub fn card_line(index: usize, card: &CardImage, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", index + 1, card.title);
    }

    let mut line = format!("  {:>3}. {}", index + 1, card.title);
    if card.is_flipped {
        line.push_str(&format!(" {}", "(face down)".dimmed()));
    }
    if card.rotation == Rotation::Inverted {
        line.push_str(&format!(" {}", "(inverted)".yellow()));
    }
    if !card.tags.is_empty() {
        let tags: Vec<_> = card.tags.iter().collect();
        line.push_str(&format!(" [{}]", tags.join(", ").green()));
    }
    if !card.note.is_empty() {
        line.push_str(&format!(" - {}", card.note.italic()));
    }
    line
}

/// Header block for `show`
#[must_use]
pub fn deck_header(deck: &Deck) -> String {
    let mut header = format!(
        "{} {}\nCreated {}",
        deck.name.bold(),
        format!("({})", deck.id).dimmed(),
        deck.created_at.format("%Y-%m-%d %H:%M")
    );
    if !deck.notes.is_empty() {
        header.push_str(&format!("\n{}", deck.notes));
    }
    if let Some(analysis) = &deck.analysis {
        header.push_str(&format!("\n\n{}\n{analysis}", "Analysis".underline()));
    }
    header
}

/// The card currently shown by `browse`
#[must_use]
pub fn card_view(deck: &Deck, index: usize) -> String {
    let Some(card) = deck.card(index) else {
        return "(no card)".dimmed().to_string();
    };
    let face = face_of(deck, card);
    let shown = match face.image {
        FaceImage::Front(_) => format!("{} ({})", card.title.bold(), card.name),
        FaceImage::Back(_) => "[card back]".dimmed().to_string(),
        FaceImage::BlankBack => "[blank back]".dimmed().to_string(),
    };
    let rotation = match face.rotation {
        Rotation::Inverted => " inverted".yellow().to_string(),
        Rotation::Upright => String::new(),
    };

    let mut view = format!("{}  {shown}{rotation}", position_label(index, deck.len()).cyan());
    if !card.is_flipped {
        if !card.tags.is_empty() {
            let tags: Vec<_> = card.tags.iter().collect();
            view.push_str(&format!("\n  tags: {}", tags.join(", ").green()));
        }
        if !card.note.is_empty() {
            view.push_str(&format!("\n  note: {}", card.note));
        }
    }
    view
}
