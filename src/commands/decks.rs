//! Deck-level commands - edit, delete, shuffle, clear analysis

use crate::cli::DeckEdits;
use crate::db::DeckRepository;
use crate::model::{DeckSettings, RotationChance};
use crate::shuffle::RandomSource;
use crate::{DeckStore, DeckmasterError};
use colored::Colorize;
use dialoguer::Confirm;

use super::resolve_deck;

type Result<T> = std::result::Result<T, DeckmasterError>;

impl DeckEdits {
    /// Apply the given overrides on top of `settings`
    ///
    /// # Errors
    ///
    /// Returns `DeckmasterError::Form` for an out-of-range rotation chance.
    pub fn apply_to(&self, settings: DeckSettings) -> Result<DeckSettings> {
        Ok(DeckSettings {
            name: self.name.clone().unwrap_or(settings.name),
            notes: self.notes.clone().unwrap_or(settings.notes),
            start_face_down: self.face_down.unwrap_or(settings.start_face_down),
            start_shuffled: self.shuffled.unwrap_or(settings.start_shuffled),
            start_in_browse: self.browse.unwrap_or(settings.start_in_browse),
            rotation_chance: match self.rotation_chance {
                Some(percent) => RotationChance::try_from(percent)?,
                None => settings.rotation_chance,
            },
        })
    }
}

/// Execute the edit command
///
/// # Errors
///
/// Returns an error if the deck cannot be resolved or the new settings are invalid.
pub fn edit<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    edits: &DeckEdits,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    let current = store
        .collection()
        .get(&id)
        .map(|deck| deck.settings())
        .unwrap_or_default();
    let settings = edits.apply_to(current)?;
    let name = settings.name.clone();
    store.update_deck_settings(&id, settings)?;

    if !quiet {
        println!("{} {}", "Updated".green(), name.bold());
    }
    Ok(())
}

/// Execute the delete command, confirming first unless `yes` or `quiet`
///
/// # Errors
///
/// Returns an error if the deck cannot be resolved or the prompt fails.
pub fn delete<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    let name = store
        .collection()
        .get(&id)
        .map(|deck| deck.name.clone())
        .unwrap_or_default();

    if !yes && !confirm(&format!("Delete deck '{name}'?"), quiet)? {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    if store.delete_deck(&id) && !quiet {
        println!("{} {}", "Deleted".red(), name.bold());
    }
    Ok(())
}

/// Execute the shuffle command
///
/// # Errors
///
/// Returns `DeckmasterError::InvalidInput` if the deck cannot be resolved.
pub fn shuffle<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    store.shuffle(&id);

    if !quiet && let Some(deck) = store.collection().get(&id) {
        println!("{} {}", "Shuffled".green(), deck.name.bold());
    }
    Ok(())
}

/// Execute the clear-analysis command
///
/// # Errors
///
/// Returns `DeckmasterError::InvalidInput` if the deck cannot be resolved.
pub fn clear_analysis<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    deck: &str,
    quiet: bool,
) -> Result<()> {
    let id = resolve_deck(store.collection(), deck)?;
    store.clear_analysis(&id);
    if !quiet {
        println!("Analysis cleared.");
    }
    Ok(())
}

/// Prompt user for yes/no confirmation using dialoguer
fn confirm(prompt: &str, quiet: bool) -> Result<bool> {
    if quiet {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| DeckmasterError::InvalidInput(format!("Confirmation failed: {e}")))
}
