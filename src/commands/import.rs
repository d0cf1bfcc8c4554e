//! Import command - create a deck from a zip archive

use crate::cli::DeckOptions;
use crate::db::DeckRepository;
use crate::import::{ImageExtractor, ImportForm};
use crate::model::{DeckId, DeckSettings, RotationChance};
use crate::shuffle::RandomSource;
use crate::{DeckStore, DeckmasterError};
use colored::Colorize;
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, DeckmasterError>;

impl TryFrom<&DeckOptions> for DeckSettings {
    type Error = DeckmasterError;

    fn try_from(options: &DeckOptions) -> Result<Self> {
        Ok(Self {
            name: options.name.clone(),
            notes: options.notes.clone(),
            start_face_down: options.face_down,
            start_shuffled: options.shuffled,
            start_in_browse: options.browse,
            rotation_chance: RotationChance::try_from(options.rotation_chance)?,
        })
    }
}

/// Execute the import command
///
/// # Errors
///
/// Returns an error if the archive cannot be read or the import is rejected.
pub fn execute<R: DeckRepository, G: RandomSource>(
    store: &mut DeckStore<R, G>,
    extractor: &impl ImageExtractor,
    archive: &Path,
    options: &DeckOptions,
    quiet: bool,
) -> Result<DeckId> {
    let form = ImportForm::new(DeckSettings::try_from(options)?);
    let bytes = fs::read(archive)?;
    let id = store.import_archive(extractor, Some(bytes.as_slice()), form)?;

    if quiet {
        println!("{id}");
    } else if let Some(deck) = store.collection().get(&id) {
        println!(
            "{} {} with {} card(s){}",
            "Imported".green(),
            deck.name.bold(),
            deck.len(),
            if deck.back_image.is_some() { " and a card back" } else { "" }
        );
    }
    Ok(id)
}
