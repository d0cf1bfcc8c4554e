//! Deckmaster CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Import a deck from a zip of images
//! deckmaster import tarot.zip --name Tarot --face-down --rotation-chance 25
//!
//! # List decks and show one
//! deckmaster list
//! deckmaster show Tarot --query moon
//!
//! # Edit cards (positions are 1-based)
//! deckmaster title Tarot 3 "The Empress"
//! deckmaster tag add Tarot 3 major
//!
//! # Step through a deck
//! deckmaster browse Tarot
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/deckmaster/config.toml` on Linux) and created on first run.

use deckmaster::{
    DeckStore, DeckmasterError,
    cli::{Cli, Commands},
    commands::{self, cards::CardEdit},
    config::DeckmasterConfig,
    db::Database,
    import::ZipExtractor,
    logging,
    shuffle::RngSource,
};

type Result<T> = std::result::Result<T, DeckmasterError>;

/// Main entry point for the deckmaster application
///
/// Loads configuration, opens the database, loads the collection and
/// dispatches to the command handler. Every change is saved by the store as
/// it happens.
///
/// # Errors
///
/// Returns `DeckmasterError` if configuration loading fails, the database
/// cannot be opened, or the command fails.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = DeckmasterConfig::load()?;
    logging::init_logging(&config.log_level, config.log_json);

    let quiet = cli.quiet || config.quiet;
    let db_path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let db = Database::open(&db_path)?;
    let rng = match cli.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let mut store = DeckStore::new(&db, rng)
        .with_swipe_threshold(config.swipe_threshold)
        .with_search_capacity(config.search_cache_capacity);
    store.load();

    match &cli.command {
        Commands::Import { archive, options } => {
            commands::import(&mut store, &ZipExtractor, archive, options, quiet)?;
        }
        Commands::List => commands::list(&store, quiet),
        Commands::Show { deck, query } => commands::show(&store, deck, query.as_deref(), quiet)?,
        Commands::Edit { deck, edits } => commands::decks::edit(&mut store, deck, edits, quiet)?,
        Commands::Delete { deck, yes } => commands::decks::delete(&mut store, deck, *yes, quiet)?,
        Commands::Shuffle { deck } => commands::decks::shuffle(&mut store, deck, quiet)?,
        Commands::ClearAnalysis { deck } => commands::decks::clear_analysis(&mut store, deck, quiet)?,
        Commands::Flip { deck, card } => {
            commands::cards::execute(&mut store, deck, *card, CardEdit::Flip, quiet)?;
        }
        Commands::Title { deck, card, title } => {
            commands::cards::execute(&mut store, deck, *card, CardEdit::Title(title), quiet)?;
        }
        Commands::Note { deck, card, note } => {
            commands::cards::execute(&mut store, deck, *card, CardEdit::Note(note), quiet)?;
        }
        Commands::Tag { command } => {
            let (deck, card, edit) = command.as_edit();
            commands::cards::execute(&mut store, deck, card, edit, quiet)?;
        }
        Commands::Browse { deck } => commands::browse(&mut store, deck, quiet)?,
    }

    db.flush()?;
    Ok(())
}
