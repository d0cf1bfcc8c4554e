//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for deckmaster using the `clap` crate.
//!
//! # Commands
//!
//! - **import**: Create a deck from a zip archive of images
//! - **list** / **show**: Inspect the collection and a deck's cards
//! - **edit** / **delete** / **clear-analysis**: Deck-level changes
//! - **shuffle** / **flip** / **title** / **note** / **tag**: Card-level changes
//! - **browse**: Line-driven card viewer
//!
//! Decks are addressed by full id, a unique id prefix, or exact name. Cards
//! are addressed by their 1-based position as printed by `show`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "deckmaster")]
#[command(about = "A collection manager for image card decks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database directory (overrides config)
    #[arg(long = "db", global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Seed for shuffles, for reproducible runs
    #[arg(long = "seed", global = true, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Deck settings shared by `import`
#[derive(Args, Debug, Clone)]
pub struct DeckOptions {
    /// Deck name
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// Free-form deck notes
    #[arg(long = "notes", default_value = "")]
    pub notes: String,

    /// New and shuffled cards start face down
    #[arg(long = "face-down")]
    pub face_down: bool,

    /// Shuffle the deck whenever it is opened
    #[arg(long = "shuffled")]
    pub shuffled: bool,

    /// Open the deck straight into browse
    #[arg(long = "browse")]
    pub browse: bool,

    /// Percent chance (0-100) that each card is inverted on shuffle
    #[arg(short = 'r', long = "rotation-chance", default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub rotation_chance: u32,
}

/// Optional overrides for `edit`; omitted fields keep their value
#[derive(Args, Debug, Clone, Default)]
pub struct DeckEdits {
    /// New deck name
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// New deck notes
    #[arg(long = "notes")]
    pub notes: Option<String>,

    /// Start face down
    #[arg(long = "face-down", value_name = "BOOL")]
    pub face_down: Option<bool>,

    /// Shuffle when opened
    #[arg(long = "shuffled", value_name = "BOOL")]
    pub shuffled: Option<bool>,

    /// Open straight into browse
    #[arg(long = "browse", value_name = "BOOL")]
    pub browse: Option<bool>,

    /// Percent chance (0-100) of inversion on shuffle
    #[arg(short = 'r', long = "rotation-chance")]
    pub rotation_chance: Option<u32>,
}

/// Tag subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagCommands {
    /// Add a tag to a card
    Add {
        deck: String,
        /// 1-based card position
        card: usize,
        tag: String,
    },
    /// Remove a tag from a card
    Remove {
        deck: String,
        /// 1-based card position
        card: usize,
        tag: String,
    },
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Import a deck from a zip archive of images
    #[command(visible_alias = "i")]
    Import {
        /// Zip archive to read
        archive: PathBuf,

        #[command(flatten)]
        options: DeckOptions,
    },

    /// List all decks
    #[command(visible_alias = "ls")]
    List,

    /// Show a deck and its cards
    Show {
        deck: String,

        /// Only list cards whose title, tags or note contain this text
        #[arg(long = "query")]
        query: Option<String>,
    },

    /// Change deck settings
    Edit {
        deck: String,

        #[command(flatten)]
        edits: DeckEdits,
    },

    /// Delete a deck
    Delete {
        deck: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Shuffle a deck
    Shuffle { deck: String },

    /// Flip a card face up or face down
    Flip {
        deck: String,
        /// 1-based card position
        card: usize,
    },

    /// Set a card's title
    Title {
        deck: String,
        /// 1-based card position
        card: usize,
        title: String,
    },

    /// Set a card's note
    Note {
        deck: String,
        /// 1-based card position
        card: usize,
        note: String,
    },

    /// Add or remove card tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Step through a deck card by card
    #[command(visible_alias = "b")]
    Browse { deck: String },

    /// Remove a deck's stored analysis
    ClearAnalysis { deck: String },
}
