//! Testing utilities for deckmaster
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management and
//! deterministic stand-ins for the random source and the external
//! collaborators.
//!
//! Only available when compiled with `cfg(test)`.

use crate::analysis::{AnalysisError, DeckAnalyzer};
use crate::db::Database;
use crate::import::{ArchiveError, ExtractedImage, ImageExtractor};
use crate::model::{CardImage, Collection, Deck, DeckId, DeckSettings, ImageData};
use crate::shuffle::RandomSource;
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::TempDir;

/// sled database in a temporary directory, removed on drop
pub struct TestDb {
    // Field order matters: the database must close before the directory goes
    db: Database,
    _dir: TempDir,
}

impl TestDb {
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db")).expect("Failed to open test database");
        Self { db, _dir: dir }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }
}

/// Random source replaying fixed draws
///
/// Indices are clamped to the requested bound. Once exhausted, indices fall
/// back to `upper` (no swap) and units to `0.999` (no inversion below 100%).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            units: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units = units.into_iter().collect();
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn index_through(&mut self, upper: usize) -> usize {
        self.indices.pop_front().map_or(upper, |i| i.min(upper))
    }

    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.999)
    }
}

/// Analyzer with a canned outcome that records what it was shown
pub struct FakeAnalyzer {
    outcome: Result<String, AnalysisError>,
    calls: Mutex<Vec<(String, String, usize)>>,
}

impl FakeAnalyzer {
    #[must_use]
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Mutex::default(),
        }
    }

    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(AnalysisError::Failed(message.to_string())),
            calls: Mutex::default(),
        }
    }

    /// `(name, notes, sample size)` per call
    pub fn calls(&self) -> Vec<(String, String, usize)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl DeckAnalyzer for FakeAnalyzer {
    fn analyze(&self, name: &str, notes: &str, sample: &[Arc<CardImage>]) -> Result<String, AnalysisError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_string(), notes.to_string(), sample.len()));
        self.outcome.clone()
    }
}

/// Extractor returning fixed images, or failing as a corrupt archive
pub struct FakeExtractor {
    images: Option<Vec<ExtractedImage>>,
}

impl FakeExtractor {
    #[must_use]
    pub const fn with_images(images: Vec<ExtractedImage>) -> Self {
        Self { images: Some(images) }
    }

    #[must_use]
    pub const fn corrupt() -> Self {
        Self { images: None }
    }
}

impl ImageExtractor for FakeExtractor {
    fn extract_images(&self, _archive: &[u8]) -> Result<Vec<ExtractedImage>, ArchiveError> {
        self.images
            .clone()
            .ok_or(ArchiveError::Corrupt(zip::result::ZipError::FileNotFound))
    }
}

/// PNG fixture whose bytes are its own name
#[must_use]
pub fn png(name: &str) -> ExtractedImage {
    ExtractedImage::new(name, name.as_bytes().to_vec(), "image/png")
}

/// In-memory zip archive with the given `(path, contents)` entries
///
/// # Panics
/// Panics if the zip writer fails.
#[must_use]
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (path, contents) in entries {
        writer.start_file(*path, options).expect("Failed to start zip entry");
        writer.write_all(contents).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Deck with `n` face-up cards named `card{i}.png`
#[must_use]
pub fn deck_named(name: &str, n: usize) -> Deck {
    let cards = (0..n)
        .map(|i| CardImage::new(format!("card{i}.png"), ImageData::from_uri(format!("img{i}")), "image/png"))
        .collect();
    Deck::new(DeckSettings::named(name), cards, None)
}

/// Collection holding one `n`-card deck, plus that deck's id
#[must_use]
pub fn sample_collection(n: usize) -> (Collection, DeckId) {
    let deck = deck_named("sample", n);
    let id = deck.id;
    (Collection::from(vec![deck]), id)
}
