//! Deck entity, identifiers and editable settings

use super::card::{CardImage, ImageData};
use super::error::FormError;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Unique, immutable deck identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(Uuid);

impl DeckId {
    /// Generate a fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeckId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Percent probability (0..=100) that a card is inverted on shuffle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RotationChance(u8);

impl RotationChance {
    pub const NEVER: Self = Self(0);
    pub const ALWAYS: Self = Self(100);

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Probability in `[0, 1]`
    #[must_use]
    pub fn probability(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<u32> for RotationChance {
    type Error = FormError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(FormError::RotationChanceOutOfRange(percent))
    }
}

impl From<RotationChance> for u32 {
    fn from(chance: RotationChance) -> Self {
        Self::from(chance.0)
    }
}

/// User-editable deck settings shared by the import and edit forms
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckSettings {
    pub name: String,
    pub notes: String,
    pub start_face_down: bool,
    pub start_shuffled: bool,
    pub start_in_browse: bool,
    pub rotation_chance: RotationChance,
}

impl DeckSettings {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `FormError::MissingName` if the name is blank.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(())
    }
}

/// Ordered collection of cards plus shared presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub cards: Vec<Arc<CardImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image: Option<ImageData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default)]
    pub start_face_down: bool,
    #[serde(default)]
    pub start_shuffled: bool,
    #[serde(default)]
    pub start_in_browse: bool,
    #[serde(default)]
    pub rotation_chance: RotationChance,
}

impl Deck {
    /// Create a deck with a fresh id stamped with the current time
    #[must_use]
    pub fn new(settings: DeckSettings, cards: Vec<CardImage>, back_image: Option<ImageData>) -> Self {
        Self {
            id: DeckId::generate(),
            name: settings.name,
            notes: settings.notes,
            // Stored with millisecond precision
            created_at: Utc::now().trunc_subsecs(3),
            cards: cards.into_iter().map(Arc::new).collect(),
            back_image,
            analysis: None,
            start_face_down: settings.start_face_down,
            start_shuffled: settings.start_shuffled,
            start_in_browse: settings.start_in_browse,
            rotation_chance: settings.rotation_chance,
        }
    }

    /// Current editable settings, e.g. to prefill an edit form
    #[must_use]
    pub fn settings(&self) -> DeckSettings {
        DeckSettings {
            name: self.name.clone(),
            notes: self.notes.clone(),
            start_face_down: self.start_face_down,
            start_shuffled: self.start_shuffled,
            start_in_browse: self.start_in_browse,
            rotation_chance: self.rotation_chance,
        }
    }

    /// Copy of this deck with `settings` applied; cards are untouched
    #[must_use]
    pub fn with_settings(&self, settings: DeckSettings) -> Self {
        Self {
            name: settings.name,
            notes: settings.notes,
            start_face_down: settings.start_face_down,
            start_shuffled: settings.start_shuffled,
            start_in_browse: settings.start_in_browse,
            rotation_chance: settings.rotation_chance,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Arc<CardImage>> {
        self.cards.get(index)
    }
}
