//! Deck import pipeline
//!
//! Turns the images extracted from an uploaded archive plus the create-deck
//! form into a new [`Deck`]:
//!
//! ```text
//! archive bytes ─▶ ImageExtractor ─▶ [ExtractedImage] ─▶ build_deck ─▶ Deck
//!                                          │
//!                                          └─ first "card back" match ─▶ back_image
//! ```
//!
//! Filenames matching `(card-?)?backs?.(jpg|jpeg|png|gif|webp)` (case-insensitive,
//! anywhere in the name) are never cards. The first one becomes the deck's back
//! image and any later ones are dropped.

pub mod archive;
pub mod error;

pub use archive::{ExtractedImage, ImageExtractor, ZipExtractor};
pub use error::{ArchiveError, ImportError};

use crate::model::{CardImage, Deck, DeckSettings, ImageData};
use regex::Regex;
use std::sync::LazyLock;

static CARD_BACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(card-?)?backs?\.(jpg|jpeg|png|gif|webp)").expect("card back pattern is valid")
});

/// Create-deck form as submitted
#[derive(Debug, Clone, Default)]
pub struct ImportForm {
    pub settings: DeckSettings,
}

impl ImportForm {
    #[must_use]
    pub const fn new(settings: DeckSettings) -> Self {
        Self { settings }
    }
}

/// Whether `filename` names the shared card back
#[must_use]
pub fn is_card_back(filename: &str) -> bool {
    CARD_BACK.is_match(filename)
}

/// Split extracted images into the back image and the card list
///
/// Order of the remaining cards follows extraction order.
#[must_use]
pub fn partition_back_image(images: Vec<ExtractedImage>) -> (Option<ExtractedImage>, Vec<ExtractedImage>) {
    let mut back = None;
    let mut fronts = Vec::with_capacity(images.len());

    for image in images {
        if is_card_back(&image.filename) {
            if back.is_none() {
                back = Some(image);
            }
            continue;
        }
        fronts.push(image);
    }

    (back, fronts)
}

/// Build a validated deck from extracted images and form settings
///
/// # Errors
///
/// Returns `ImportError::Form` if the settings do not validate, or
/// `ImportError::NoImages` if no card images remain after the back image is
/// set aside.
pub fn build_deck(images: Vec<ExtractedImage>, form: ImportForm) -> Result<Deck, ImportError> {
    form.settings.validate()?;

    let (back, fronts) = partition_back_image(images);
    if fronts.is_empty() {
        return Err(ImportError::NoImages);
    }

    let face_down = form.settings.start_face_down;
    let cards = fronts
        .into_iter()
        .map(|image| {
            let data = ImageData::from_bytes(&image.bytes, &image.mime_type);
            CardImage::new(image.filename, data, image.mime_type).face_down(face_down)
        })
        .collect();
    let back_image = back.map(|image| ImageData::from_bytes(&image.bytes, &image.mime_type));

    Ok(Deck::new(form.settings, cards, back_image))
}
