//! What a card looks like on screen, derived from state

use crate::model::{CardImage, Deck, ImageData, Rotation};

/// Image to draw for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceImage<'a> {
    /// The card's own front image
    Front(&'a ImageData),
    /// The deck's shared back image
    Back(&'a ImageData),
    /// Flipped card in a deck without a back image
    BlankBack,
}

/// Displayed face and rotation of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFace<'a> {
    pub image: FaceImage<'a>,
    pub rotation: Rotation,
}

/// Derive the displayed face of `card` within `deck`
///
/// A flipped card never shows rotation.
#[must_use]
pub fn face_of<'a>(deck: &'a Deck, card: &'a CardImage) -> CardFace<'a> {
    if card.is_flipped {
        CardFace {
            image: deck.back_image.as_ref().map_or(FaceImage::BlankBack, FaceImage::Back),
            rotation: Rotation::Upright,
        }
    } else {
        CardFace {
            image: FaceImage::Front(&card.image),
            rotation: card.rotation,
        }
    }
}

/// One-based position label, e.g. `"3 / 10"`
#[must_use]
pub fn position_label(index: usize, len: usize) -> String {
    format!("{} / {len}", index + 1)
}
