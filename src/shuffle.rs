//! Shuffle and rotation engine
//!
//! A shuffle is a uniform permutation of a deck's cards (backward
//! Fisher–Yates) followed by a fresh presentation pass: every card goes back to
//! the deck's start face, and each one is independently inverted with the
//! deck's rotation chance.
//!
//! Randomness comes from a [`RandomSource`] so callers can inject a scripted
//! sequence; [`RngSource`] adapts any `rand` generator.

use crate::model::{CardImage, Deck, Rotation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Source of the random draws a shuffle needs
pub trait RandomSource {
    /// Uniform index in `0..=upper`
    fn index_through(&mut self, upper: usize) -> usize;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;
}

/// [`RandomSource`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub const fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Source seeded from the operating system
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible source, e.g. for `--seed`
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index_through(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..=upper)
    }

    fn unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Permute `cards` in place with a backward Fisher–Yates pass
pub fn permute<T>(cards: &mut [T], rng: &mut impl RandomSource) {
    for i in (1..cards.len()).rev() {
        let j = rng.index_through(i);
        cards.swap(i, j);
    }
}

/// Shuffle a deck and re-roll every card's face and rotation
///
/// Card count and identity (by content) are preserved; only order,
/// `is_flipped` and `rotation` change.
#[must_use]
pub fn shuffle_deck(deck: &Deck, rng: &mut impl RandomSource) -> Deck {
    let mut cards = deck.cards.clone();
    permute(&mut cards, rng);

    let probability = deck.rotation_chance.probability();
    let cards = cards
        .into_iter()
        .map(|card| {
            let rotation = if rng.unit() < probability {
                Rotation::Inverted
            } else {
                Rotation::Upright
            };
            Arc::new(CardImage {
                is_flipped: deck.start_face_down,
                rotation,
                ..CardImage::clone(&card)
            })
        })
        .collect();

    Deck {
        cards,
        ..deck.clone()
    }
}
