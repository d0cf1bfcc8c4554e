//! Search over a deck's cards
//!
//! Filtering only narrows what the grid shows. Positions returned are always
//! indices into the deck's unfiltered card order, which is what detail and
//! browse navigation use.

pub mod cache;
pub mod filter;

pub use cache::SearchCache;
pub use filter::{card_matches, filter_indices, normalize_query};
