//! Navigation and viewer state machine
//!
//! UI-agnostic: a front end feeds [`InputEvent`]s and renders from
//! [`ViewState`] plus [`face_of`]. The controller in [`crate::store`] owns the
//! current state and applies commands that need the collection (flip,
//! shuffle, deck selection).
//!
//! # Architecture
//!
//! - `state`: modes and pure transitions
//! - `input`: keyboard and swipe mapping
//! - `display`: displayed face derivation

pub mod display;
pub mod input;
pub mod state;

pub use display::{CardFace, FaceImage, face_of, position_label};
pub use input::{DEFAULT_SWIPE_THRESHOLD, InputEvent, Key, NavCommand, SwipeTracker, map_input};
pub use state::{ViewMode, ViewState};
