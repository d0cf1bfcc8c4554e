//! Keyboard and swipe input mapped to navigation commands
//!
//! Mapping is pure: an input event plus the current view state (and the swipe
//! tracker, which remembers the touch in progress) yields at most one
//! [`NavCommand`]. The controller applies the command.

use super::state::ViewState;

/// Horizontal swipe distance that counts as navigation
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`"ArrowLeft"`, `" "`, `"Enter"`, ...)
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            " " | "Space" | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Raw input delivered by a front end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
}

/// Navigation command resolved from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Previous,
    Next,
    Flip,
    Escape,
}

/// Touch in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<f32>,
    end: Option<f32>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    #[must_use]
    pub const fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn start(&mut self, x: f32) {
        self.start = Some(x);
        self.end = None;
    }

    pub fn move_to(&mut self, x: f32) {
        self.end = Some(x);
    }

    /// Finish the touch and reset; returns the swipe direction if any
    ///
    /// Dragging leftward (start right of end) advances.
    pub fn finish(&mut self) -> Option<NavCommand> {
        let (start, end) = (self.start.take(), self.end.take());
        let delta = start? - end?;
        if delta > self.threshold {
            Some(NavCommand::Next)
        } else if delta < -self.threshold {
            Some(NavCommand::Previous)
        } else {
            None
        }
    }
}

/// Resolve one input event against the current view
///
/// Keys are ignored unless a card is open. Touch events always update the
/// tracker; a completed swipe only yields a command while a card is open.
pub fn map_input(state: &ViewState, tracker: &mut SwipeTracker, event: InputEvent) -> Option<NavCommand> {
    match event {
        InputEvent::Key(key) => {
            if !state.card_is_open() {
                return None;
            }
            match key {
                Key::ArrowLeft => Some(NavCommand::Previous),
                Key::ArrowRight => Some(NavCommand::Next),
                Key::Space | Key::Enter => Some(NavCommand::Flip),
                Key::Escape => Some(NavCommand::Escape),
                Key::Other => None,
            }
        }
        InputEvent::TouchStart { x } => {
            tracker.start(x);
            None
        }
        InputEvent::TouchMove { x } => {
            tracker.move_to(x);
            None
        }
        InputEvent::TouchEnd => tracker.finish().filter(|_| state.card_is_open()),
    }
}
