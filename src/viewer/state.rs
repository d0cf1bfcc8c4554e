//! View modes and index navigation
//!
//! ```text
//!            select                open card              enter browse
//!   Grid ──────────────▶ DeckOpen ───────────▶ Detail ───────────────▶ Browse
//!    ▲                      ▲  ◀─── close/esc ───┘  ◀──── exit/esc ──────┘
//!    └────── deselect ──────┴───────────────────────────────────────────────
//! ```
//!
//! All transitions are pure: they take the current state and return the next.
//! Transitions that do not apply to the current mode return it unchanged.

use crate::model::{Deck, DeckId};

/// Presentation mode without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    DeckOpen,
    Detail,
    Browse,
}

/// Current view, including the selected deck and active card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// No deck selected
    #[default]
    Grid,

    /// Deck selected, its cards shown as a grid
    DeckOpen { deck: DeckId },

    /// Single card in the detail modal
    Detail { deck: DeckId, index: usize },

    /// Fullscreen, one card at a time
    Browse { deck: DeckId, index: usize },
}

impl ViewState {
    /// State right after selecting `deck`
    ///
    /// Jumps straight into browse at the first card when the deck asks for it
    /// and has at least one card.
    #[must_use]
    pub fn opened(deck: &Deck) -> Self {
        if deck.start_in_browse && !deck.is_empty() {
            Self::Browse {
                deck: deck.id,
                index: 0,
            }
        } else {
            Self::DeckOpen { deck: deck.id }
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        match self {
            Self::Grid => ViewMode::Grid,
            Self::DeckOpen { .. } => ViewMode::DeckOpen,
            Self::Detail { .. } => ViewMode::Detail,
            Self::Browse { .. } => ViewMode::Browse,
        }
    }

    #[must_use]
    pub const fn selected_deck(&self) -> Option<DeckId> {
        match self {
            Self::Grid => None,
            Self::DeckOpen { deck } | Self::Detail { deck, .. } | Self::Browse { deck, .. } => Some(*deck),
        }
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        match self {
            Self::Detail { index, .. } | Self::Browse { index, .. } => Some(*index),
            Self::Grid | Self::DeckOpen { .. } => None,
        }
    }

    /// Whether a card is showing (detail or browse)
    #[must_use]
    pub const fn card_is_open(&self) -> bool {
        self.active_index().is_some()
    }

    /// DeckOpen → Detail at `index` (an unfiltered position)
    #[must_use]
    pub const fn open_card(self, index: usize) -> Self {
        match self {
            Self::DeckOpen { deck } => Self::Detail { deck, index },
            other => other,
        }
    }

    /// Detail → DeckOpen
    #[must_use]
    pub const fn close_card(self) -> Self {
        match self {
            Self::Detail { deck, .. } => Self::DeckOpen { deck },
            other => other,
        }
    }

    /// Detail → Browse, index kept
    #[must_use]
    pub const fn enter_browse(self) -> Self {
        match self {
            Self::Detail { deck, index } => Self::Browse { deck, index },
            other => other,
        }
    }

    /// Browse → Detail, index kept
    #[must_use]
    pub const fn exit_browse(self) -> Self {
        match self {
            Self::Browse { deck, index } => Self::Detail { deck, index },
            other => other,
        }
    }

    /// Back out one level from an open card
    #[must_use]
    pub const fn escape(self) -> Self {
        match self {
            Self::Browse { .. } => self.exit_browse(),
            Self::Detail { .. } => self.close_card(),
            other => other,
        }
    }

    #[must_use]
    pub const fn deselect(self) -> Self {
        Self::Grid
    }

    /// Advance one card, stopping at the last of `len`
    #[must_use]
    pub fn next(self, len: usize) -> Self {
        self.map_index(|index| if index + 1 < len { index + 1 } else { index })
    }

    /// Go back one card, stopping at the first
    #[must_use]
    pub fn previous(self) -> Self {
        self.map_index(|index| index.saturating_sub(1))
    }

    /// Restart the sequence at the top, if a card is open
    #[must_use]
    pub fn restart(self) -> Self {
        self.map_index(|_| 0)
    }

    fn map_index(self, f: impl Fn(usize) -> usize) -> Self {
        match self {
            Self::Detail { deck, index } => Self::Detail { deck, index: f(index) },
            Self::Browse { deck, index } => Self::Browse { deck, index: f(index) },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::deck_named;

    fn detail(index: usize) -> (ViewState, DeckId) {
        let deck = DeckId::generate();
        (ViewState::Detail { deck, index }, deck)
    }

    #[test]
    fn test_opened_respects_browse_flag() {
        let mut deck = deck_named("d", 3);
        assert_eq!(ViewState::opened(&deck), ViewState::DeckOpen { deck: deck.id });

        deck.start_in_browse = true;
        assert_eq!(ViewState::opened(&deck), ViewState::Browse { deck: deck.id, index: 0 });

        let mut empty = deck_named("e", 0);
        empty.start_in_browse = true;
        assert_eq!(ViewState::opened(&empty).mode(), ViewMode::DeckOpen);
    }

    #[test]
    fn test_next_clamps_at_end() {
        let (mut state, _) = detail(0);
        for _ in 0..10 {
            state = state.next(4);
        }
        assert_eq!(state.active_index(), Some(3));
    }

    #[test]
    fn test_previous_clamps_at_start() {
        let (mut state, _) = detail(3);
        for _ in 0..10 {
            state = state.previous();
        }
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_browse_round_trip_keeps_index() {
        let (state, deck) = detail(2);
        let browse = state.enter_browse();
        assert_eq!(browse, ViewState::Browse { deck, index: 2 });
        assert_eq!(browse.exit_browse(), state);
    }

    #[test]
    fn test_escape_backs_out_one_level() {
        let (state, deck) = detail(1);
        let browse = state.enter_browse();
        assert_eq!(browse.escape(), state);
        assert_eq!(state.escape(), ViewState::DeckOpen { deck });
        assert_eq!(ViewState::DeckOpen { deck }.escape(), ViewState::DeckOpen { deck });
        assert_eq!(ViewState::Grid.escape(), ViewState::Grid);
    }

    #[test]
    fn test_transitions_outside_their_mode_are_noops() {
        let deck = DeckId::generate();
        let open = ViewState::DeckOpen { deck };
        assert_eq!(open.enter_browse(), open);
        assert_eq!(open.next(5), open);
        assert_eq!(ViewState::Grid.open_card(0), ViewState::Grid);
        assert_eq!(ViewState::Browse { deck, index: 1 }.open_card(0).active_index(), Some(1));
    }

    #[test]
    fn test_restart_only_moves_open_cards() {
        let (state, _) = detail(2);
        assert_eq!(state.restart().active_index(), Some(0));
        assert_eq!(state.enter_browse().restart().active_index(), Some(0));
        assert_eq!(ViewState::Grid.restart(), ViewState::Grid);
    }
}
