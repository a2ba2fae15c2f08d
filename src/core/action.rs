//! Player actions.
//!
//! Every player command is one `ActionKind`, passed to a single entry
//! point (`CombatEngine::resolve_player_action`) instead of being chosen
//! through a blocking dialog.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A player command.
///
/// ```
/// use deck_battler::core::ActionKind;
///
/// let play = ActionKind::PlayCard { hand_index: 0 };
/// assert!(play.is_card_play());
/// assert!(!ActionKind::EndTurn.is_card_play());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Play the card at this hand position.
    PlayCard { hand_index: usize },
    EndTurn,
    Flee,
}

impl ActionKind {
    #[must_use]
    pub const fn is_card_play(&self) -> bool {
        matches!(self, ActionKind::PlayCard { .. })
    }
}

/// An accepted action, kept in the session history.
///
/// Used for replay/debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Turn number when the action was taken.
    pub turn: u32,

    pub action: ActionKind,

    /// The card played, for `PlayCard`.
    pub card: Option<CardId>,
}

impl ActionRecord {
    #[must_use]
    pub fn new(turn: u32, action: ActionKind, card: Option<CardId>) -> Self {
        Self { turn, action, card }
    }
}
