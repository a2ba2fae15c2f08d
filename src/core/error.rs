//! Error types.
//!
//! - `ConfigError`: malformed game data, raised once at startup
//! - `ActionRejected`: an invalid player action; the session is untouched
//! - `RunError`: an invalid meta-progression request

use crate::cards::CardId;
use crate::enemies::EnemyId;

use super::state::{CombatPhase, TurnOwner};

/// Game data could not be loaded or failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse game data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate card id {0}")]
    DuplicateCard(CardId),

    #[error("duplicate enemy id {0}")]
    DuplicateEnemy(EnemyId),

    #[error("unknown card {card} referenced by {context}")]
    UnknownCard { card: CardId, context: &'static str },

    #[error("card {0} has a repeat count of zero")]
    ZeroRepeat(CardId),

    #[error("enemy {enemy} has an inverted {field} range {min}..={max}")]
    InvertedRange {
        enemy: EnemyId,
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("enemy {0} has zero health")]
    ZeroEnemyHealth(EnemyId),

    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),

    #[error("starting deck is empty")]
    EmptyStartingDeck,

    #[error("reward pool has no {0} cards to offer")]
    EmptyRewardPool(&'static str),
}

/// Why a player action was refused.
///
/// A rejected action performs no mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionRejected {
    #[error("combat is over")]
    Inactive,

    #[error("not the player's turn (turn owner: {0:?})")]
    NotPlayerTurn(TurnOwner),

    #[error("action not allowed during {0:?}")]
    WrongPhase(CombatPhase),

    #[error("no card at hand index {index} (hand size {hand_size})")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("card {card} costs {cost} but only {energy} energy is available")]
    InsufficientEnergy { card: CardId, cost: u32, energy: u32 },

    #[error("card {0} is not in the card table")]
    UnknownCard(CardId),
}

/// A run-level request could not be honoured.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error("the run is over")]
    GameOver,

    #[error("unknown enemy {0}")]
    UnknownEnemy(EnemyId),

    #[error("a reward is waiting to be chosen or skipped")]
    RewardPending,

    #[error("no reward is pending")]
    NoPendingReward,

    #[error("card {0} was not offered")]
    CardNotOffered(CardId),

    #[error("combat has not finished")]
    CombatInProgress,

    #[error("no combat is in progress")]
    NotInCombat,

    #[error("combat was not started by this run")]
    ForeignCombat,
}
