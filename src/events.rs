//! Combat events.
//!
//! Every state change pushes a `CombatEvent` onto the session's queue.
//! Renderers drain the queue and animate; they are never called from game
//! logic directly.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::state::{CombatOutcome, Side};
use crate::enemies::{EnemyAction, EnemyId};

/// Something that happened during a combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    CombatStarted { enemy: EnemyId, enemy_health: u32 },

    /// A new player turn began (1-based).
    TurnStarted { turn: u32 },

    /// The enemy telegraphed its next action.
    IntentDeclared(EnemyAction),

    /// The discard pile was shuffled into the empty draw pile.
    Reshuffled { cards: usize },

    CardsDrawn { cards: Vec<CardInstance> },

    CardPlayed { card: CardInstance, cost: u32 },

    /// One hit landed. `blocked + health_lost` may be less than the raw
    /// damage when the target was already at zero.
    DamageDealt { target: Side, blocked: u32, health_lost: u32 },

    BlockGained { side: Side, amount: u32 },

    /// Unused block was cleared.
    BlockExpired { side: Side, amount: u32 },

    EnergyGained { amount: u32 },

    /// The hand was moved to the discard pile at end of turn.
    HandDiscarded { count: usize },

    /// Player actions are locked until the enemy resolves.
    EnemyTurnStarted,

    EnemyActed(EnemyAction),

    CombatEnded(CombatOutcome),
}
