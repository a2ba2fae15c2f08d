//! # deck-battler
//!
//! Turn engine for a deck-building card battler.
//!
//! ## Design Principles
//!
//! 1. **Data-driven**: cards, enemies, rules and rewards are loaded from
//!    `GameData` (TOML). The engine never names a specific card.
//!
//! 2. **Explicit sessions**: `CombatEngine` holds rules; each battle is a
//!    `CombatState` value passed to every operation. No globals.
//!
//! 3. **Reject, don't panic**: invalid actions return `ActionRejected`
//!    and leave the session untouched.
//!
//! 4. **Rendering is someone else's job**: state changes push
//!    `CombatEvent`s; renderers drain them and read `CombatView`.
//!
//! ## Modules
//!
//! - `core`: combatants, session state, actions, RNG, configuration, errors
//! - `cards`: card definitions, instances, the permanent deck
//! - `piles`: draw pile, hand, discard pile and the shuffle-reclaim rule
//! - `enemies`: enemy table and intent policies
//! - `effects`: card effect resolution
//! - `rules`: the combat engine and rewards
//! - `run`: meta-progression between combats
//! - `events`: the combat event stream

pub mod cards;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod events;
pub mod piles;
pub mod rules;
pub mod run;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionRecord, ActionRejected, CombatOutcome, CombatPhase, CombatState, CombatView,
    Combatant, ConfigError, GameData, GameRng, GameRngState, RulesConfig, RunError, Side,
    TurnOwner,
};

pub use crate::cards::{CardCategory, CardDefinition, CardEffect, CardId, CardInstance, CardRegistry, Deck, Rarity};

pub use crate::piles::{Pile, PileManager};

pub use crate::enemies::{EnemyAction, EnemyDefinition, EnemyId, EnemyRegistry, IntentPolicy};

pub use crate::events::CombatEvent;

pub use crate::rules::{CombatEngine, Reward, RewardConfig};

pub use crate::run::Run;
