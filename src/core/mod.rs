//! Core engine types: combatants, session state, actions, RNG, configuration, errors.
//!
//! Content-free building blocks. Cards and enemies are data supplied
//! through `GameData`; the core never names a specific card.

pub mod action;
pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{ActionKind, ActionRecord};
pub use combatant::{Combatant, HitResult};
pub use config::{DeckEntry, GameData, RulesConfig};
pub use error::{ActionRejected, ConfigError, RunError};
pub use rng::{GameRng, GameRngState};
pub use state::{CombatOutcome, CombatPhase, CombatState, CombatView, HandCard, Side, TurnOwner};
