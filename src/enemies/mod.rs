//! Enemies: the enemy table and intent policies.
//!
//! - `EnemyDefinition`: health range, damage range, tier, optional script
//! - `EnemyRegistry`: the enemy table
//! - `EnemyAction`: a telegraphed intent
//! - `IntentPolicy`: pluggable decision function

mod definition;
mod intent;

pub use definition::{EncounterTier, EnemyDefinition, EnemyId, EnemyRegistry, Range};
pub use intent::{EnemyAction, FnPolicy, IntentPolicy, RandomAttack, Scripted, Weighted};
