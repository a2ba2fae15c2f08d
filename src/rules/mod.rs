//! Combat rules.
//!
//! - `CombatEngine`: turn flow, card play, enemy resolution, outcomes
//! - `RewardConfig`: what a victory pays out
//!
//! The engine holds only immutable data. Each combat is a separate
//! `CombatState` value, so any number of sessions can share one engine.

mod engine;
mod reward;

pub use engine::CombatEngine;
pub use reward::{RarityWeights, Reward, RewardConfig, TierRewards};
