//! Card effect resolution.
//!
//! A card's payload (`CardEffect`) is plain data; `EffectResolver` applies
//! it to a `CombatState`, emitting events as it goes. The engine handles
//! everything around it: cost, hand-to-discard, victory.

mod resolver;

pub use resolver::{EffectReport, EffectResolver};
