//! Pile system for card locations during a combat.
//!
//! ## Key Types
//!
//! - `Pile`: Draw pile, hand, or discard pile
//! - `PileManager`: Card location tracking, movement, and drawing
//! - `DrawOutcome`: What a draw request produced

pub mod manager;

pub use manager::{DrawOutcome, Pile, PileManager};
