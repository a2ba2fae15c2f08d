//! Card system: definitions, instances, registry, and the permanent deck.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Cost, category, rarity, and effect payload
//! - `CardInstance`: One copy of a card, tracked through the piles
//! - `CardRegistry`: The card table
//! - `Deck`: Permanent deck that persists across combats

pub mod deck;
pub mod definition;
pub mod instance;
pub mod registry;

pub use deck::Deck;
pub use definition::{CardCategory, CardDefinition, CardEffect, CardId, Rarity};
pub use instance::{CardInstance, InstanceId};
pub use registry::CardRegistry;
