//! Card instances - copies of a definition that live in a deck.
//!
//! A deck with five Strikes holds five `CardInstance`s sharing one
//! `CardId` but each with its own `InstanceId`, so the pile manager can
//! track exactly where every copy is.

use serde::{Deserialize, Serialize};

use super::definition::CardId;

/// Unique identifier for one copy of a card within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// One copy of a card.
///
/// Plain value type: the definition is looked up in the registry by
/// `card_id` whenever its cost or effect is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub instance_id: InstanceId,
    pub card_id: CardId,
}

impl CardInstance {
    #[must_use]
    pub const fn new(instance_id: InstanceId, card_id: CardId) -> Self {
        Self { instance_id, card_id }
    }
}
