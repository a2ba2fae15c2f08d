//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the card table: every definition the engine can
//! resolve, keyed by `CardId`.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, Rarity};
use crate::core::ConfigError;

/// Registry of card definitions.
///
/// ```
/// use deck_battler::cards::{CardCategory, CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new(CardId::new(1), "Strike", 1, CardCategory::Attack).with_damage(6))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().effect.damage, 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions, validating each.
    pub fn from_definitions(
        cards: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Register a card definition.
    ///
    /// Fails on a duplicate id or a zero repeat count.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), ConfigError> {
        if self.cards.contains_key(&card.id) {
            return Err(ConfigError::DuplicateCard(card.id));
        }
        if card.effect.repeat == 0 {
            return Err(ConfigError::ZeroRepeat(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Card ids of one rarity, sorted so that seeded reward rolls are stable.
    #[must_use]
    pub fn ids_by_rarity(&self, rarity: Rarity) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .cards
            .values()
            .filter(|c| c.rarity == rarity)
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
