//! The permanent deck carried between combats.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use super::instance::{CardInstance, InstanceId};

/// The player's permanent deck.
///
/// Combats copy its instances into their piles; the deck itself is only
/// changed between combats (reward cards).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardInstance>,
    next_instance: u32,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from `(card, count)` pairs.
    ///
    /// ```
    /// use deck_battler::cards::{CardId, Deck};
    ///
    /// let deck = Deck::from_counts([(CardId::new(1), 5), (CardId::new(2), 5)]);
    /// assert_eq!(deck.len(), 10);
    /// assert_eq!(deck.count_of(CardId::new(2)), 5);
    /// ```
    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = (CardId, usize)>) -> Self {
        let mut deck = Self::new();
        for (card_id, count) in counts {
            for _ in 0..count {
                deck.add(card_id);
            }
        }
        deck
    }

    /// Append a new copy of a card. Returns the new instance.
    pub fn add(&mut self, card_id: CardId) -> CardInstance {
        let instance = CardInstance::new(InstanceId(self.next_instance), card_id);
        self.next_instance += 1;
        self.cards.push(instance);
        instance
    }

    #[must_use]
    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of copies of a card.
    #[must_use]
    pub fn count_of(&self, card_id: CardId) -> usize {
        self.cards.iter().filter(|c| c.card_id == card_id).count()
    }

    /// Card ids in the deck, sorted (a multiset view).
    #[must_use]
    pub fn sorted_card_ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.cards.iter().map(|c| c.card_id).collect();
        ids.sort_unstable();
        ids
    }
}
