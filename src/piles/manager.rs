//! Pile manager for card locations and movement.
//!
//! The `PileManager` tracks which pile every card instance is in and keeps
//! each pile's order. It supports:
//! - Moving single cards or whole piles
//! - Drawing with the shuffle-reclaim rule
//! - Order-free summaries of hidden piles

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardInstance, InstanceId};
use crate::core::rng::GameRng;

/// One of the three combat piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    /// Face-down; last element is the top.
    Draw,
    /// Display order only.
    Hand,
    Discard,
}

impl Pile {
    pub const ALL: [Pile; 3] = [Pile::Draw, Pile::Hand, Pile::Discard];

    const fn slot(self) -> usize {
        match self {
            Pile::Draw => 0,
            Pile::Hand => 1,
            Pile::Discard => 2,
        }
    }
}

/// Result of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Cards moved into the hand, in draw order.
    pub drawn: Vec<CardInstance>,
    /// How many times the discard pile was reclaimed into the draw pile.
    pub reshuffles: u32,
    /// Cards reclaimed across all reshuffles.
    pub reclaimed: usize,
}

impl DrawOutcome {
    /// True if fewer cards were drawn than requested.
    #[must_use]
    pub fn short_of(&self, requested: usize) -> bool {
        self.drawn.len() < requested
    }
}

/// Manages card locations across the draw pile, hand, and discard pile.
///
/// ```
/// use deck_battler::cards::{CardId, CardInstance, InstanceId};
/// use deck_battler::core::GameRng;
/// use deck_battler::piles::{Pile, PileManager};
///
/// let mut piles = PileManager::new();
/// for i in 0..3 {
///     piles.add(CardInstance::new(InstanceId(i), CardId::new(1)), Pile::Discard);
/// }
///
/// // Draw pile is empty, so the discard pile is reclaimed first.
/// let outcome = piles.draw(5, &mut GameRng::new(1));
/// assert_eq!(outcome.drawn.len(), 3);
/// assert_eq!(outcome.reshuffles, 1);
/// assert_eq!(piles.size(Pile::Hand), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PileManager {
    /// Card locations: instance -> pile
    locations: FxHashMap<InstanceId, Pile>,

    /// Ordered contents, indexed by `Pile::slot`.
    piles: [Vec<CardInstance>; 3],
}

impl PileManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an untracked card to the top of a pile.
    ///
    /// Returns `false` and leaves the manager unchanged if the instance is
    /// already tracked.
    pub fn add(&mut self, card: CardInstance, pile: Pile) -> bool {
        if self.locations.contains_key(&card.instance_id) {
            return false;
        }
        self.locations.insert(card.instance_id, pile);
        self.piles[pile.slot()].push(card);
        true
    }

    /// Move a card to the top of another pile.
    ///
    /// Returns the old pile, or `None` if the card isn't tracked.
    pub fn move_card(&mut self, instance: InstanceId, to: Pile) -> Option<Pile> {
        let from = self.locations.get(&instance).copied()?;
        if from == to {
            return Some(from);
        }

        let order = &mut self.piles[from.slot()];
        let idx = order.iter().position(|c| c.instance_id == instance)?;
        let card = order.remove(idx);

        self.locations.insert(instance, to);
        self.piles[to.slot()].push(card);
        Some(from)
    }

    /// Move every card of `from` onto the top of `to`, preserving order.
    ///
    /// Returns the number of cards moved.
    pub fn move_all(&mut self, from: Pile, to: Pile) -> usize {
        if from == to {
            return 0;
        }
        let moved = std::mem::take(&mut self.piles[from.slot()]);
        let count = moved.len();
        for card in &moved {
            self.locations.insert(card.instance_id, to);
        }
        self.piles[to.slot()].extend(moved);
        count
    }

    /// Move the top card of `from` onto the top of `to`.
    pub fn move_top(&mut self, from: Pile, to: Pile) -> Option<CardInstance> {
        let card = self.piles[from.slot()].pop()?;
        self.locations.insert(card.instance_id, to);
        self.piles[to.slot()].push(card);
        Some(card)
    }

    /// Shuffle a pile in place (Fisher-Yates).
    pub fn shuffle(&mut self, pile: Pile, rng: &mut GameRng) {
        rng.shuffle(&mut self.piles[pile.slot()]);
    }

    /// Shuffle the discard pile into the draw pile.
    ///
    /// Only acts when the draw pile is empty and the discard pile is not.
    /// Returns the number of cards reclaimed.
    pub fn reclaim_discard(&mut self, rng: &mut GameRng) -> usize {
        if !self.piles[Pile::Draw.slot()].is_empty() {
            return 0;
        }
        let reclaimed = self.move_all(Pile::Discard, Pile::Draw);
        if reclaimed > 0 {
            self.shuffle(Pile::Draw, rng);
        }
        reclaimed
    }

    /// Draw up to `count` cards into the hand.
    ///
    /// Whenever the draw pile runs dry the discard pile is reclaimed; if
    /// both are empty drawing stops short. Running out is not an error.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> DrawOutcome {
        let mut outcome = DrawOutcome::default();

        for _ in 0..count {
            if self.piles[Pile::Draw.slot()].is_empty() {
                let reclaimed = self.reclaim_discard(rng);
                if reclaimed == 0 {
                    break;
                }
                outcome.reshuffles += 1;
                outcome.reclaimed += reclaimed;
            }

            match self.move_top(Pile::Draw, Pile::Hand) {
                Some(card) => outcome.drawn.push(card),
                None => break,
            }
        }

        outcome
    }

    /// Get the pile a card is in.
    #[must_use]
    pub fn pile_of(&self, instance: InstanceId) -> Option<Pile> {
        self.locations.get(&instance).copied()
    }

    /// Cards in a pile, in order (top of the draw pile is last).
    #[must_use]
    pub fn cards(&self, pile: Pile) -> &[CardInstance] {
        &self.piles[pile.slot()]
    }

    #[must_use]
    pub fn size(&self, pile: Pile) -> usize {
        self.piles[pile.slot()].len()
    }

    /// Per-card counts of a pile, sorted by card id.
    ///
    /// Reveals composition without revealing order.
    #[must_use]
    pub fn card_counts(&self, pile: Pile) -> Vec<(CardId, usize)> {
        let mut counts: FxHashMap<CardId, usize> = FxHashMap::default();
        for card in &self.piles[pile.slot()] {
            *counts.entry(card.card_id).or_default() += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_unstable_by_key(|(id, _)| *id);
        counts
    }

    /// Every tracked card id, sorted (the multiset union of the piles).
    #[must_use]
    pub fn sorted_card_ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.piles.iter().flatten().map(|c| c.card_id).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(i: u32) -> CardInstance {
        CardInstance::new(InstanceId(i), CardId::new(i % 3))
    }

    fn filled(pile: Pile, n: u32) -> PileManager {
        let mut piles = PileManager::new();
        for i in 0..n {
            piles.add(card(i), pile);
        }
        piles
    }

    #[test]
    fn test_add_and_locate() {
        let mut piles = PileManager::new();
        assert!(piles.add(card(10), Pile::Draw));
        assert!(piles.add(card(11), Pile::Hand));

        assert_eq!(piles.pile_of(InstanceId(10)), Some(Pile::Draw));
        assert_eq!(piles.pile_of(InstanceId(11)), Some(Pile::Hand));
        assert_eq!(piles.pile_of(InstanceId(99)), None);
    }

    #[test]
    fn test_duplicate_add_is_refused() {
        let mut piles = PileManager::new();
        assert!(piles.add(card(10), Pile::Draw));
        assert!(!piles.add(card(10), Pile::Hand));

        assert_eq!(piles.size(Pile::Draw), 1);
        assert_eq!(piles.size(Pile::Hand), 0);
    }

    #[test]
    fn test_move_card() {
        let mut piles = filled(Pile::Hand, 3);

        let old = piles.move_card(InstanceId(1), Pile::Discard);
        assert_eq!(old, Some(Pile::Hand));
        assert_eq!(piles.size(Pile::Hand), 2);
        assert_eq!(piles.size(Pile::Discard), 1);
        assert_eq!(piles.pile_of(InstanceId(1)), Some(Pile::Discard));

        assert_eq!(piles.move_card(InstanceId(42), Pile::Draw), None);

        // Moved cards land on top.
        piles.move_card(InstanceId(0), Pile::Discard);
        let ids: Vec<_> = piles.cards(Pile::Discard).iter().map(|c| c.instance_id.0).collect();
        assert_eq!(ids, vec![1, 0]);
    }

    #[test]
    fn test_move_all() {
        let mut piles = filled(Pile::Hand, 4);

        assert_eq!(piles.move_all(Pile::Hand, Pile::Discard), 4);
        assert_eq!(piles.size(Pile::Hand), 0);
        assert_eq!(piles.size(Pile::Discard), 4);
        assert!((0..4).all(|i| piles.pile_of(InstanceId(i)) == Some(Pile::Discard)));
    }

    #[test]
    fn test_draw_takes_from_top() {
        let mut piles = filled(Pile::Draw, 5);
        let outcome = piles.draw(2, &mut GameRng::new(1));

        let ids: Vec<_> = outcome.drawn.iter().map(|c| c.instance_id.0).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(outcome.reshuffles, 0);
        assert_eq!(piles.size(Pile::Draw), 3);
    }

    #[test]
    fn test_draw_reclaims_discard_short_of_target() {
        let mut piles = filled(Pile::Discard, 3);
        let outcome = piles.draw(5, &mut GameRng::new(3));

        assert_eq!(outcome.drawn.len(), 3);
        assert!(outcome.short_of(5));
        assert_eq!(outcome.reshuffles, 1);
        assert_eq!(outcome.reclaimed, 3);
        assert_eq!(piles.size(Pile::Draw), 0);
        assert_eq!(piles.size(Pile::Discard), 0);
        assert_eq!(piles.size(Pile::Hand), 3);
    }

    #[test]
    fn test_draw_continues_after_reclaim() {
        let mut piles = filled(Pile::Draw, 2);
        for i in 2..6 {
            piles.add(card(i), Pile::Discard);
        }

        let outcome = piles.draw(5, &mut GameRng::new(9));

        assert_eq!(outcome.drawn.len(), 5);
        assert_eq!(outcome.reshuffles, 1);
        assert_eq!(piles.size(Pile::Draw), 1);
        assert_eq!(piles.size(Pile::Discard), 0);
    }

    #[test]
    fn test_draw_with_everything_empty() {
        let mut piles = PileManager::new();
        let outcome = piles.draw(5, &mut GameRng::new(1));
        assert!(outcome.drawn.is_empty());
        assert_eq!(outcome.reshuffles, 0);
    }

    #[test]
    fn test_reclaim_only_when_draw_empty() {
        let mut piles = filled(Pile::Draw, 1);
        piles.add(card(5), Pile::Discard);

        assert_eq!(piles.reclaim_discard(&mut GameRng::new(1)), 0);
        assert_eq!(piles.size(Pile::Discard), 1);
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut piles = filled(Pile::Draw, 20);
        let before = piles.cards(Pile::Draw).to_vec();
        let ids_before = piles.sorted_card_ids();

        piles.shuffle(Pile::Draw, &mut GameRng::new(42));

        assert_ne!(piles.cards(Pile::Draw), before.as_slice());
        assert_eq!(piles.sorted_card_ids(), ids_before);
    }

    #[test]
    fn test_card_counts_sorted() {
        let piles = filled(Pile::Draw, 7);
        // card ids are i % 3: 0,1,2,0,1,2,0
        assert_eq!(
            piles.card_counts(Pile::Draw),
            vec![(CardId::new(0), 3), (CardId::new(1), 2), (CardId::new(2), 2)]
        );
    }
}
