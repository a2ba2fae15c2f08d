//! Combat session state.
//!
//! ## CombatState
//!
//! One battle, owned exclusively by the caller:
//! - Player and enemy combatants
//! - Draw pile, hand, discard pile
//! - Turn owner, phase, turn number
//! - Declared intent and the policy that produces it
//! - RNG, event queue, action history
//!
//! Operations live on `CombatEngine`; this type only holds data and
//! answers queries.
//!
//! ## CombatView
//!
//! Serializable snapshot for renderers. Exposes the draw pile as per-card
//! counts, never in draw order.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionRecord};
use super::combatant::Combatant;
use super::rng::GameRng;
use crate::cards::{CardCategory, CardId, CardInstance, CardRegistry, InstanceId};
use crate::enemies::{EncounterTier, EnemyAction, EnemyId, IntentPolicy};
use crate::events::CombatEvent;
use crate::piles::{Pile, PileManager};
use crate::rules::Reward;

/// One side of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

/// Whose turn it is.
pub type TurnOwner = Side;

/// Combat state machine.
///
/// `PlayerTurnStart -> PlayerActing -> EnemyTurn -> PlayerTurnStart`, with
/// `Victory`, `Defeat` and `Fled` terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatPhase {
    PlayerTurnStart,
    PlayerActing,
    EnemyTurn,
    Victory,
    Defeat,
    Fled,
}

impl CombatPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, CombatPhase::Victory | CombatPhase::Defeat | CombatPhase::Fled)
    }
}

/// How a combat ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// Enemy reduced to zero health.
    Victory(Reward),
    /// Player reduced to zero health. Ends the run.
    Defeat { turns: u32 },
    /// Player ran away.
    Fled { gold_lost: u32 },
}

impl CombatOutcome {
    #[must_use]
    pub const fn phase(&self) -> CombatPhase {
        match self {
            CombatOutcome::Victory(_) => CombatPhase::Victory,
            CombatOutcome::Defeat { .. } => CombatPhase::Defeat,
            CombatOutcome::Fled { .. } => CombatPhase::Fled,
        }
    }
}

/// A single combat session.
///
/// Created by `CombatEngine::start_combat`, mutated only through engine
/// operations, and dropped when the battle ends.
#[derive(Debug)]
pub struct CombatState {
    pub(crate) player: Combatant,
    pub(crate) enemy: Combatant,
    pub(crate) enemy_id: EnemyId,
    pub(crate) enemy_name: String,
    pub(crate) tier: EncounterTier,

    pub(crate) piles: PileManager,

    pub(crate) turn_owner: TurnOwner,
    pub(crate) phase: CombatPhase,

    /// Turn number (starts at 1 once the first turn begins).
    pub(crate) turn: u32,

    /// Intent for the current turn. `None` outside a player turn.
    pub(crate) intent: Option<EnemyAction>,
    pub(crate) policy: Box<dyn IntentPolicy>,

    pub(crate) rng: GameRng,

    pub(crate) events: Vec<CombatEvent>,
    pub(crate) history: Vector<ActionRecord>,

    pub(crate) outcome: Option<CombatOutcome>,

    /// Deck size at combat start; the piles always sum to this.
    pub(crate) deck_size: usize,
}

impl CombatState {
    /// False once a terminal phase is reached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    #[must_use]
    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    #[must_use]
    pub fn enemy_id(&self) -> EnemyId {
        self.enemy_id
    }

    #[must_use]
    pub fn enemy_name(&self) -> &str {
        &self.enemy_name
    }

    #[must_use]
    pub fn tier(&self) -> EncounterTier {
        self.tier
    }

    #[must_use]
    pub fn intent(&self) -> Option<EnemyAction> {
        self.intent
    }

    #[must_use]
    pub fn turn_owner(&self) -> TurnOwner {
        self.turn_owner
    }

    #[must_use]
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&CombatOutcome> {
        self.outcome.as_ref()
    }

    /// Hand in display order.
    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        self.piles.cards(Pile::Hand)
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[CardInstance] {
        self.piles.cards(Pile::Discard)
    }

    #[must_use]
    pub fn pile_size(&self, pile: Pile) -> usize {
        self.piles.size(pile)
    }

    /// Draw pile composition, sorted by card id.
    #[must_use]
    pub fn draw_pile_counts(&self) -> Vec<(CardId, usize)> {
        self.piles.card_counts(Pile::Draw)
    }

    /// Which pile holds a card instance.
    #[must_use]
    pub fn pile_of(&self, instance: InstanceId) -> Option<Pile> {
        self.piles.pile_of(instance)
    }

    /// Every card in the session, sorted. Equals the deck's ids throughout.
    #[must_use]
    pub fn sorted_card_ids(&self) -> Vec<CardId> {
        self.piles.sorted_card_ids()
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Seed of the RNG stream this combat was started with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Pending events not yet drained.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self, cards: &CardRegistry) -> CombatView {
        let hand = self
            .hand()
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let def = cards.get(card.card_id);
                let cost = def.map_or(0, |d| d.cost);
                HandCard {
                    index,
                    instance_id: card.instance_id,
                    card_id: card.card_id,
                    name: def.map_or_else(|| card.card_id.to_string(), |d| d.name.clone()),
                    cost,
                    category: def.map(|d| d.category),
                    playable: def.is_some()
                        && self.phase == CombatPhase::PlayerActing
                        && cost <= self.player.energy,
                }
            })
            .collect();

        CombatView {
            turn: self.turn,
            turn_owner: self.turn_owner,
            phase: self.phase,
            player: self.player,
            enemy: self.enemy,
            enemy_name: self.enemy_name.clone(),
            intent: self.intent,
            hand,
            draw_pile: self.piles.size(Pile::Draw),
            draw_pile_counts: self.draw_pile_counts(),
            discard_pile: self.piles.size(Pile::Discard),
            outcome: self.outcome.clone(),
        }
    }

    pub(crate) fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub(crate) fn record(&mut self, action: ActionKind, card: Option<CardId>) {
        self.history.push_back(ActionRecord::new(self.turn, action, card));
    }

    /// Draw through the shuffle-reclaim rule, emitting events.
    pub(crate) fn draw_cards(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let outcome = self.piles.draw(count, &mut self.rng);
        if outcome.reclaimed > 0 {
            self.emit(CombatEvent::Reshuffled { cards: outcome.reclaimed });
        }
        let drawn = outcome.drawn.len();
        if outcome.short_of(count) {
            tracing::debug!(requested = count, drawn, "draw stopped short");
        }
        if drawn > 0 {
            self.emit(CombatEvent::CardsDrawn { cards: outcome.drawn });
        }
        drawn
    }
}

/// A hand card as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCard {
    pub index: usize,
    pub instance_id: InstanceId,
    pub card_id: CardId,
    pub name: String,
    pub cost: u32,
    pub category: Option<CardCategory>,
    /// Affordable and the player may act.
    pub playable: bool,
}

/// Observable combat state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatView {
    pub turn: u32,
    pub turn_owner: TurnOwner,
    pub phase: CombatPhase,
    pub player: Combatant,
    pub enemy: Combatant,
    pub enemy_name: String,
    pub intent: Option<EnemyAction>,
    pub hand: Vec<HandCard>,
    pub draw_pile: usize,
    /// Sorted by card id.
    pub draw_pile_counts: Vec<(CardId, usize)>,
    pub discard_pile: usize,
    pub outcome: Option<CombatOutcome>,
}
