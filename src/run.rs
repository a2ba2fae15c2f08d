//! Meta-progression between combats.
//!
//! A `Run` owns what outlives a single battle: the permanent deck, gold,
//! and the player's health. It opens combats, folds their outcome back in
//! and applies the reward choice. Defeat ends the run for good.
//!
//! An open combat is not part of a save: a restored run is between
//! combats, with the deck, gold and health it had when that combat began.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::{CardId, CardInstance, Deck};
use crate::core::{CombatOutcome, CombatState, GameRng, RunError};
use crate::enemies::EnemyId;
use crate::rules::{CombatEngine, Reward};

/// A playthrough: one deck fighting a sequence of enemies.
///
/// ```
/// use deck_battler::core::{ActionKind, GameRng};
/// use deck_battler::enemies::EnemyId;
/// use deck_battler::rules::CombatEngine;
/// use deck_battler::run::Run;
///
/// let engine = CombatEngine::standard().unwrap();
/// let mut run = Run::new(&engine, GameRng::new(3));
///
/// let mut combat = run.start_combat(&engine, EnemyId::new(1)).unwrap();
/// engine.resolve_player_action(&mut combat, ActionKind::Flee).unwrap();
/// run.finish_combat(&combat).unwrap();
///
/// assert!(!run.is_over());
/// assert_eq!(run.deck().len(), engine.starting_deck().len());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Run {
    deck: Deck,
    gold: u32,
    health: u32,
    max_health: u32,
    combats_won: u32,
    pending_reward: Option<Reward>,
    /// Seed of the combat this run has open.
    #[serde(skip)]
    active_combat: Option<u64>,
    game_over: bool,
    rng: GameRng,
}

impl Run {
    /// Start a run with the engine's starting deck and rules.
    #[must_use]
    pub fn new(engine: &CombatEngine, rng: GameRng) -> Self {
        let rules = engine.rules();
        Self {
            deck: engine.starting_deck().clone(),
            gold: rules.starting_gold,
            health: rules.player_max_health,
            max_health: rules.player_max_health,
            combats_won: 0,
            pending_reward: None,
            active_combat: None,
            game_over: false,
            rng,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn gold(&self) -> u32 {
        self.gold
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[must_use]
    pub fn combats_won(&self) -> u32 {
        self.combats_won
    }

    /// The reward waiting for `select_reward` or `skip_reward`.
    #[must_use]
    pub fn pending_reward(&self) -> Option<&Reward> {
        self.pending_reward.as_ref()
    }

    /// True while a combat opened by `start_combat` awaits its fold-back.
    #[must_use]
    pub fn in_combat(&self) -> bool {
        self.active_combat.is_some()
    }

    /// True after a defeat.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Open a combat against `enemy` with the current deck and health.
    pub fn start_combat(&mut self, engine: &CombatEngine, enemy: EnemyId) -> Result<CombatState, RunError> {
        if self.game_over {
            return Err(RunError::GameOver);
        }
        if self.active_combat.is_some() {
            return Err(RunError::CombatInProgress);
        }
        if self.pending_reward.is_some() {
            return Err(RunError::RewardPending);
        }
        let definition = engine.enemies().get(enemy).ok_or(RunError::UnknownEnemy(enemy))?;

        let player = engine.fresh_player().with_health(self.health);
        let combat = engine.start_combat(
            &self.deck,
            player,
            definition,
            definition.intent_policy(),
            self.rng.fork(),
        );
        self.active_combat = Some(combat.seed());
        Ok(combat)
    }

    /// Fold a finished combat back into the run.
    ///
    /// An unfinished combat is refused and stays with the caller. So is a
    /// combat this run did not open.
    ///
    /// Health carries over. Victory pays gold and queues the card offer;
    /// fleeing costs gold; defeat ends the run.
    pub fn finish_combat(&mut self, combat: &CombatState) -> Result<CombatOutcome, RunError> {
        let Some(seed) = self.active_combat else {
            return Err(RunError::NotInCombat);
        };
        if combat.seed() != seed || combat.sorted_card_ids() != self.deck.sorted_card_ids() {
            return Err(RunError::ForeignCombat);
        }
        let Some(outcome) = combat.outcome().cloned() else {
            return Err(RunError::CombatInProgress);
        };

        self.active_combat = None;
        self.health = combat.player().health;

        match &outcome {
            CombatOutcome::Victory(reward) => {
                self.combats_won += 1;
                self.gold = self.gold.saturating_add(reward.gold);
                if !reward.cards.is_empty() {
                    self.pending_reward = Some(reward.clone());
                }
                info!(gold = self.gold, health = self.health, won = self.combats_won, "victory");
            }
            CombatOutcome::Fled { gold_lost } => {
                self.gold = self.gold.saturating_sub(*gold_lost);
                info!(gold = self.gold, health = self.health, "fled");
            }
            CombatOutcome::Defeat { turns } => {
                self.game_over = true;
                warn!(turns, won = self.combats_won, "defeated; run over");
            }
        }
        Ok(outcome)
    }

    /// Give up the open combat without its session, as if fleeing.
    ///
    /// For callers that dropped the `CombatState`. The flee penalty applies
    /// and health stays at what it was when the combat opened.
    pub fn abandon_combat(&mut self, engine: &CombatEngine) -> Result<CombatOutcome, RunError> {
        self.active_combat.take().ok_or(RunError::NotInCombat)?;
        let gold_lost = engine.rules().flee_gold_penalty;
        self.gold = self.gold.saturating_sub(gold_lost);
        info!(gold = self.gold, health = self.health, "combat abandoned");
        Ok(CombatOutcome::Fled { gold_lost })
    }

    /// Add one offered card to the deck.
    pub fn select_reward(&mut self, card: CardId) -> Result<CardInstance, RunError> {
        let reward = self.pending_reward.as_ref().ok_or(RunError::NoPendingReward)?;
        if !reward.offers(card) {
            return Err(RunError::CardNotOffered(card));
        }
        self.pending_reward = None;
        let instance = self.deck.add(card);
        info!(card = %card, deck = self.deck.len(), "reward taken");
        Ok(instance)
    }

    /// Decline the card offer. Gold was already paid.
    pub fn skip_reward(&mut self) -> Result<(), RunError> {
        self.pending_reward.take().ok_or(RunError::NoPendingReward)?;
        Ok(())
    }
}
