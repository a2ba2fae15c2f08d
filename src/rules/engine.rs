//! The combat turn engine.
//!
//! `CombatEngine` owns the immutable rules (card table, enemy table, turn
//! configuration, rewards) and drives a `CombatState` passed in by the
//! caller. Every player-facing operation either succeeds or returns
//! `ActionRejected` without touching the state.
//!
//! ## Turn flow
//!
//! 1. `start_turn`: refill energy, declare intent, draw up to hand size
//! 2. `play_card` any number of times
//! 3. `begin_enemy_turn`: discard hand, lock player input
//! 4. `resolve_enemy_turn`: expire enemy block, act, expire player block,
//!    then back to 1
//!
//! `end_turn` runs 3 and 4 back to back. Callers that want the enemy's
//! pause call them separately, `enemy_turn_delay()` apart.

use std::time::Duration;

use tracing::{debug, info};

use crate::cards::{CardDefinition, CardInstance, CardRegistry, Deck};
use crate::core::{
    ActionKind, ActionRejected, Combatant, CombatOutcome, CombatPhase, CombatState, ConfigError,
    GameData, GameRng, RulesConfig, Side,
};
use crate::effects::EffectResolver;
use crate::enemies::{EnemyAction, EnemyDefinition, EnemyRegistry, IntentPolicy};
use crate::events::CombatEvent;
use crate::piles::{Pile, PileManager};

use super::reward::RewardConfig;

fn log_rejection(reason: &ActionRejected) {
    debug!(%reason, "action rejected");
}

/// Combat rules and the operations that apply them.
///
/// ```
/// use deck_battler::core::{ActionKind, Combatant, GameRng};
/// use deck_battler::enemies::EnemyId;
/// use deck_battler::rules::CombatEngine;
///
/// let engine = CombatEngine::standard().unwrap();
/// let slime = engine.enemies().get(EnemyId::new(1)).unwrap();
/// let mut combat = engine.start_combat(
///     engine.starting_deck(),
///     engine.fresh_player(),
///     slime,
///     slime.intent_policy(),
///     GameRng::new(42),
/// );
///
/// assert_eq!(combat.hand().len(), 5);
/// engine.resolve_player_action(&mut combat, ActionKind::EndTurn).unwrap();
/// assert_eq!(combat.turn(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct CombatEngine {
    rules: RulesConfig,
    rewards: RewardConfig,
    cards: CardRegistry,
    enemies: EnemyRegistry,
    starting_deck: Deck,
}

impl CombatEngine {
    /// Validate game data and build the engine.
    pub fn new(data: GameData) -> Result<Self, ConfigError> {
        data.rules.validate()?;

        let starting_deck = data.starting_deck();
        let cards = CardRegistry::from_definitions(data.cards)?;
        let enemies = EnemyRegistry::from_definitions(data.enemies)?;

        for entry in &data.starting_deck {
            if !cards.contains(entry.card) {
                return Err(ConfigError::UnknownCard {
                    card: entry.card,
                    context: "starting deck",
                });
            }
        }
        if starting_deck.is_empty() {
            return Err(ConfigError::EmptyStartingDeck);
        }
        data.rewards.validate(&cards)?;

        info!(
            cards = cards.len(),
            enemies = enemies.len(),
            deck = starting_deck.len(),
            "combat engine ready"
        );

        Ok(Self {
            rules: data.rules,
            rewards: data.rewards,
            cards,
            enemies,
            starting_deck,
        })
    }

    /// Engine over the bundled card and enemy set.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(GameData::standard()?)
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    #[must_use]
    pub fn starting_deck(&self) -> &Deck {
        &self.starting_deck
    }

    /// Pause between `begin_enemy_turn` and `resolve_enemy_turn`.
    #[must_use]
    pub fn enemy_turn_delay(&self) -> Duration {
        Duration::from_millis(self.rules.enemy_turn_delay_ms)
    }

    /// A player at full configured health.
    #[must_use]
    pub fn fresh_player(&self) -> Combatant {
        Combatant::new(self.rules.player_max_health).with_max_energy(self.rules.max_energy)
    }

    /// Start a combat against `enemy`.
    ///
    /// Rolls enemy health, shuffles every deck card into the draw pile and
    /// runs the first `start_turn`. The player's health carries over from
    /// `player`; energy and block start fresh.
    #[tracing::instrument(level = "debug", skip_all, fields(enemy = %enemy.id, seed = rng.seed()))]
    pub fn start_combat(
        &self,
        deck: &Deck,
        player: Combatant,
        enemy: &EnemyDefinition,
        policy: Box<dyn IntentPolicy>,
        mut rng: GameRng,
    ) -> CombatState {
        let enemy_combatant = enemy.spawn(&mut rng);

        let mut piles = PileManager::new();
        for card in deck.cards() {
            piles.add(*card, Pile::Draw);
        }
        piles.shuffle(Pile::Draw, &mut rng);

        let player = Combatant {
            energy: 0,
            block: 0,
            max_energy: self.rules.max_energy,
            ..player
        };

        let mut state = CombatState {
            player,
            enemy: enemy_combatant,
            enemy_id: enemy.id,
            enemy_name: enemy.name.clone(),
            tier: enemy.tier,
            piles,
            turn_owner: Side::Player,
            phase: CombatPhase::PlayerTurnStart,
            turn: 0,
            intent: None,
            policy,
            rng,
            events: Vec::new(),
            history: im::Vector::new(),
            outcome: None,
            deck_size: deck.len(),
        };

        state.emit(CombatEvent::CombatStarted {
            enemy: enemy.id,
            enemy_health: enemy_combatant.health,
        });
        info!(
            enemy = %enemy.name,
            enemy_health = enemy_combatant.health,
            player_health = player.health,
            deck = deck.len(),
            "combat started"
        );

        self.begin_player_turn(&mut state);
        state
    }

    /// Begin a player turn. Only valid in `PlayerTurnStart`; the engine
    /// calls this itself after combat start and after each enemy turn.
    pub fn start_turn(&self, state: &mut CombatState) -> Result<(), ActionRejected> {
        let check = if !state.is_active() {
            Err(ActionRejected::Inactive)
        } else if state.phase != CombatPhase::PlayerTurnStart {
            Err(ActionRejected::WrongPhase(state.phase))
        } else {
            Ok(())
        };
        check.inspect_err(log_rejection)?;

        self.begin_player_turn(state);
        Ok(())
    }

    fn begin_player_turn(&self, state: &mut CombatState) {
        state.turn += 1;
        state.turn_owner = Side::Player;
        state.emit(CombatEvent::TurnStarted { turn: state.turn });

        state.player.refill_energy();

        let intent = state.policy.decide(&state.enemy, &state.player, &mut state.rng);
        state.intent = Some(intent);
        state.emit(CombatEvent::IntentDeclared(intent));

        let missing = self.rules.hand_size.saturating_sub(state.piles.size(Pile::Hand));
        state.draw_cards(missing);

        state.phase = CombatPhase::PlayerActing;
        debug!(turn = state.turn, ?intent, hand = state.piles.size(Pile::Hand), "player turn");
    }

    fn ensure_player_can_act(state: &CombatState) -> Result<(), ActionRejected> {
        if !state.is_active() {
            return Err(ActionRejected::Inactive);
        }
        if state.turn_owner != Side::Player {
            return Err(ActionRejected::NotPlayerTurn(state.turn_owner));
        }
        if state.phase != CombatPhase::PlayerActing {
            return Err(ActionRejected::WrongPhase(state.phase));
        }
        Ok(())
    }

    fn check_play(
        &self,
        state: &CombatState,
        hand_index: usize,
    ) -> Result<(CardInstance, &CardDefinition), ActionRejected> {
        Self::ensure_player_can_act(state)?;

        let hand = state.piles.cards(Pile::Hand);
        let card = *hand.get(hand_index).ok_or(ActionRejected::InvalidHandIndex {
            index: hand_index,
            hand_size: hand.len(),
        })?;
        let def = self
            .cards
            .get(card.card_id)
            .ok_or(ActionRejected::UnknownCard(card.card_id))?;

        if def.cost > state.player.energy {
            return Err(ActionRejected::InsufficientEnergy {
                card: card.card_id,
                cost: def.cost,
                energy: state.player.energy,
            });
        }
        Ok((card, def))
    }

    /// Play the card at `hand_index`.
    ///
    /// Pays the cost, resolves the effect, then moves the card to the
    /// discard pile. A card drawn into a reshuffle by its own effect is
    /// therefore not part of that reshuffle.
    #[tracing::instrument(level = "debug", skip(self, state), fields(turn = state.turn))]
    pub fn play_card(&self, state: &mut CombatState, hand_index: usize) -> Result<(), ActionRejected> {
        let (card, def) = self.check_play(state, hand_index).inspect_err(log_rejection)?;

        let paid = state.player.spend_energy(def.cost);
        debug_assert!(paid);
        state.emit(CombatEvent::CardPlayed { card, cost: def.cost });

        let report = EffectResolver::resolve(state, &def.effect);

        let from = state.piles.move_card(card.instance_id, Pile::Discard);
        debug_assert_eq!(from, Some(Pile::Hand));
        state.record(ActionKind::PlayCard { hand_index }, Some(card.card_id));

        debug!(card = %def.name, ?report, enemy_health = state.enemy.health, "card played");

        if state.enemy.is_dead() {
            self.finish_victory(state);
        }
        Ok(())
    }

    /// End the player's turn and resolve the enemy's.
    pub fn end_turn(&self, state: &mut CombatState) -> Result<(), ActionRejected> {
        self.begin_enemy_turn(state)?;
        self.resolve_enemy_turn(state)
    }

    /// Discard the hand and hand control to the enemy.
    ///
    /// Player actions are rejected until `resolve_enemy_turn`.
    #[tracing::instrument(level = "debug", skip_all, fields(turn = state.turn))]
    pub fn begin_enemy_turn(&self, state: &mut CombatState) -> Result<(), ActionRejected> {
        Self::ensure_player_can_act(state).inspect_err(log_rejection)?;

        let count = state.piles.move_all(Pile::Hand, Pile::Discard);
        state.emit(CombatEvent::HandDiscarded { count });
        state.record(ActionKind::EndTurn, None);

        state.turn_owner = Side::Enemy;
        state.phase = CombatPhase::EnemyTurn;
        state.emit(CombatEvent::EnemyTurnStarted);
        Ok(())
    }

    /// Carry out the declared intent, then start the next player turn.
    ///
    /// Rejected if the combat ended in the meantime (e.g. the player fled
    /// during the pause).
    #[tracing::instrument(level = "debug", skip_all, fields(turn = state.turn))]
    pub fn resolve_enemy_turn(&self, state: &mut CombatState) -> Result<(), ActionRejected> {
        let check = if !state.is_active() {
            Err(ActionRejected::Inactive)
        } else if state.phase != CombatPhase::EnemyTurn {
            Err(ActionRejected::WrongPhase(state.phase))
        } else {
            Ok(())
        };
        check.inspect_err(log_rejection)?;

        // Enemy block lasts through the player's turn.
        if state.enemy.block > 0 {
            state.emit(CombatEvent::BlockExpired {
                side: Side::Enemy,
                amount: state.enemy.block,
            });
            state.enemy.clear_block();
        }

        if let Some(action) = state.intent.take() {
            state.emit(CombatEvent::EnemyActed(action));
            match action {
                EnemyAction::Attack(raw) => {
                    let hit = state.player.take_hit(raw);
                    state.emit(CombatEvent::DamageDealt {
                        target: Side::Player,
                        blocked: hit.blocked,
                        health_lost: hit.health_lost,
                    });
                    debug!(raw, blocked = hit.blocked, health = state.player.health, "enemy attacked");
                }
                EnemyAction::Defend(amount) => {
                    state.enemy.gain_block(amount);
                    state.emit(CombatEvent::BlockGained {
                        side: Side::Enemy,
                        amount,
                    });
                    debug!(amount, "enemy defended");
                }
            }
        }

        if state.player.block > 0 {
            state.emit(CombatEvent::BlockExpired {
                side: Side::Player,
                amount: state.player.block,
            });
            state.player.clear_block();
        }

        if state.player.is_dead() {
            let turns = state.turn;
            self.finish(state, CombatOutcome::Defeat { turns });
            return Ok(());
        }

        state.phase = CombatPhase::PlayerTurnStart;
        self.begin_player_turn(state);
        Ok(())
    }

    /// Leave the combat. Allowed any time the combat is active, including
    /// during the enemy's pause.
    #[tracing::instrument(level = "debug", skip_all, fields(turn = state.turn))]
    pub fn flee(&self, state: &mut CombatState) -> Result<(), ActionRejected> {
        if !state.is_active() {
            log_rejection(&ActionRejected::Inactive);
            return Err(ActionRejected::Inactive);
        }
        state.record(ActionKind::Flee, None);
        self.finish(
            state,
            CombatOutcome::Fled {
                gold_lost: self.rules.flee_gold_penalty,
            },
        );
        Ok(())
    }

    /// Dispatch a player command.
    pub fn resolve_player_action(
        &self,
        state: &mut CombatState,
        action: ActionKind,
    ) -> Result<(), ActionRejected> {
        match action {
            ActionKind::PlayCard { hand_index } => self.play_card(state, hand_index),
            ActionKind::EndTurn => self.end_turn(state),
            ActionKind::Flee => self.flee(state),
        }
    }

    fn finish_victory(&self, state: &mut CombatState) {
        let reward = self.rewards.roll(state.tier, &self.cards, &mut state.rng);
        self.finish(state, CombatOutcome::Victory(reward));
    }

    fn finish(&self, state: &mut CombatState, outcome: CombatOutcome) {
        state.phase = outcome.phase();
        state.intent = None;
        info!(turn = state.turn, ?outcome, player_health = state.player.health, "combat ended");
        state.emit(CombatEvent::CombatEnded(outcome.clone()));
        state.outcome = Some(outcome);
    }
}
