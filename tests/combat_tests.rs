//! Combat turn engine tests.
//!
//! Covers the turn cycle end to end:
//! - Card play, energy, and effect ordering
//! - The shuffle-reclaim rule during turn draws and card draws
//! - Enemy intents, block, and the enemy-turn window
//! - Victory, defeat, and flee
//! - Seeded replay

use deck_battler::cards::{CardCategory, CardDefinition, CardId, Deck, Rarity};
use deck_battler::core::{
    ActionKind, ActionRejected, CombatOutcome, CombatPhase, CombatState, GameData, GameRng,
    RulesConfig, Side,
};
use deck_battler::enemies::{EnemyAction, EnemyDefinition, EnemyId, IntentPolicy, Range, Scripted};
use deck_battler::events::CombatEvent;
use deck_battler::piles::Pile;
use deck_battler::rules::CombatEngine;
use tracing_subscriber::EnvFilter;

const STRIKE: CardId = CardId(1);
const DEFEND: CardId = CardId(2);
const POMMEL: CardId = CardId(3);
const SURGE: CardId = CardId(4);

const FLEE_PENALTY: u32 = 15;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine() -> CombatEngine {
    init_tracing();
    let data = GameData::default()
        .with_rules(RulesConfig::default().with_flee_gold_penalty(FLEE_PENALTY))
        .with_card(
            CardDefinition::new(STRIKE, "Strike", 1, CardCategory::Attack)
                .with_rarity(Rarity::Starter)
                .with_damage(6),
        )
        .with_card(
            CardDefinition::new(DEFEND, "Defend", 1, CardCategory::Skill)
                .with_rarity(Rarity::Starter)
                .with_block(5),
        )
        .with_card(
            CardDefinition::new(POMMEL, "Pommel Strike", 1, CardCategory::Attack)
                .with_damage(9)
                .with_draw(1),
        )
        .with_card(CardDefinition::new(SURGE, "Surge", 0, CardCategory::Skill).with_energy(2))
        .with_enemy(EnemyDefinition::new(EnemyId::new(1), "Slime", Range::new(10, 14), Range::new(5, 8)))
        .with_starting_cards(STRIKE, 5)
        .with_starting_cards(DEFEND, 5);
    CombatEngine::new(data).unwrap()
}

fn enemy(health: u32) -> EnemyDefinition {
    EnemyDefinition::new(EnemyId::new(1), "Dummy", Range::fixed(health), Range::fixed(0))
}

fn start(
    engine: &CombatEngine,
    deck: &Deck,
    health: u32,
    policy: Box<dyn IntentPolicy>,
    seed: u64,
) -> CombatState {
    engine.start_combat(deck, engine.fresh_player(), &enemy(health), policy, GameRng::new(seed))
}

fn idle() -> Box<dyn IntentPolicy> {
    Box::new(Scripted::always(EnemyAction::Attack(0)))
}

fn hand_index_of(state: &CombatState, card: CardId) -> Option<usize> {
    state.hand().iter().position(|c| c.card_id == card)
}

// =============================================================================
// Scenarios
// =============================================================================

/// Two strikes kill a 10 health enemy mid-turn.
#[test]
fn test_two_strikes_win() {
    let engine = engine();
    let deck = engine.starting_deck().clone();

    // Find a seed whose opening hand holds at least two strikes.
    let mut state = (0..)
        .map(|seed| start(&engine, &deck, 10, idle(), seed))
        .find(|s| s.hand().iter().filter(|c| c.card_id == STRIKE).count() >= 2)
        .unwrap();

    assert_eq!(state.hand().len(), 5);
    assert_eq!(state.player().energy, 3);

    let first = hand_index_of(&state, STRIKE).unwrap();
    engine.play_card(&mut state, first).unwrap();
    assert_eq!(state.enemy().health, 4);
    assert!(state.is_active());

    let second = hand_index_of(&state, STRIKE).unwrap();
    engine.play_card(&mut state, second).unwrap();
    assert_eq!(state.enemy().health, 0);
    assert_eq!(state.player().energy, 1);

    assert!(!state.is_active());
    assert_eq!(state.phase(), CombatPhase::Victory);
    match state.outcome() {
        Some(CombatOutcome::Victory(reward)) => {
            assert!(!reward.cards.is_empty());
            assert!(reward.cards.iter().all(|c| *c == POMMEL || *c == SURGE));
        }
        other => panic!("expected victory, got {:?}", other),
    }

    assert_eq!(engine.play_card(&mut state, 0), Err(ActionRejected::Inactive));
    assert_eq!(engine.end_turn(&mut state), Err(ActionRejected::Inactive));
}

/// Three cards total, hand size five: every turn draws short after reclaiming.
#[test]
fn test_small_deck_draws_short_and_reclaims() {
    let engine = engine();
    let deck = Deck::from_counts([(DEFEND, 3)]);
    let mut state = start(&engine, &deck, 30, idle(), 1);

    assert_eq!(state.pile_size(Pile::Hand), 3);
    assert_eq!(state.pile_size(Pile::Draw), 0);
    assert_eq!(state.pile_size(Pile::Discard), 0);

    state.drain_events();
    engine.end_turn(&mut state).unwrap();

    assert_eq!(state.pile_size(Pile::Hand), 3);
    assert_eq!(state.pile_size(Pile::Draw), 0);
    assert_eq!(state.pile_size(Pile::Discard), 0);

    let events = state.drain_events();
    assert!(events.contains(&CombatEvent::HandDiscarded { count: 3 }));
    assert!(events.contains(&CombatEvent::Reshuffled { cards: 3 }));
}

/// Attack for 8 into 5 block: 3 damage, block gone.
#[test]
fn test_block_absorbs_then_resets() {
    let engine = engine();
    let deck = Deck::from_counts([(DEFEND, 10)]);
    let mut state = start(
        &engine,
        &deck,
        30,
        Box::new(Scripted::always(EnemyAction::Attack(8))),
        2,
    );
    assert_eq!(state.intent(), Some(EnemyAction::Attack(8)));

    engine.play_card(&mut state, 0).unwrap();
    assert_eq!(state.player().block, 5);

    engine.end_turn(&mut state).unwrap();

    assert_eq!(state.player().block, 0);
    assert_eq!(state.player().health, 80 - 3);
    assert_eq!(state.turn(), 2);
    assert_eq!(state.turn_owner(), Side::Player);
}

/// Out of energy: the play is refused and nothing moves.
#[test]
fn test_play_without_energy_is_a_noop() {
    let engine = engine();
    let deck = Deck::from_counts([(STRIKE, 10)]);
    let mut state = start(&engine, &deck, 100, idle(), 3);

    for _ in 0..3 {
        engine.play_card(&mut state, 0).unwrap();
    }
    assert_eq!(state.player().energy, 0);

    let before = state.view(engine.cards());
    let history = state.history().len();

    assert_eq!(
        engine.play_card(&mut state, 0),
        Err(ActionRejected::InsufficientEnergy {
            card: STRIKE,
            cost: 1,
            energy: 0,
        })
    );

    assert_eq!(state.view(engine.cards()), before);
    assert_eq!(state.history().len(), history);
    assert!(before.hand.iter().all(|c| !c.playable));
}

// =============================================================================
// Card play
// =============================================================================

#[test]
fn test_invalid_hand_index_rejected() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let mut state = start(&engine, &deck, 30, idle(), 4);
    let before = state.view(engine.cards());

    assert_eq!(
        engine.play_card(&mut state, 5),
        Err(ActionRejected::InvalidHandIndex { index: 5, hand_size: 5 })
    );
    assert_eq!(state.view(engine.cards()), before);
}

#[test]
fn test_energy_gain_is_uncapped() {
    let engine = engine();
    let deck = Deck::from_counts([(SURGE, 6)]);
    let mut state = start(&engine, &deck, 30, idle(), 5);

    engine.play_card(&mut state, 0).unwrap();
    engine.play_card(&mut state, 0).unwrap();

    assert_eq!(state.player().energy, 7);
    assert_eq!(state.player().max_energy, 3);

    // Refilled to max, not topped up, next turn.
    engine.end_turn(&mut state).unwrap();
    assert_eq!(state.player().energy, 3);
}

/// The played card reaches the discard pile after its own draw resolves,
/// so it is not shuffled back in by that draw.
#[test]
fn test_played_card_discarded_after_its_draw() {
    let engine = engine();
    let deck = Deck::from_counts([(POMMEL, 6)]);
    let mut state = start(&engine, &deck, 100, idle(), 6);
    assert_eq!(state.pile_size(Pile::Draw), 1);

    engine.play_card(&mut state, 0).unwrap();
    assert_eq!(state.pile_size(Pile::Hand), 5);
    assert_eq!(state.pile_size(Pile::Draw), 0);
    assert_eq!(state.pile_size(Pile::Discard), 1);

    state.drain_events();
    let second = state.hand()[0];
    engine.play_card(&mut state, 0).unwrap();

    // First pommel came back; the second sits alone in the discard pile.
    assert!(state.drain_events().contains(&CombatEvent::Reshuffled { cards: 1 }));
    assert_eq!(state.pile_size(Pile::Hand), 5);
    assert_eq!(state.pile_size(Pile::Draw), 0);
    assert_eq!(state.discard_pile(), &[second]);
    assert_eq!(state.pile_of(second.instance_id), Some(Pile::Discard));
}

fn pile_sizes(state: &CombatState) -> [usize; 3] {
    Pile::ALL.map(|p| state.pile_size(p))
}

/// A reshuffle in the middle of a turn, then the end-of-turn discard and
/// the next turn's draw across the emptied discard pile.
#[test]
fn test_mid_turn_reshuffle_then_end_turn() {
    let engine = engine();
    let deck = Deck::from_counts([(POMMEL, 7)]);
    let mut state = start(&engine, &deck, 1000, idle(), 8);
    assert_eq!(pile_sizes(&state), [2, 5, 0]);

    engine.play_card(&mut state, 0).unwrap();
    assert_eq!(pile_sizes(&state), [1, 5, 1]);
    engine.play_card(&mut state, 0).unwrap();
    assert_eq!(pile_sizes(&state), [0, 5, 2]);

    // Draw pile is empty: both discards come back while the hand is full.
    state.drain_events();
    engine.play_card(&mut state, 0).unwrap();
    assert!(state.drain_events().contains(&CombatEvent::Reshuffled { cards: 2 }));
    assert_eq!(pile_sizes(&state), [1, 5, 1]);
    assert_eq!(state.player().energy, 0);

    engine.end_turn(&mut state).unwrap();
    let events = state.drain_events();
    assert!(events.contains(&CombatEvent::HandDiscarded { count: 5 }));
    assert!(events.contains(&CombatEvent::Reshuffled { cards: 6 }));

    // One card off the old draw pile, four after reclaiming six.
    assert_eq!(state.turn(), 2);
    assert_eq!(pile_sizes(&state), [2, 5, 0]);
    assert_eq!(state.sorted_card_ids(), deck.sorted_card_ids());
}

#[test]
fn test_enemy_defend_still_clears_player_block() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let mut state = (0..)
        .map(|seed| {
            start(&engine, &deck, 50, Box::new(Scripted::always(EnemyAction::Defend(4))), seed)
        })
        .find(|s| hand_index_of(s, DEFEND).is_some())
        .unwrap();

    let defend = hand_index_of(&state, DEFEND).unwrap();
    engine.play_card(&mut state, defend).unwrap();
    assert_eq!(state.player().block, 5);

    state.drain_events();
    engine.end_turn(&mut state).unwrap();

    assert_eq!(state.player().block, 0);
    assert_eq!(state.player().health, state.player().max_health);
    assert_eq!(state.enemy().block, 4);
    assert!(state.drain_events().contains(&CombatEvent::BlockExpired {
        side: Side::Player,
        amount: 5,
    }));
}

#[test]
fn test_history_records_accepted_actions_only() {
    let engine = engine();
    let deck = Deck::from_counts([(DEFEND, 10)]);
    let mut state = start(&engine, &deck, 30, idle(), 7);

    engine.play_card(&mut state, 0).unwrap();
    let _ = engine.play_card(&mut state, 9);
    engine.end_turn(&mut state).unwrap();
    engine.flee(&mut state).unwrap();

    let actions: Vec<_> = state.history().iter().map(|r| (r.turn, r.action, r.card)).collect();
    assert_eq!(
        actions,
        vec![
            (1, ActionKind::PlayCard { hand_index: 0 }, Some(DEFEND)),
            (1, ActionKind::EndTurn, None),
            (2, ActionKind::Flee, None),
        ]
    );
}

// =============================================================================
// Enemy turn
// =============================================================================

#[test]
fn test_player_locked_out_during_enemy_window() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let mut state = start(&engine, &deck, 30, idle(), 8);

    engine.begin_enemy_turn(&mut state).unwrap();
    assert_eq!(state.phase(), CombatPhase::EnemyTurn);
    assert_eq!(state.pile_size(Pile::Hand), 0);

    assert_eq!(
        engine.play_card(&mut state, 0),
        Err(ActionRejected::NotPlayerTurn(Side::Enemy))
    );
    assert_eq!(
        engine.resolve_player_action(&mut state, ActionKind::EndTurn),
        Err(ActionRejected::NotPlayerTurn(Side::Enemy))
    );

    engine.resolve_enemy_turn(&mut state).unwrap();
    assert_eq!(state.phase(), CombatPhase::PlayerActing);
    assert_eq!(state.pile_size(Pile::Hand), 5);

    // Nothing pending any more.
    assert_eq!(
        engine.resolve_enemy_turn(&mut state),
        Err(ActionRejected::WrongPhase(CombatPhase::PlayerActing))
    );
}

#[test]
fn test_flee_during_enemy_window_cancels_enemy_action() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let mut state = start(
        &engine,
        &deck,
        30,
        Box::new(Scripted::always(EnemyAction::Attack(50))),
        9,
    );

    engine.begin_enemy_turn(&mut state).unwrap();
    engine.flee(&mut state).unwrap();

    assert_eq!(state.outcome(), Some(&CombatOutcome::Fled { gold_lost: FLEE_PENALTY }));
    assert_eq!(engine.resolve_enemy_turn(&mut state), Err(ActionRejected::Inactive));
    assert_eq!(state.player().health, 80);
}

#[test]
fn test_defeat() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let mut state = engine.start_combat(
        &deck,
        engine.fresh_player().with_health(7),
        &enemy(30),
        Box::new(Scripted::always(EnemyAction::Attack(7))),
        GameRng::new(10),
    );

    engine.end_turn(&mut state).unwrap();

    assert_eq!(state.player().health, 0);
    assert_eq!(state.phase(), CombatPhase::Defeat);
    assert_eq!(state.outcome(), Some(&CombatOutcome::Defeat { turns: 1 }));
    assert_eq!(state.intent(), None);
    assert_eq!(engine.end_turn(&mut state), Err(ActionRejected::Inactive));
    assert_eq!(engine.flee(&mut state), Err(ActionRejected::Inactive));
}

#[test]
fn test_enemy_defend_then_attack() {
    let engine = engine();
    let deck = Deck::from_counts([(STRIKE, 10)]);
    let mut state = start(
        &engine,
        &deck,
        40,
        Box::new(Scripted::new(vec![EnemyAction::Defend(10), EnemyAction::Attack(4)])),
        11,
    );

    assert_eq!(state.intent(), Some(EnemyAction::Defend(10)));
    engine.end_turn(&mut state).unwrap();
    assert_eq!(state.enemy().block, 10);
    assert_eq!(state.intent(), Some(EnemyAction::Attack(4)));

    // 6 + 6 soaked by 10 block, 2 through.
    engine.play_card(&mut state, 0).unwrap();
    engine.play_card(&mut state, 0).unwrap();
    assert_eq!(state.enemy().block, 0);
    assert_eq!(state.enemy().health, 38);

    engine.end_turn(&mut state).unwrap();
    assert_eq!(state.player().health, 76);
}

// =============================================================================
// Observation
// =============================================================================

#[test]
fn test_opening_event_order() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let mut state = start(&engine, &deck, 12, idle(), 12);

    let events = state.drain_events();
    assert!(matches!(
        events.as_slice(),
        [
            CombatEvent::CombatStarted { enemy_health: 12, .. },
            CombatEvent::TurnStarted { turn: 1 },
            CombatEvent::IntentDeclared(EnemyAction::Attack(0)),
            CombatEvent::CardsDrawn { .. },
        ]
    ));
    assert!(state.drain_events().is_empty());
}

#[test]
fn test_view_reports_draw_pile_as_counts() {
    let engine = engine();
    let deck = engine.starting_deck().clone();
    let state = start(&engine, &deck, 12, idle(), 13);
    let view = state.view(engine.cards());

    assert_eq!(view.draw_pile, 5);
    assert!(view.draw_pile_counts.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(view.draw_pile_counts.iter().map(|(_, n)| n).sum::<usize>(), 5);
    assert_eq!(view.hand.len(), 5);
    assert!(view.hand.iter().all(|c| c.playable && c.cost == 1));
    assert_eq!(view.turn_owner, Side::Player);
    assert_eq!(view.enemy_name, "Dummy");

    // Snapshot is plain data.
    let json = serde_json::to_string(&view).unwrap();
    assert!(json.contains("draw_pile_counts"));
}

#[test]
fn test_seeded_combats_replay_identically() {
    let engine = CombatEngine::standard().unwrap();
    let jaw_worm = engine.enemies().get(EnemyId::new(2)).unwrap();

    let run = |seed: u64| {
        let mut state = engine.start_combat(
            engine.starting_deck(),
            engine.fresh_player(),
            jaw_worm,
            jaw_worm.intent_policy(),
            GameRng::new(seed),
        );
        let mut log = Vec::new();
        for _ in 0..200 {
            if !state.is_active() {
                break;
            }
            let action = match state.view(engine.cards()).hand.iter().find(|c| c.playable) {
                Some(card) => ActionKind::PlayCard { hand_index: card.index },
                None => ActionKind::EndTurn,
            };
            engine.resolve_player_action(&mut state, action).unwrap();
            log.extend(state.drain_events());
        }
        (log, state.view(engine.cards()))
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99).0, run(100).0);
}
