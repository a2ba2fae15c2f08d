//! Enemy intents and the policies that choose them.
//!
//! An intent is declared at the start of each player turn and resolved
//! when the player ends the turn, so the player can plan around it.
//! Policies are trait-based so tests can plug in deterministic behaviour.

use serde::{Deserialize, Serialize};

use super::definition::Range;
use crate::core::{Combatant, GameRng};

/// What an enemy will do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyAction {
    /// Deal this much damage to the player.
    Attack(u32),
    /// Gain this much block.
    Defend(u32),
}

impl EnemyAction {
    /// Incoming damage if this is an attack, otherwise zero.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        match self {
            EnemyAction::Attack(n) => *n,
            EnemyAction::Defend(_) => 0,
        }
    }
}

/// Chooses the enemy's next action.
///
/// Called once per player turn, before the player acts.
pub trait IntentPolicy: std::fmt::Debug + Send {
    fn decide(&mut self, enemy: &Combatant, player: &Combatant, rng: &mut GameRng) -> EnemyAction;
}

/// Attack every turn for a uniform roll in `damage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomAttack {
    pub damage: Range,
}

impl IntentPolicy for RandomAttack {
    fn decide(&mut self, _enemy: &Combatant, _player: &Combatant, rng: &mut GameRng) -> EnemyAction {
        EnemyAction::Attack(self.damage.roll(rng))
    }
}

/// Cycle through a fixed list of actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scripted {
    actions: Vec<EnemyAction>,
    next: usize,
}

impl Scripted {
    /// An empty script falls back to `Attack(0)`.
    #[must_use]
    pub fn new(actions: Vec<EnemyAction>) -> Self {
        Self { actions, next: 0 }
    }

    /// Repeat one action every turn.
    #[must_use]
    pub fn always(action: EnemyAction) -> Self {
        Self::new(vec![action])
    }
}

impl IntentPolicy for Scripted {
    fn decide(&mut self, _enemy: &Combatant, _player: &Combatant, _rng: &mut GameRng) -> EnemyAction {
        if self.actions.is_empty() {
            return EnemyAction::Attack(0);
        }
        let action = self.actions[self.next % self.actions.len()];
        self.next = (self.next + 1) % self.actions.len();
        action
    }
}

/// Weighted choice between attacking and defending.
///
/// Never defends while it already holds block, so a turtle enemy still
/// threatens the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weighted {
    pub damage: Range,
    pub block: Range,
    pub attack_weight: u32,
    pub defend_weight: u32,
}

impl IntentPolicy for Weighted {
    fn decide(&mut self, enemy: &Combatant, _player: &Combatant, rng: &mut GameRng) -> EnemyAction {
        let defend_weight = if enemy.block > 0 { 0 } else { self.defend_weight };
        match rng.choose_weighted(&[self.attack_weight, defend_weight]) {
            Some(1) => EnemyAction::Defend(self.block.roll(rng)),
            _ => EnemyAction::Attack(self.damage.roll(rng)),
        }
    }
}

/// Adapts a plain function into an [`IntentPolicy`].
///
/// ```
/// use deck_battler::core::{Combatant, GameRng};
/// use deck_battler::enemies::{EnemyAction, FnPolicy, IntentPolicy};
///
/// // Hit harder when the player is low.
/// let mut policy = FnPolicy(|_enemy: &Combatant, player: &Combatant, _rng: &mut GameRng| {
///     if player.health < 10 { EnemyAction::Attack(20) } else { EnemyAction::Attack(5) }
/// });
///
/// let enemy = Combatant::new(30);
/// let player = Combatant::new(50).with_health(8);
/// assert_eq!(policy.decide(&enemy, &player, &mut GameRng::new(0)), EnemyAction::Attack(20));
/// ```
pub struct FnPolicy<F>(pub F);

impl<F> std::fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnPolicy")
    }
}

impl<F> IntentPolicy for FnPolicy<F>
where
    F: FnMut(&Combatant, &Combatant, &mut GameRng) -> EnemyAction + Send,
{
    fn decide(&mut self, enemy: &Combatant, player: &Combatant, rng: &mut GameRng) -> EnemyAction {
        (self.0)(enemy, player, rng)
    }
}
