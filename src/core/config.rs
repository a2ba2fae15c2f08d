//! Game configuration types.
//!
//! All tunables are static data loaded at startup:
//! - `RulesConfig`: hand size, energy, player health, pacing, flee penalty
//! - `RewardConfig`: gold ranges and rarity weights per encounter tier
//! - `GameData`: the above plus the card table, enemy table and starting deck
//!
//! `GameData::from_toml_str` parses; `CombatEngine::new` validates. The
//! engine never hardcodes card or enemy content.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{CardDefinition, CardId, Deck};
use crate::enemies::EnemyDefinition;
use crate::rules::RewardConfig;

const STANDARD_DATA: &str = include_str!("../../data/standard.toml");

/// Turn and run rules.
///
/// ```
/// use deck_battler::core::RulesConfig;
///
/// let rules = RulesConfig::default().with_hand_size(6).with_max_energy(4);
/// assert_eq!(rules.hand_size, 6);
/// assert_eq!(rules.enemy_turn_delay_ms, 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Cards in hand after the start-of-turn draw.
    pub hand_size: usize,

    /// Energy restored at the start of each player turn.
    pub max_energy: u32,

    /// Player maximum health at the start of a run.
    pub player_max_health: u32,

    pub starting_gold: u32,

    /// Pause between the player ending the turn and the enemy acting.
    /// Advisory; the engine itself never sleeps.
    pub enemy_turn_delay_ms: u64,

    /// Gold lost when fleeing.
    pub flee_gold_penalty: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            max_energy: 3,
            player_max_health: 80,
            starting_gold: 99,
            enemy_turn_delay_ms: 1000,
            flee_gold_penalty: 0,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_max_energy(mut self, max_energy: u32) -> Self {
        self.max_energy = max_energy;
        self
    }

    #[must_use]
    pub fn with_player_max_health(mut self, health: u32) -> Self {
        self.player_max_health = health;
        self
    }

    #[must_use]
    pub fn with_starting_gold(mut self, gold: u32) -> Self {
        self.starting_gold = gold;
        self
    }

    #[must_use]
    pub fn with_enemy_turn_delay_ms(mut self, delay: u64) -> Self {
        self.enemy_turn_delay_ms = delay;
        self
    }

    #[must_use]
    pub fn with_flee_gold_penalty(mut self, penalty: u32) -> Self {
        self.flee_gold_penalty = penalty;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::InvalidRules("hand_size must be at least 1"));
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::InvalidRules("player_max_health must be at least 1"));
        }
        Ok(())
    }
}

/// `count` copies of one card in the starting deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckEntry {
    pub card: CardId,
    pub count: usize,
}

/// Everything a game needs, in one file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameData {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub rewards: RewardConfig,

    #[serde(default)]
    pub cards: Vec<CardDefinition>,

    #[serde(default)]
    pub enemies: Vec<EnemyDefinition>,

    #[serde(default)]
    pub starting_deck: Vec<DeckEntry>,
}

impl GameData {
    /// Parse game data from TOML. Content is validated by `CombatEngine::new`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// The bundled card and enemy set.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_toml_str(STANDARD_DATA)
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.cards.push(card);
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyDefinition) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Add `count` copies of `card` to the starting deck.
    #[must_use]
    pub fn with_starting_cards(mut self, card: CardId, count: usize) -> Self {
        self.starting_deck.push(DeckEntry { card, count });
        self
    }

    /// Build the starting deck.
    #[must_use]
    pub fn starting_deck(&self) -> Deck {
        Deck::from_counts(self.starting_deck.iter().map(|e| (e.card, e.count)))
    }
}
