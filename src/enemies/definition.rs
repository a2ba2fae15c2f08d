//! Enemy definitions - the static enemy table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::intent::{EnemyAction, IntentPolicy, RandomAttack, Scripted, Weighted};
use crate::core::{Combatant, ConfigError, GameRng};

/// Unique identifier for an enemy definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(pub u32);

impl EnemyId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enemy({})", self.0)
    }
}

/// Encounter difficulty. Harder tiers pay more gold and roll rarer cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterTier {
    #[default]
    Normal,
    Elite,
    Boss,
}

/// Inclusive `[min, max]` range, written `[6, 9]` in game data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn fixed(value: u32) -> Self {
        Self { min: value, max: value }
    }

    #[must_use]
    pub fn roll(&self, rng: &mut GameRng) -> u32 {
        rng.gen_range_inclusive(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl From<[u32; 2]> for Range {
    fn from([min, max]: [u32; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Range> for [u32; 2] {
    fn from(r: Range) -> Self {
        [r.min, r.max]
    }
}

fn default_attack_weight() -> u32 {
    1
}

/// Static enemy definition.
///
/// The intent policy is derived from the definition: a non-empty `script`
/// cycles through fixed actions, a non-zero `defend_weight` mixes attacks
/// and defends, otherwise every turn is an attack rolled in `damage`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,

    #[serde(default)]
    pub tier: EncounterTier,

    /// Starting (and maximum) health, rolled per combat.
    pub health: Range,

    /// Attack damage, rolled per intent.
    pub damage: Range,

    /// Block gained by a defend intent.
    #[serde(default = "no_block")]
    pub block: Range,

    #[serde(default = "default_attack_weight")]
    pub attack_weight: u32,

    #[serde(default)]
    pub defend_weight: u32,

    /// Fixed action cycle; overrides the random behaviour when non-empty.
    #[serde(default)]
    pub script: Vec<EnemyAction>,
}

fn no_block() -> Range {
    Range::fixed(0)
}

impl EnemyDefinition {
    /// An enemy that attacks for a roll in `damage` every turn.
    #[must_use]
    pub fn new(id: EnemyId, name: impl Into<String>, health: Range, damage: Range) -> Self {
        Self {
            id,
            name: name.into(),
            tier: EncounterTier::Normal,
            health,
            damage,
            block: no_block(),
            attack_weight: default_attack_weight(),
            defend_weight: 0,
            script: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: EncounterTier) -> Self {
        self.tier = tier;
        self
    }

    /// Mix in defend intents with the given weights.
    #[must_use]
    pub fn with_defend(mut self, block: Range, attack_weight: u32, defend_weight: u32) -> Self {
        self.block = block;
        self.attack_weight = attack_weight;
        self.defend_weight = defend_weight;
        self
    }

    #[must_use]
    pub fn with_script(mut self, script: Vec<EnemyAction>) -> Self {
        self.script = script;
        self
    }

    /// Roll a fresh combatant for a combat.
    #[must_use]
    pub fn spawn(&self, rng: &mut GameRng) -> Combatant {
        Combatant::new(self.health.roll(rng))
    }

    /// The intent policy this definition describes.
    #[must_use]
    pub fn intent_policy(&self) -> Box<dyn IntentPolicy> {
        if !self.script.is_empty() {
            Box::new(Scripted::new(self.script.clone()))
        } else if self.defend_weight > 0 {
            Box::new(Weighted {
                damage: self.damage,
                block: self.block,
                attack_weight: self.attack_weight,
                defend_weight: self.defend_weight,
            })
        } else {
            Box::new(RandomAttack { damage: self.damage })
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, range) in [("health", self.health), ("damage", self.damage), ("block", self.block)] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange {
                    enemy: self.id,
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.health.min == 0 {
            return Err(ConfigError::ZeroEnemyHealth(self.id));
        }
        Ok(())
    }
}

/// The enemy table.
#[derive(Clone, Debug, Default)]
pub struct EnemyRegistry {
    enemies: FxHashMap<EnemyId, EnemyDefinition>,
}

impl EnemyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        enemies: impl IntoIterator<Item = EnemyDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for enemy in enemies {
            registry.register(enemy)?;
        }
        Ok(registry)
    }

    /// Register an enemy, validating its ranges.
    pub fn register(&mut self, enemy: EnemyDefinition) -> Result<(), ConfigError> {
        if self.enemies.contains_key(&enemy.id) {
            return Err(ConfigError::DuplicateEnemy(enemy.id));
        }
        enemy.validate()?;
        self.enemies.insert(enemy.id, enemy);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Enemies of one tier, sorted by id.
    #[must_use]
    pub fn by_tier(&self, tier: EncounterTier) -> Vec<&EnemyDefinition> {
        let mut found: Vec<_> = self.enemies.values().filter(|e| e.tier == tier).collect();
        found.sort_unstable_by_key(|e| e.id);
        found
    }
}
