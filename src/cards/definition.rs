//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: "Strike"
//! costs 1 and deals 6 damage. Which pile a copy of it sits in is tracked
//! separately through `CardInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the kind of card (e.g. "Strike"), not a copy of it in a
/// deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Attack,
    Skill,
    Power,
}

/// Card rarity. Drives reward weighting; starter cards are never offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Starter,
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Rarities that can appear in a reward offer, in weight-table order.
    pub const REWARDABLE: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];
}

fn one() -> u32 {
    1
}

/// What a card does when played.
///
/// Applied in field order by the effect resolver: damage (`repeat` times),
/// block, draw, energy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    /// Damage dealt to the enemy per hit.
    #[serde(default)]
    pub damage: u32,

    /// Number of hits. Must be at least 1.
    #[serde(default = "one")]
    pub repeat: u32,

    /// Block gained by the player.
    #[serde(default)]
    pub block: u32,

    /// Cards drawn.
    #[serde(default)]
    pub draw: u32,

    /// Energy gained. Not capped by max energy.
    #[serde(default)]
    pub energy: u32,
}

impl CardEffect {
    /// An effect that does nothing (repeat 1).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            damage: 0,
            repeat: 1,
            block: 0,
            draw: 0,
            energy: 0,
        }
    }

    /// Total damage if every hit lands on an unblocked enemy.
    #[must_use]
    pub const fn total_damage(&self) -> u32 {
        self.damage.saturating_mul(self.repeat)
    }
}

/// Static card definition.
///
/// ```
/// use deck_battler::cards::{CardCategory, CardDefinition, CardId};
///
/// let twin = CardDefinition::new(CardId::new(3), "Twin Strike", 1, CardCategory::Attack)
///     .with_damage(5)
///     .with_repeat(2);
///
/// assert_eq!(twin.effect.total_damage(), 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CardRecord")]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Energy cost.
    pub cost: u32,

    pub category: CardCategory,

    #[serde(default)]
    pub rarity: Rarity,

    #[serde(flatten)]
    pub effect: CardEffect,
}

/// Flat on-disk form of a card. Unknown keys are rejected, so a misspelt
/// effect field fails to load instead of becoming a zero.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CardRecord {
    id: CardId,
    name: String,
    cost: u32,
    category: CardCategory,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default)]
    damage: u32,
    #[serde(default = "one")]
    repeat: u32,
    #[serde(default)]
    block: u32,
    #[serde(default)]
    draw: u32,
    #[serde(default)]
    energy: u32,
}

impl From<CardRecord> for CardDefinition {
    fn from(record: CardRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            cost: record.cost,
            category: record.category,
            rarity: record.rarity,
            effect: CardEffect {
                damage: record.damage,
                repeat: record.repeat,
                block: record.block,
                draw: record.draw,
                energy: record.energy,
            },
        }
    }
}

impl CardDefinition {
    /// Create a new card definition with no effect.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, cost: u32, category: CardCategory) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            category,
            rarity: Rarity::default(),
            effect: CardEffect::none(),
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.effect.damage = damage;
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.effect.repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: u32) -> Self {
        self.effect.block = block;
        self
    }

    #[must_use]
    pub fn with_draw(mut self, draw: u32) -> Self {
        self.effect.draw = draw;
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy: u32) -> Self {
        self.effect.energy = energy;
        self
    }
}
