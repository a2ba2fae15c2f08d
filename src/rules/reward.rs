//! Victory rewards: gold and a card offer.
//!
//! Gold is rolled in the tier's range. The offer is `choices` distinct
//! cards; each pick first rolls a rarity by the tier's weight table, then
//! a card of that rarity uniformly. Starter cards are never offered.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, CardRegistry, Rarity};
use crate::core::{ConfigError, GameRng};
use crate::enemies::{EncounterTier, Range};

/// Gold and card offer earned by a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub gold: u32,

    /// Distinct candidate cards. The player picks at most one.
    pub cards: SmallVec<[CardId; 3]>,
}

impl Reward {
    #[must_use]
    pub fn offers(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }
}

/// Relative odds of each rewardable rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
}

impl RarityWeights {
    #[must_use]
    pub const fn new(common: u32, uncommon: u32, rare: u32) -> Self {
        Self { common, uncommon, rare }
    }

    /// Weights in `Rarity::REWARDABLE` order.
    #[must_use]
    pub const fn as_array(&self) -> [u32; 3] {
        [self.common, self.uncommon, self.rare]
    }

    fn is_zero(&self) -> bool {
        self.common == 0 && self.uncommon == 0 && self.rare == 0
    }
}

/// Reward parameters for one encounter tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRewards {
    pub gold: Range,
    pub weights: RarityWeights,
}

/// Reward parameters for every tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Cards offered per victory.
    pub choices: usize,
    pub normal: TierRewards,
    pub elite: TierRewards,
    pub boss: TierRewards,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            choices: 3,
            normal: TierRewards {
                gold: Range::new(10, 20),
                weights: RarityWeights::new(60, 37, 3),
            },
            elite: TierRewards {
                gold: Range::new(25, 35),
                weights: RarityWeights::new(50, 40, 10),
            },
            boss: TierRewards {
                gold: Range::new(95, 105),
                weights: RarityWeights::new(0, 0, 100),
            },
        }
    }
}

impl RewardConfig {
    #[must_use]
    pub fn with_choices(mut self, choices: usize) -> Self {
        self.choices = choices;
        self
    }

    #[must_use]
    pub fn with_tier(mut self, tier: EncounterTier, rewards: TierRewards) -> Self {
        match tier {
            EncounterTier::Normal => self.normal = rewards,
            EncounterTier::Elite => self.elite = rewards,
            EncounterTier::Boss => self.boss = rewards,
        }
        self
    }

    #[must_use]
    pub fn tier(&self, tier: EncounterTier) -> &TierRewards {
        match tier {
            EncounterTier::Normal => &self.normal,
            EncounterTier::Elite => &self.elite,
            EncounterTier::Boss => &self.boss,
        }
    }

    pub(crate) fn validate(&self, cards: &CardRegistry) -> Result<(), ConfigError> {
        for tier in [&self.normal, &self.elite, &self.boss] {
            if tier.gold.min > tier.gold.max {
                return Err(ConfigError::InvalidRules("reward gold range is inverted"));
            }
            if tier.weights.is_zero() {
                return Err(ConfigError::InvalidRules("reward rarity weights are all zero"));
            }
        }
        if self.choices > 0
            && Rarity::REWARDABLE
                .iter()
                .all(|&r| cards.ids_by_rarity(r).is_empty())
        {
            return Err(ConfigError::EmptyRewardPool("rewardable"));
        }
        Ok(())
    }

    /// Roll the reward for beating an enemy of `tier`.
    ///
    /// Offers fewer than `choices` cards only when the pool runs out. When
    /// the weighted rarities are exhausted the remaining rarities are used.
    pub fn roll(&self, tier: EncounterTier, cards: &CardRegistry, rng: &mut GameRng) -> Reward {
        let table = self.tier(tier);
        let gold = table.gold.roll(rng);

        let mut pools: [Vec<CardId>; 3] = Rarity::REWARDABLE.map(|r| cards.ids_by_rarity(r));
        let weights = table.weights.as_array();
        let mut offer = SmallVec::new();

        for _ in 0..self.choices {
            let live: [u32; 3] =
                std::array::from_fn(|i| if pools[i].is_empty() { 0 } else { weights[i] });
            let fallback: [u32; 3] = std::array::from_fn(|i| u32::from(!pools[i].is_empty()));

            let Some(slot) = rng
                .choose_weighted(&live)
                .or_else(|| rng.choose_weighted(&fallback))
            else {
                break;
            };

            let pool = &mut pools[slot];
            let card = pool.remove(rng.gen_index(pool.len()));
            offer.push(card);
        }

        Reward { gold, cards: offer }
    }
}
