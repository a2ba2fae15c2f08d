//! Combatant state: health, energy, block.
//!
//! All values are unsigned. Damage saturates at zero health; block absorbs
//! before health does.

use serde::{Deserialize, Serialize};

/// Health, energy, and block for one side of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combatant {
    pub health: u32,
    pub max_health: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub block: u32,
}

/// How a single hit was split between block and health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    /// Damage soaked by block.
    pub blocked: u32,
    /// Health actually lost.
    pub health_lost: u32,
}

impl Combatant {
    /// A combatant at full health with no energy budget.
    #[must_use]
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            energy: 0,
            max_energy: 0,
            block: 0,
        }
    }

    /// Set the per-turn energy budget.
    #[must_use]
    pub fn with_max_energy(mut self, max_energy: u32) -> Self {
        self.max_energy = max_energy;
        self
    }

    /// Start below full health. Clamped to `max_health`.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Apply one hit: block absorbs first, the rest comes off health.
    pub fn take_hit(&mut self, raw: u32) -> HitResult {
        let blocked = self.block.min(raw);
        self.block -= blocked;
        let health_lost = (raw - blocked).min(self.health);
        self.health -= health_lost;
        HitResult { blocked, health_lost }
    }

    pub fn gain_block(&mut self, amount: u32) {
        self.block = self.block.saturating_add(amount);
    }

    pub fn clear_block(&mut self) {
        self.block = 0;
    }

    /// Refill energy to the per-turn budget.
    pub fn refill_energy(&mut self) {
        self.energy = self.max_energy;
    }

    /// Spend energy. Returns `false` (no change) if there isn't enough.
    pub fn spend_energy(&mut self, amount: u32) -> bool {
        if amount > self.energy {
            return false;
        }
        self.energy -= amount;
        true
    }

    /// Gain energy. Not capped by `max_energy`.
    pub fn gain_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount);
    }
}
