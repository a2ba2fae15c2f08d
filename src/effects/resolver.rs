//! Applies a card's effect payload to a combat.

use crate::cards::CardEffect;
use crate::core::{CombatState, Side};
use crate::events::CombatEvent;

/// What an effect actually did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectReport {
    /// Hits that landed before the enemy died (or all of them).
    pub hits: u32,
    pub blocked: u32,
    pub health_lost: u32,
    pub block_gained: u32,
    pub cards_drawn: usize,
    pub energy_gained: u32,
}

/// Resolves card effects on combat state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `effect` in order: damage, block, draw, energy.
    ///
    /// Each hit is absorbed by enemy block first. Remaining hits are
    /// skipped once the enemy reaches zero health; the non-damage parts
    /// still apply.
    pub fn resolve(state: &mut CombatState, effect: &CardEffect) -> EffectReport {
        let mut report = EffectReport::default();

        if effect.damage > 0 {
            for _ in 0..effect.repeat {
                if state.enemy.is_dead() {
                    break;
                }
                let hit = state.enemy.take_hit(effect.damage);
                report.hits += 1;
                report.blocked += hit.blocked;
                report.health_lost += hit.health_lost;
                state.emit(CombatEvent::DamageDealt {
                    target: Side::Enemy,
                    blocked: hit.blocked,
                    health_lost: hit.health_lost,
                });
            }
        }

        if effect.block > 0 {
            state.player.gain_block(effect.block);
            report.block_gained = effect.block;
            state.emit(CombatEvent::BlockGained {
                side: Side::Player,
                amount: effect.block,
            });
        }

        if effect.draw > 0 {
            report.cards_drawn = state.draw_cards(effect.draw as usize);
        }

        if effect.energy > 0 {
            state.player.gain_energy(effect.energy);
            report.energy_gained = effect.energy;
            state.emit(CombatEvent::EnergyGained { amount: effect.energy });
        }

        report
    }
}
