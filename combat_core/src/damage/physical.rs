//! Physical damage calculator
//!
//! 1. `base = base_hand_damage + weapon_damage`
//! 2. Multiplicative: `base * (1 + strength * strength_multiplier) + physical_damage`.
//!    Additive: `base + physical_damage`.
//! 3. `+ projectile_damage` for projectile hits, `+ undead_damage` vs undead.
//! 4. Crit roll: chance reduced by the victim's critical_resistance.

use super::{CalculationInput, DamageKind, DamageResult};
use crate::attribute::ids;
use crate::config::{CombatConfig, ScalingMode};
use crate::defense::roll_succeeds;

pub fn calculate_physical_with_roll(
    input: &CalculationInput<'_>,
    config: &CombatConfig,
    crit_roll: f64,
) -> DamageResult {
    let attacker = input.attacker;
    let scaling = &config.scaling;

    let base = scaling.base_hand_damage + attacker.value(ids::WEAPON_DAMAGE);
    let flat = attacker.value(ids::PHYSICAL_DAMAGE);

    let mut damage = match scaling.mode {
        ScalingMode::Multiplicative => {
            let strength = attacker.value(ids::STRENGTH);
            base * (1.0 + strength * scaling.strength_multiplier) + flat
        }
        ScalingMode::Additive => base + flat,
    };

    let mut result = DamageResult::default();
    damage += input.situational_bonus(&mut result);

    let (chance, multiplier) = crit_stats(input, config);
    if roll_succeeds(chance, crit_roll) {
        damage *= multiplier / 100.0;
        result.is_critical = true;
    }

    result.amount = damage;
    result.physical_amount = damage;
    result.add_tag(DamageKind::Physical.label());
    result
}

/// Effective crit chance and crit damage (both percent)
pub fn crit_stats(input: &CalculationInput<'_>, config: &CombatConfig) -> (f64, f64) {
    let attacker = input.attacker;
    let chance = attacker.value_or(ids::CRITICAL_CHANCE, config.crit.default_chance);
    let resistance = input.victim.attributes().value(ids::CRITICAL_RESISTANCE);
    let damage = attacker.value_or(ids::CRITICAL_DAMAGE, config.crit.default_damage);
    ((chance - resistance).max(0.0), damage)
}
