//! Magical damage calculator
//!
//! Same shape as the physical calculator with intelligence and
//! `magic_damage` in place of strength and the physical flats. The event's
//! base damage is the spell base; anything under `min_spell_base_damage` is
//! incidental punch damage and counts as no base. Magic never crits.

use super::{CalculationInput, DamageKind, DamageResult};
use crate::attribute::ids;
use crate::config::{CombatConfig, ScalingMode};

pub fn calculate_magical(input: &CalculationInput<'_>, config: &CombatConfig) -> DamageResult {
    let attacker = input.attacker;
    let scaling = &config.scaling;

    let spell_base = if input.base_damage < scaling.min_spell_base_damage {
        0.0
    } else {
        input.base_damage
    };
    let flat = attacker.value(ids::MAGIC_DAMAGE);

    let mut damage = match scaling.mode {
        ScalingMode::Multiplicative => {
            let intelligence = attacker.value(ids::INTELLIGENCE);
            spell_base * (1.0 + intelligence * scaling.intelligence_multiplier) + flat
        }
        ScalingMode::Additive => spell_base + flat,
    };

    let mut result = DamageResult::default();
    damage += input.situational_bonus(&mut result);

    result.amount = damage;
    result.add_tag(DamageKind::Magical.label());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeSet;
    use crate::context::{DamageCategory, DamageCause, DamageContext};
    use crate::entity::CombatEntity;

    #[test]
    fn test_multiplicative_spell() {
        // 20 * (1 + 100 * 0.01) + 5 = 45
        let attacker = AttributeSet::new()
            .with(ids::INTELLIGENCE, 100.0)
            .with(ids::MAGIC_DAMAGE, 5.0);
        let victim = CombatEntity::new("witch", 30.0);
        let ctx = DamageContext::from_cause(DamageCause::Spell);
        let input = CalculationInput::new(&attacker, &victim, &ctx, 20.0);

        let result = calculate_magical(&input, &CombatConfig::default());
        assert!((result.amount - 45.0).abs() < 1e-9);
        assert!(!result.is_critical);
        assert_eq!(result.tags, vec!["Magical"]);
    }

    #[test]
    fn test_punch_damage_is_not_a_spell_base() {
        let attacker = AttributeSet::new()
            .with(ids::INTELLIGENCE, 100.0)
            .with(ids::MAGIC_DAMAGE, 5.0);
        let victim = CombatEntity::new("witch", 30.0);
        let ctx = DamageContext::from_cause(DamageCause::Spell);
        let input = CalculationInput::new(&attacker, &victim, &ctx, 0.5);

        let result = calculate_magical(&input, &CombatConfig::default());
        assert!((result.amount - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_at_threshold_counts() {
        let attacker = AttributeSet::new();
        let victim = CombatEntity::new("witch", 30.0);
        let ctx = DamageContext::from_cause(DamageCause::Spell);
        let input = CalculationInput::new(&attacker, &victim, &ctx, 1.0);

        let result = calculate_magical(&input, &CombatConfig::default());
        assert!((result.amount - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_additive_spell() {
        let mut cfg = CombatConfig::default();
        cfg.scaling.mode = ScalingMode::Additive;
        let attacker = AttributeSet::new()
            .with(ids::INTELLIGENCE, 100.0)
            .with(ids::MAGIC_DAMAGE, 5.0);
        let victim = CombatEntity::new("witch", 30.0);
        let ctx = DamageContext::from_cause(DamageCause::Spell);
        let input = CalculationInput::new(&attacker, &victim, &ctx, 20.0);

        let result = calculate_magical(&input, &cfg);
        assert!((result.amount - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_magic_projectile_vs_undead() {
        let attacker = AttributeSet::new()
            .with(ids::PROJECTILE_DAMAGE, 2.0)
            .with(ids::UNDEAD_DAMAGE, 3.0);
        let victim = CombatEntity::new("wraith", 30.0).undead();
        let ctx = DamageContext::with_categories(
            DamageCause::Spell,
            [DamageCategory::Magical, DamageCategory::Projectile],
        );
        let input = CalculationInput::new(&attacker, &victim, &ctx, 10.0);

        let result = calculate_magical(&input, &CombatConfig::default());
        assert!((result.amount - 15.0).abs() < 1e-9);
        assert_eq!(result.tags, vec!["Projectile", "Magical"]);
    }
}
