//! Thorns - Reflect part of a physical hit back at the attacker
//!
//! `reflected = (physical + elemental) * thorns / 100`, only for hits tagged
//! Physical or Projectile. The reflection goes through the host's normal damage
//! path with [`DamageCause::Thorns`], which is not Physical, so a reflected hit
//! never reflects again.

use crate::attribute::ids;
use crate::context::{DamageCategory, DamageCause, DamageContext};
use crate::entity::{Combatant, DamageApplication};

/// Amount to reflect, `None` if thorns does not trigger
pub fn thorns_reflection(
    context: &DamageContext,
    physical_damage: f64,
    elemental_damage: f64,
    thorns_percent: f64,
) -> Option<f64> {
    if !(context.has(DamageCategory::Physical) || context.has(DamageCategory::Projectile)) {
        return None;
    }
    let reflected = (physical_damage + elemental_damage) * thorns_percent / 100.0;
    (reflected > 0.0).then_some(reflected)
}

/// Reflect damage from the victim onto the attacker through the host
pub fn apply_thorns(
    context: &DamageContext,
    victim: &dyn Combatant,
    attacker: &dyn Combatant,
    physical_damage: f64,
    elemental_damage: f64,
    host: &mut dyn DamageApplication,
) -> Option<f64> {
    let thorns = victim.attributes().value(ids::THORNS);
    let reflected = thorns_reflection(context, physical_damage, elemental_damage, thorns)?;
    host.apply_damage(attacker.id(), reflected, Some(victim.id()), DamageCause::Thorns);
    Some(reflected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{CombatEntity, RecordingHost};

    #[test]
    fn test_reflection_amount() {
        let ctx = DamageContext::from_cause(DamageCause::Melee);
        assert_eq!(thorns_reflection(&ctx, 40.0, 10.0, 10.0), Some(5.0));
    }

    #[test]
    fn test_projectile_reflects() {
        let ctx = DamageContext::from_cause(DamageCause::Projectile);
        assert_eq!(thorns_reflection(&ctx, 20.0, 0.0, 50.0), Some(10.0));
    }

    #[test]
    fn test_spell_does_not_reflect() {
        let ctx = DamageContext::from_cause(DamageCause::Spell);
        assert_eq!(thorns_reflection(&ctx, 40.0, 10.0, 10.0), None);
    }

    #[test]
    fn test_reflection_does_not_chain() {
        let ctx = DamageContext::from_cause(DamageCause::Thorns);
        assert_eq!(thorns_reflection(&ctx, 40.0, 10.0, 100.0), None);
    }

    #[test]
    fn test_zero_thorns() {
        let ctx = DamageContext::from_cause(DamageCause::Melee);
        assert_eq!(thorns_reflection(&ctx, 40.0, 10.0, 0.0), None);
    }

    #[test]
    fn test_apply_goes_through_host() {
        let ctx = DamageContext::from_cause(DamageCause::Melee);
        let attacker = CombatEntity::player("hero", 100.0);
        let victim = CombatEntity::new("cactus_golem", 200.0).with_attribute(ids::THORNS, 25.0);
        let mut host = RecordingHost::new();

        let reflected = apply_thorns(&ctx, &victim, &attacker, 20.0, 0.0, &mut host);
        assert_eq!(reflected, Some(5.0));
        assert_eq!(host.damage_applied.len(), 1);
        let hit = &host.damage_applied[0];
        assert_eq!(hit.target, "hero");
        assert_eq!(hit.source.as_deref(), Some("cactus_golem"));
        assert_eq!(hit.cause, DamageCause::Thorns);
    }
}
