//! LifeSteal - Heal the attacker for a share of the damage dealt
//!
//! `heal = final_damage * lifesteal / 100`, new health clamped to max health.

use crate::attribute::ids;
use crate::entity::{Combatant, DamageApplication};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeStealOutcome {
    /// Heal before clamping
    pub heal: f64,
    /// Health actually gained
    pub healed: f64,
    pub new_health: f64,
}

/// Raw heal amount, `None` if lifesteal does not trigger
pub fn lifesteal_heal(final_damage: f64, lifesteal_percent: f64) -> Option<f64> {
    if lifesteal_percent <= 0.0 || final_damage <= 0.0 {
        return None;
    }
    Some(final_damage * lifesteal_percent / 100.0)
}

/// Heal the attacker through the host and sync their health
///
/// Health already above max (overheal from elsewhere) is left alone.
pub fn apply_lifesteal(
    attacker: &dyn Combatant,
    final_damage: f64,
    host: &mut dyn DamageApplication,
) -> Option<LifeStealOutcome> {
    let heal = lifesteal_heal(final_damage, attacker.attributes().value(ids::LIFESTEAL))?;

    let current = attacker.health();
    let new_health = (current + heal).min(attacker.max_health()).max(current);
    host.set_health(attacker.id(), new_health);

    Some(LifeStealOutcome {
        heal,
        healed: new_health - current,
        new_health,
    })
}
