//! Mitigation handler - Flat reductions, penetration, defense curve, hard cap
//!
//! Steps, in order:
//! 1. Sum every applicable `*_damage_reduction` percentage and apply it once
//!    as `max(0, 1 - total / 100)`.
//! 2. Read the attacker's penetration (all zero with no attacker).
//! 3. Pick the divisor (fixed, or level-scaled).
//! 4. Run the defense curve for the physical and/or magical path; hybrid hits
//!    take the larger of the two.
//! 5. Global damage forces mitigation to 0.
//! 6. Clamp to `max_mitigation`.
//! 7. `damage *= 1 - mitigation`.

use super::curve::{curve_mitigation, effective_defense};
use crate::attribute::{ids, AttributeView};
use crate::config::MitigationConfig;
use crate::context::{DamageCategory, DamageCause, DamageContext};
use serde::{Deserialize, Serialize};

/// Attacker penetration stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Penetration {
    /// Percent armor penetration
    pub armor: f64,
    pub armor_flat: f64,
    /// Percent magic penetration
    pub magic: f64,
    pub magic_flat: f64,
}

impl Penetration {
    pub fn from_attacker(attacker: Option<&dyn AttributeView>) -> Self {
        match attacker {
            Some(a) => Penetration {
                armor: a.value(ids::ARMOR_PENETRATION),
                armor_flat: a.value(ids::ARMOR_PENETRATION_FLAT),
                magic: a.value(ids::MAGIC_PENETRATION),
                magic_flat: a.value(ids::MAGIC_PENETRATION_FLAT),
            },
            None => Penetration::default(),
        }
    }
}

/// Everything the handler reads for one hit
#[derive(Clone, Copy)]
pub struct MitigationInput<'a> {
    pub damage: f64,
    pub victim: &'a dyn AttributeView,
    pub attacker: Option<&'a dyn AttributeView>,
    pub attacker_level: u32,
    pub attacker_is_player: bool,
    pub context: &'a DamageContext,
}

/// Record of each mitigation step for one hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MitigationBreakdown {
    pub incoming: f64,
    /// Unclamped sum of flat reduction percentages
    pub flat_reduction_percent: f64,
    pub after_flat_reduction: f64,
    pub penetration: Penetration,
    pub divisor: f64,
    pub physical_mitigation: Option<f64>,
    pub magical_mitigation: Option<f64>,
    /// Mitigation after the Global override, before the cap
    pub uncapped_mitigation: f64,
    pub applied_mitigation: f64,
    pub final_damage: f64,
}

impl MitigationBreakdown {
    pub fn was_capped(&self) -> bool {
        self.uncapped_mitigation > self.applied_mitigation
    }
}

/// Applies defensive mitigation to calculator output
#[derive(Debug, Clone, Copy)]
pub struct MitigationHandler<'c> {
    config: &'c MitigationConfig,
}

impl<'c> MitigationHandler<'c> {
    pub fn new(config: &'c MitigationConfig) -> Self {
        MitigationHandler { config }
    }

    /// Final damage after all mitigation steps
    pub fn apply(&self, input: MitigationInput<'_>) -> f64 {
        self.breakdown(input).final_damage
    }

    /// Run all mitigation steps and record each one
    pub fn breakdown(&self, input: MitigationInput<'_>) -> MitigationBreakdown {
        let ctx = input.context;

        // Step 1: flat percentage reductions
        let flat_reduction_percent = flat_reduction(input.victim, ctx, input.attacker_is_player);
        let multiplier = (1.0 - flat_reduction_percent / 100.0).max(0.0);
        let after_flat_reduction = input.damage * multiplier;

        // Step 2-3: penetration and divisor
        let penetration = Penetration::from_attacker(input.attacker);
        let divisor = self.config.divisor_for_level(input.attacker_level);

        // Step 4: defense curve per path
        let physical_mitigation = ctx.uses_physical_defense().then(|| {
            let defense = effective_defense(
                input.victim.value(ids::DEFENSE),
                penetration.armor_flat,
                penetration.armor,
            );
            curve_mitigation(defense, divisor)
        });
        let magical_mitigation = ctx.uses_magic_resistance().then(|| {
            let resistance = effective_defense(
                input.victim.value(ids::MAGIC_RESISTANCE),
                penetration.magic_flat,
                penetration.magic,
            );
            curve_mitigation(resistance, divisor)
        });

        let mut mitigation = match (physical_mitigation, magical_mitigation) {
            (Some(p), Some(m)) => p.max(m),
            (Some(p), None) => p,
            (None, Some(m)) => m,
            (None, None) => 0.0,
        };

        // Step 5: true damage
        if ctx.is_global() {
            mitigation = 0.0;
        }
        let uncapped_mitigation = mitigation;

        // Step 6: hard cap
        let applied_mitigation = mitigation.min(self.config.max_mitigation).max(0.0);

        // Step 7
        let final_damage = after_flat_reduction * (1.0 - applied_mitigation);

        tracing::trace!(
            incoming = input.damage,
            flat_reduction_percent,
            divisor,
            ?physical_mitigation,
            ?magical_mitigation,
            applied_mitigation,
            final_damage,
            "mitigation applied"
        );

        MitigationBreakdown {
            incoming: input.damage,
            flat_reduction_percent,
            after_flat_reduction,
            penetration,
            divisor,
            physical_mitigation,
            magical_mitigation,
            uncapped_mitigation,
            applied_mitigation,
            final_damage,
        }
    }
}

/// Sum of every flat reduction percentage that applies to this hit
pub fn flat_reduction(victim: &dyn AttributeView, ctx: &DamageContext, attacker_is_player: bool) -> f64 {
    let mut total = victim.value(ids::DAMAGE_REDUCTION);

    total += if attacker_is_player {
        victim.value(ids::PVP_DAMAGE_REDUCTION)
    } else {
        victim.value(ids::PVE_DAMAGE_REDUCTION)
    };

    if ctx.cause() == DamageCause::Fall {
        total += victim.value(ids::FALL_DAMAGE_REDUCTION);
    }
    if ctx.has(DamageCategory::Projectile) {
        total += victim.value(ids::PROJECTILE_DAMAGE_REDUCTION);
    }
    if ctx.has(DamageCategory::Physical) {
        total += victim.value(ids::PHYSICAL_DAMAGE_REDUCTION);
    }
    if ctx.has(DamageCategory::Magical) {
        total += victim.value(ids::MAGIC_DAMAGE_REDUCTION);
    }

    total
}
