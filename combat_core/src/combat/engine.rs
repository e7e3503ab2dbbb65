//! Damage resolution - Run one damage event through the full pipeline

use super::result::{CombatOutcome, Indicator};
use crate::attribute::AttributeView;
use crate::config::{CombatConfig, ConfigError};
use crate::context::{DamageCause, DamageContext};
use crate::damage::{
    self, CalculationInput, DamageKind, DamageResult, ElementalBreakdown, ElementalCalculator,
};
use crate::defense::{apply_block, check_avoidance, MitigationHandler, MitigationInput};
use crate::effects::{apply_lifesteal, apply_thorns};
use crate::entity::{Combatant, DamageApplication};
use rand::Rng;

/// One incoming hit as reported by the host
#[derive(Clone, Copy)]
pub struct DamageEvent<'a> {
    /// `None` for environmental damage with no living attacker
    pub attacker: Option<&'a dyn Combatant>,
    pub victim: &'a dyn Combatant,
    /// Damage the host reported for the event
    pub base_damage: f64,
    pub context: &'a DamageContext,
}

impl<'a> DamageEvent<'a> {
    pub fn new(
        attacker: Option<&'a dyn Combatant>,
        victim: &'a dyn Combatant,
        base_damage: f64,
        context: &'a DamageContext,
    ) -> Self {
        DamageEvent {
            attacker,
            victim,
            base_damage,
            context,
        }
    }

    pub fn cause(&self) -> DamageCause {
        self.context.cause()
    }

    fn attacker_attributes(&self) -> Option<&'a dyn AttributeView> {
        self.attacker.map(|a| a.attributes())
    }

    /// The attacker, if this hit is one the calculators handle
    ///
    /// Environmental and true damage with a source (thorns reflections,
    /// host-scripted damage) passes through without avoidance, elemental
    /// damage or lifesteal.
    pub fn striker(&self) -> Option<&'a dyn Combatant> {
        self.attacker
            .filter(|_| !DamageKind::for_context(self.context).is_empty())
    }
}

/// The damage-resolution engine
///
/// Holds the active config and the element-name memo. Config swaps happen
/// through [`CombatEngine::reload`], between events.
#[derive(Debug, Clone, Default)]
pub struct CombatEngine {
    config: CombatConfig,
    elemental: ElementalCalculator,
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(CombatEngine {
            config,
            elemental: ElementalCalculator::new(),
        })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Swap in a new config. An invalid config leaves the current one active
    pub fn reload(&mut self, config: CombatConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "rejected combat config reload");
            return Err(err);
        }
        self.config = config;
        Ok(())
    }

    /// Resolve a damage event with the thread-local RNG
    pub fn resolve(&mut self, event: &DamageEvent<'_>, host: &mut dyn DamageApplication) -> CombatOutcome {
        let mut rng = rand::thread_rng();
        self.resolve_with_rng(event, host, &mut rng)
    }

    /// Resolve a damage event with a provided RNG (for deterministic testing)
    ///
    /// 1. Dodge, then parry (either cancels the hit)
    /// 2. Physical / magical calculators
    /// 3. Block on the calculated damage
    /// 4. Elemental components, self-mitigated
    /// 5. Mitigation handler on the calculated damage
    /// 6. Lifesteal, then thorns, on the final damage
    ///
    /// Steps 1, 3, 4 and 6 only run for hits with a [`DamageEvent::striker`].
    pub fn resolve_with_rng(
        &mut self,
        event: &DamageEvent<'_>,
        host: &mut dyn DamageApplication,
        rng: &mut impl Rng,
    ) -> CombatOutcome {
        let ctx = event.context;
        let victim = event.victim;
        let attacker_attrs = event.attacker_attributes();
        let striker = event.striker();
        let contested = striker.is_some() && !ctx.is_global();

        // Step 1: avoidance
        if contested {
            if let Some(avoidance) = check_avoidance(victim.attributes(), attacker_attrs, rng) {
                tracing::debug!(
                    victim = victim.id(),
                    avoidance = avoidance.label(),
                    "hit avoided"
                );
                return CombatOutcome::avoided(avoidance);
            }
        }

        let mut outcome = CombatOutcome::default();

        // Step 2: calculators
        let calculated = striker
            .and_then(|attacker| {
                let input =
                    CalculationInput::new(attacker.attributes(), victim, ctx, event.base_damage);
                damage::calculate(&input, &self.config, rng)
            })
            .unwrap_or_else(|| passthrough(event));

        if calculated.is_critical {
            tracing::debug!(victim = victim.id(), amount = calculated.amount, "critical hit");
            outcome.indicators.push(Indicator::Critical);
        }

        // Step 3: block
        let mut direct = calculated.amount;
        if contested {
            let block = apply_block(victim.attributes(), direct, rng);
            if block.blocked {
                outcome.blocked_amount = block.reduced_by(direct);
                outcome.indicators.push(Indicator::Block);
                tracing::debug!(
                    victim = victim.id(),
                    blocked = outcome.blocked_amount,
                    "hit blocked"
                );
                direct = block.damage;
            }
        }

        // Step 4: elemental
        let attacker_level = event.attacker.map(|a| a.level()).unwrap_or(0);
        let divisor = self.config.defense_divisor(attacker_level);
        outcome.elemental = match striker {
            Some(attacker) => self.elemental.calculate(
                attacker.attributes(),
                victim,
                ctx,
                &self.config.elemental,
                divisor,
            ),
            None => ElementalBreakdown::default(),
        };

        // Step 5: mitigation
        let handler = MitigationHandler::new(&self.config.mitigation);
        outcome.mitigation = handler.breakdown(MitigationInput {
            damage: direct,
            victim: victim.attributes(),
            attacker: attacker_attrs,
            attacker_level,
            attacker_is_player: event.attacker.map(|a| a.is_player()).unwrap_or(false),
            context: ctx,
        });

        outcome.final_damage = outcome.mitigation.final_damage + outcome.elemental.total;

        outcome.tags = calculated.tags.clone();
        if outcome.elemental.has_damage() {
            outcome.tags.push("Elemental".to_string());
        }
        outcome.calculated = calculated;

        tracing::debug!(
            victim = victim.id(),
            cause = ?ctx.cause(),
            final_damage = outcome.final_damage,
            "damage resolved"
        );

        // Step 6: post-damage effects
        if let Some(attacker) = striker {
            outcome.lifesteal = apply_lifesteal(attacker, outcome.final_damage, host);
            outcome.reflected = apply_thorns(
                ctx,
                victim,
                attacker,
                outcome.physical_damage(),
                outcome.elemental.total,
                host,
            );
        }

        outcome
    }
}

/// Host damage carried through unchanged when no calculator applies
fn passthrough(event: &DamageEvent<'_>) -> DamageResult {
    let mut result = DamageResult::new(event.base_damage);
    for category in event.context.categories() {
        result.add_tag(category.label());
    }
    result
}
