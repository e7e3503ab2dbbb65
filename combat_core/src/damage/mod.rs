//! Damage calculators - Turning attacker stats into a pre-mitigation number

mod elemental;
mod magical;
mod physical;
mod result;

pub use elemental::{element_name, ElementalBreakdown, ElementalCalculator, ElementalComponent};
pub use magical::calculate_magical;
pub use physical::{calculate_physical_with_roll, crit_stats};
pub use result::DamageResult;

use crate::attribute::{ids, AttributeView};
use crate::config::CombatConfig;
use crate::context::{DamageCategory, DamageContext};
use crate::defense::roll_percent;
use crate::entity::Combatant;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Calculator inputs for one hit
#[derive(Clone, Copy)]
pub struct CalculationInput<'a> {
    pub attacker: &'a dyn AttributeView,
    pub victim: &'a dyn Combatant,
    pub context: &'a DamageContext,
    /// Damage reported by the host for the event
    pub base_damage: f64,
    /// Whether this calculator adds the projectile / undead flat bonuses.
    /// Only the first calculator of a hybrid hit does.
    pub situational: bool,
}

impl<'a> CalculationInput<'a> {
    pub fn new(
        attacker: &'a dyn AttributeView,
        victim: &'a dyn Combatant,
        context: &'a DamageContext,
        base_damage: f64,
    ) -> Self {
        CalculationInput {
            attacker,
            victim,
            context,
            base_damage,
            situational: true,
        }
    }

    /// Projectile and undead flat bonuses, tagging the result as needed
    fn situational_bonus(&self, result: &mut DamageResult) -> f64 {
        if !self.situational {
            return 0.0;
        }
        let mut bonus = 0.0;
        if self.context.is_projectile() {
            bonus += self.attacker.value(ids::PROJECTILE_DAMAGE);
            result.add_tag("Projectile");
        }
        if self.victim.is_undead() {
            bonus += self.attacker.value(ids::UNDEAD_DAMAGE);
        }
        bonus
    }
}

/// The closed set of calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Physical,
    Magical,
}

impl DamageKind {
    /// Calculators to run for a context, in invocation order
    pub fn for_context(context: &DamageContext) -> Vec<DamageKind> {
        let magical = context.has(DamageCategory::Magical);
        let physical = context.has(DamageCategory::Physical) || (context.is_projectile() && !magical);

        let mut kinds = Vec::with_capacity(2);
        if physical {
            kinds.push(DamageKind::Physical);
        }
        if magical {
            kinds.push(DamageKind::Magical);
        }
        kinds
    }

    pub fn label(&self) -> &'static str {
        match self {
            DamageKind::Physical => "Physical",
            DamageKind::Magical => "Magical",
        }
    }
}

/// Run one calculator. `crit_roll` is only read by calculators that can crit
pub fn resolve(
    kind: DamageKind,
    input: &CalculationInput<'_>,
    config: &CombatConfig,
    crit_roll: f64,
) -> DamageResult {
    match kind {
        DamageKind::Physical => calculate_physical_with_roll(input, config, crit_roll),
        DamageKind::Magical => calculate_magical(input, config),
    }
}

/// Run every calculator the context selects and merge their output
///
/// Returns `None` when the context selects no calculator (environmental or
/// true damage), in which case the host's damage passes through.
pub fn calculate(
    input: &CalculationInput<'_>,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> Option<DamageResult> {
    DamageKind::for_context(input.context)
        .into_iter()
        .enumerate()
        .map(|(index, kind)| {
            let crit_roll = match kind {
                DamageKind::Physical => roll_percent(rng),
                DamageKind::Magical => 100.0,
            };
            let input = CalculationInput {
                situational: index == 0,
                ..*input
            };
            resolve(kind, &input, config, crit_roll)
        })
        .reduce(DamageResult::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeSet;
    use crate::context::DamageCause;
    use crate::entity::CombatEntity;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_kinds_for_context() {
        let melee = DamageContext::from_cause(DamageCause::Melee);
        assert_eq!(DamageKind::for_context(&melee), vec![DamageKind::Physical]);

        let arrow = DamageContext::from_cause(DamageCause::Projectile);
        assert_eq!(DamageKind::for_context(&arrow), vec![DamageKind::Physical]);

        let spell = DamageContext::from_cause(DamageCause::Spell);
        assert_eq!(DamageKind::for_context(&spell), vec![DamageKind::Magical]);

        let bolt = DamageContext::with_categories(
            DamageCause::Spell,
            [DamageCategory::Magical, DamageCategory::Projectile],
        );
        assert_eq!(DamageKind::for_context(&bolt), vec![DamageKind::Magical]);

        let fall = DamageContext::from_cause(DamageCause::Fall);
        assert!(DamageKind::for_context(&fall).is_empty());
    }

    #[test]
    fn test_hybrid_merges_in_order() {
        let attacker = AttributeSet::new()
            .with(ids::WEAPON_DAMAGE, 9.0)
            .with(ids::MAGIC_DAMAGE, 5.0)
            .with(ids::CRITICAL_CHANCE, 0.0);
        let victim = CombatEntity::new("dummy", 100.0);
        let ctx = DamageContext::with_categories(
            DamageCause::Melee,
            [DamageCategory::Physical, DamageCategory::Magical],
        );
        let input = CalculationInput::new(&attacker, &victim, &ctx, 0.0);
        let mut rng = StepRng::new(0, 0);

        let result = calculate(&input, &CombatConfig::default(), &mut rng).unwrap();
        assert!((result.amount - 15.0).abs() < 1e-9);
        assert_eq!(result.tags, vec!["Physical", "Magical"]);
    }

    #[test]
    fn test_hybrid_bonus_applies_once() {
        // hand 1 + undead 6; the magical half has no spell base
        let attacker = AttributeSet::new()
            .with(ids::UNDEAD_DAMAGE, 6.0)
            .with(ids::CRITICAL_CHANCE, 0.0);
        let victim = CombatEntity::new("lich", 100.0).undead();
        let ctx = DamageContext::with_categories(
            DamageCause::Melee,
            [DamageCategory::Physical, DamageCategory::Magical],
        );
        let input = CalculationInput::new(&attacker, &victim, &ctx, 0.0);
        let mut rng = StepRng::new(0, 0);

        let result = calculate(&input, &CombatConfig::default(), &mut rng).unwrap();
        assert!((result.amount - 7.0).abs() < 1e-9);
        assert!((result.physical_amount - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_hybrid_projectile_tagged_once() {
        let attacker = AttributeSet::new()
            .with(ids::PROJECTILE_DAMAGE, 2.0)
            .with(ids::MAGIC_DAMAGE, 3.0)
            .with(ids::CRITICAL_CHANCE, 0.0);
        let victim = CombatEntity::new("dummy", 100.0);
        let ctx = DamageContext::with_categories(
            DamageCause::Projectile,
            [
                DamageCategory::Physical,
                DamageCategory::Magical,
                DamageCategory::Projectile,
            ],
        );
        let input = CalculationInput::new(&attacker, &victim, &ctx, 0.0);
        let mut rng = StepRng::new(0, 0);

        // physical 1 + 2, magical 3
        let result = calculate(&input, &CombatConfig::default(), &mut rng).unwrap();
        assert!((result.amount - 6.0).abs() < 1e-9);
        assert_eq!(result.tags, vec!["Projectile", "Physical", "Magical"]);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(DamageKind::Physical.label(), "Physical");
        assert_eq!(DamageKind::Magical.label(), "Magical");
    }

    #[test]
    fn test_no_calculator_for_environment() {
        let attacker = AttributeSet::new();
        let victim = CombatEntity::new("dummy", 100.0);
        let ctx = DamageContext::from_cause(DamageCause::Lava);
        let input = CalculationInput::new(&attacker, &victim, &ctx, 4.0);
        let mut rng = StepRng::new(0, 0);

        assert!(calculate(&input, &CombatConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn test_magic_never_crits() {
        let attacker = AttributeSet::new()
            .with(ids::CRITICAL_CHANCE, 100.0)
            .with(ids::MAGIC_DAMAGE, 5.0);
        let victim = CombatEntity::new("dummy", 100.0);
        let ctx = DamageContext::from_cause(DamageCause::Spell);
        let input = CalculationInput::new(&attacker, &victim, &ctx, 0.0);

        let result = resolve(DamageKind::Magical, &input, &CombatConfig::default(), 0.0);
        assert!(!result.is_critical);
    }
}
