//! Elemental damage calculator
//!
//! For every configured `(damage_attribute, defense_attribute)` pair where the
//! attacker has a positive value:
//! 1. raw = attacker's elemental attribute
//! 2. multiply by `multipliers[attacker_element][victim_element]` if
//!    interactions are on and the victim has an element
//! 3. mitigate with the defense curve against the victim's matching defense
//!
//! Elemental damage is fully mitigated here and is added to the final number
//! without passing through the general mitigation handler.

use crate::attribute::AttributeView;
use crate::config::ElementalConfig;
use crate::context::DamageContext;
use crate::defense::curve_mitigation;
use crate::entity::Combatant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One element's contribution to a hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementalComponent {
    pub element: String,
    pub raw: f64,
    /// Interaction multiplier applied (1.0 when none)
    pub multiplier: f64,
    pub defense: f64,
    pub mitigation: f64,
    pub damage: f64,
}

/// All elemental damage of a hit, in element-pair order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementalBreakdown {
    pub total: f64,
    pub components: Vec<ElementalComponent>,
}

impl ElementalBreakdown {
    pub fn get(&self, element: &str) -> Option<&ElementalComponent> {
        self.components.iter().find(|c| c.element == element)
    }

    pub fn has_damage(&self) -> bool {
        self.total > 0.0
    }

    /// Damage per element
    pub fn by_element(&self) -> HashMap<&str, f64> {
        self.components
            .iter()
            .map(|c| (c.element.as_str(), c.damage))
            .collect()
    }
}

/// Strip the `_damage` suffix and lower-case: `Fire_Damage` → `fire`
pub fn element_name(attribute_id: &str) -> String {
    let lower = attribute_id.to_lowercase();
    match lower.strip_suffix("_damage") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lower,
    }
}

/// Elemental calculator with a memo of normalized element names
#[derive(Debug, Clone, Default)]
pub struct ElementalCalculator {
    names: HashMap<String, String>,
}

impl ElementalCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element name for a damage attribute, memoized per distinct id
    pub fn element_for(&mut self, attribute_id: &str) -> &str {
        self.names
            .entry(attribute_id.to_string())
            .or_insert_with(|| element_name(attribute_id))
    }

    pub fn cached_names(&self) -> usize {
        self.names.len()
    }

    pub fn calculate(
        &mut self,
        attacker: &dyn AttributeView,
        victim: &dyn Combatant,
        context: &DamageContext,
        config: &ElementalConfig,
        divisor: f64,
    ) -> ElementalBreakdown {
        let mut breakdown = ElementalBreakdown::default();
        let victim_element = if config.interactions_enabled {
            victim.element_tag()
        } else {
            None
        };

        for pair in &config.pairs {
            let raw = attacker.value(&pair.damage_attribute);
            if raw <= 0.0 {
                continue;
            }

            let element = self.element_for(&pair.damage_attribute).to_string();
            let multiplier = victim_element
                .as_deref()
                .and_then(|victim_el| config.multiplier(&element, victim_el))
                .unwrap_or(1.0);

            let defense = victim.attributes().value(&pair.defense_attribute);
            let mitigation = if context.is_global() {
                0.0
            } else {
                curve_mitigation(defense, divisor)
            };
            let damage = raw * multiplier * (1.0 - mitigation);

            tracing::trace!(
                element = %element,
                raw,
                multiplier,
                defense,
                mitigation,
                damage,
                "elemental component"
            );

            breakdown.total += damage;
            breakdown.components.push(ElementalComponent {
                element,
                raw,
                multiplier,
                defense,
                mitigation,
                damage,
            });
        }

        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeSet;
    use crate::config::ElementPair;
    use crate::context::{DamageCategory, DamageCause};
    use crate::entity::CombatEntity;

    fn config() -> ElementalConfig {
        let mut config = ElementalConfig::default();
        config
            .multipliers
            .entry("fire".to_string())
            .or_default()
            .insert("ice".to_string(), 2.0);
        config
    }

    fn melee() -> DamageContext {
        DamageContext::from_cause(DamageCause::Melee)
    }

    #[test]
    fn test_element_name() {
        assert_eq!(element_name("fire_damage"), "fire");
        assert_eq!(element_name("Lightning_Damage"), "lightning");
        assert_eq!(element_name("holy"), "holy");
        assert_eq!(element_name("_damage"), "_damage");
    }

    #[test]
    fn test_names_are_memoized() {
        let mut calc = ElementalCalculator::new();
        assert_eq!(calc.element_for("fire_damage"), "fire");
        assert_eq!(calc.element_for("fire_damage"), "fire");
        assert_eq!(calc.cached_names(), 1);
        assert_eq!(calc.element_for("ice_damage"), "ice");
        assert_eq!(calc.cached_names(), 2);
    }

    #[test]
    fn test_unmitigated_without_defense() {
        let mut calc = ElementalCalculator::new();
        let attacker = AttributeSet::new().with("fire_damage", 10.0);
        let victim = CombatEntity::new("dummy", 100.0);

        let b = calc.calculate(&attacker, &victim, &melee(), &config(), 20.0);
        assert!((b.total - 10.0).abs() < f64::EPSILON);
        assert_eq!(b.components.len(), 1);
        assert!((b.get("fire").unwrap().multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interaction_then_mitigation() {
        let mut calc = ElementalCalculator::new();
        let attacker = AttributeSet::new().with("fire_damage", 10.0);
        let victim = CombatEntity::new("yeti", 100.0)
            .with_tag("element_ice")
            .with_attribute("fire_defense", 20.0);

        // 10 * 2.0 * (1 - 20 / 40) = 10
        let b = calc.calculate(&attacker, &victim, &melee(), &config(), 20.0);
        let fire = b.get("fire").unwrap();
        assert!((fire.multiplier - 2.0).abs() < f64::EPSILON);
        assert!((fire.mitigation - 0.5).abs() < f64::EPSILON);
        assert!((b.total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_interactions_disabled() {
        let mut calc = ElementalCalculator::new();
        let mut cfg = config();
        cfg.interactions_enabled = false;
        let attacker = AttributeSet::new().with("fire_damage", 10.0);
        let victim = CombatEntity::new("yeti", 100.0).with_tag("element_ice");

        let b = calc.calculate(&attacker, &victim, &melee(), &cfg, 20.0);
        assert!((b.total - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_victim_element_has_no_multiplier() {
        let mut calc = ElementalCalculator::new();
        let attacker = AttributeSet::new().with("fire_damage", 10.0);
        let victim = CombatEntity::new("blob", 100.0).with_tag("dummy_type_plasma");

        let b = calc.calculate(&attacker, &victim, &melee(), &config(), 20.0);
        assert!((b.total - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multiple_elements_in_pair_order() {
        let mut calc = ElementalCalculator::new();
        let attacker = AttributeSet::new()
            .with("dark_damage", 4.0)
            .with("fire_damage", 6.0)
            .with("ice_damage", 0.0)
            .with("water_damage", -3.0);
        let victim = CombatEntity::new("dummy", 100.0);

        let b = calc.calculate(&attacker, &victim, &melee(), &config(), 20.0);
        let elements: Vec<_> = b.components.iter().map(|c| c.element.as_str()).collect();
        assert_eq!(elements, vec!["fire", "dark"]);
        assert!((b.total - 10.0).abs() < f64::EPSILON);
        assert_eq!(b.by_element().get("dark"), Some(&4.0));
    }

    #[test]
    fn test_global_skips_elemental_defense() {
        let mut calc = ElementalCalculator::new();
        let attacker = AttributeSet::new().with("fire_damage", 10.0);
        let victim = CombatEntity::new("dummy", 100.0).with_attribute("fire_defense", 1000.0);
        let ctx = DamageContext::with_categories(DamageCause::Custom, [DamageCategory::Global]);

        let b = calc.calculate(&attacker, &victim, &ctx, &config(), 20.0);
        assert!((b.total - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_pair_naming() {
        let mut calc = ElementalCalculator::new();
        let cfg = ElementalConfig {
            pairs: vec![ElementPair::new("holy_damage", "holy_resist")],
            ..config()
        };
        let attacker = AttributeSet::new().with("holy_damage", 8.0);
        let victim = CombatEntity::new("ghoul", 100.0).with_attribute("holy_resist", 20.0);

        let b = calc.calculate(&attacker, &victim, &melee(), &cfg, 20.0);
        assert!((b.get("holy").unwrap().damage - 4.0).abs() < 1e-9);
    }
}
