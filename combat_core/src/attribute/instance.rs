//! AttributeInstance - One stat with a base value and its modifiers

use super::modifier::{AttributeModifier, ModifierOperation, Tick};
use serde::{Deserialize, Serialize};

/// A single attribute on an entity
///
/// Resolved value:
/// `(base + Σflat) × (1 + Σincreased) × Π(1 + more)`
///
/// Modifiers whose expiry tick has passed are ignored when resolving and are
/// dropped by [`AttributeInstance::prune_expired`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
    pub base: f64,
    #[serde(default)]
    modifiers: Vec<AttributeModifier>,
}

impl AttributeInstance {
    /// Create an instance with the given base and no modifiers
    pub fn with_base(base: f64) -> Self {
        AttributeInstance {
            base,
            modifiers: Vec::new(),
        }
    }

    /// Resolve the value at `tick`
    pub fn value_at(&self, tick: Tick) -> f64 {
        let mut flat = 0.0;
        let mut increased = 0.0;
        let mut more_mult = 1.0;

        for modifier in self.modifiers.iter().filter(|m| m.is_active_at(tick)) {
            match modifier.operation {
                ModifierOperation::Flat => flat += modifier.amount,
                ModifierOperation::Increased => increased += modifier.amount,
                ModifierOperation::More => more_mult *= 1.0 + modifier.amount,
            }
        }

        (self.base + flat) * (1.0 + increased) * more_mult
    }

    /// Add a modifier, replacing any existing one with the same id
    pub fn add_modifier(&mut self, modifier: AttributeModifier) {
        self.modifiers.retain(|m| m.id != modifier.id);
        self.modifiers.push(modifier);
    }

    /// Remove a modifier by id. Returns the removed modifier if it existed
    pub fn remove_modifier(&mut self, id: &str) -> Option<AttributeModifier> {
        let index = self.modifiers.iter().position(|m| m.id == id)?;
        Some(self.modifiers.remove(index))
    }

    /// Drop every modifier that has expired at `tick`
    ///
    /// Returns the number of modifiers removed
    pub fn prune_expired(&mut self, tick: Tick) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.is_active_at(tick));
        before - self.modifiers.len()
    }

    pub fn modifiers(&self) -> &[AttributeModifier] {
        &self.modifiers
    }

    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_only() {
        let attr = AttributeInstance::with_base(100.0);
        assert!((attr.value_at(0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_formula() {
        // (100 + 50) × (1 + 0.70) × (1.20 × 1.15)
        let mut attr = AttributeInstance::with_base(100.0);
        attr.add_modifier(AttributeModifier::flat("a", 50.0));
        attr.add_modifier(AttributeModifier::increased("b", 0.40));
        attr.add_modifier(AttributeModifier::increased("c", 0.30));
        attr.add_modifier(AttributeModifier::more("d", 0.20));
        attr.add_modifier(AttributeModifier::more("e", 0.15));

        let expected = 150.0 * 1.70 * (1.20 * 1.15);
        assert!((attr.value_at(0) - expected).abs() < 0.01);
    }

    #[test]
    fn test_increased_stacks_additively() {
        let mut attr = AttributeInstance::with_base(100.0);
        attr.add_modifier(AttributeModifier::increased("a", 0.20));
        attr.add_modifier(AttributeModifier::increased("b", 0.30));
        assert!((attr.value_at(0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_id_replaces() {
        let mut attr = AttributeInstance::with_base(10.0);
        attr.add_modifier(AttributeModifier::flat("buff", 5.0));
        attr.add_modifier(AttributeModifier::flat("buff", 7.0));
        assert_eq!(attr.modifiers().len(), 1);
        assert!((attr.value_at(0) - 17.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expired_modifier_ignored_before_prune() {
        let mut attr = AttributeInstance::with_base(10.0);
        attr.add_modifier(AttributeModifier::flat("buff", 5.0).until(20));

        assert!((attr.value_at(19) - 15.0).abs() < f64::EPSILON);
        assert!((attr.value_at(20) - 10.0).abs() < f64::EPSILON);
        // still stored until pruned
        assert!(attr.has_modifiers());

        assert_eq!(attr.prune_expired(20), 1);
        assert!(!attr.has_modifiers());
    }

    #[test]
    fn test_remove_modifier() {
        let mut attr = AttributeInstance::with_base(10.0);
        attr.add_modifier(AttributeModifier::flat("buff", 5.0));
        assert!(attr.remove_modifier("buff").is_some());
        assert!(attr.remove_modifier("buff").is_none());
        assert!((attr.value_at(0) - 10.0).abs() < f64::EPSILON);
    }
}
