//! Attributes - Read access to resolved entity stats
//!
//! The engine only ever reads attributes through [`AttributeView`]. Tracked
//! entities back it with an [`AttributeSet`]; untracked mobs use the
//! map-backed [`ScalarAttributes`] shim.

pub mod ids;
mod instance;
mod modifier;

pub use instance::AttributeInstance;
pub use modifier::{AttributeModifier, ModifierOperation, Tick};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only accessor over an entity's resolved attribute values
pub trait AttributeView {
    /// Resolved value of an attribute, `None` if the entity does not have it
    fn get(&self, id: &str) -> Option<f64>;

    /// Resolved value of an attribute, `0.0` when absent
    fn value(&self, id: &str) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    /// Resolved value of an attribute, `default` when absent
    fn value_or(&self, id: &str, default: f64) -> f64 {
        self.get(id).unwrap_or(default)
    }
}

/// View with no attributes at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeView for NoAttributes {
    fn get(&self, _id: &str) -> Option<f64> {
        None
    }
}

/// Per-entity attribute store keyed by attribute id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeSet {
    #[serde(default)]
    attributes: HashMap<String, AttributeInstance>,
    /// Tick used when resolving timed modifiers
    #[serde(default)]
    current_tick: Tick,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(id, base)` pairs
    pub fn from_bases<I, K>(bases: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut set = AttributeSet::new();
        for (id, base) in bases {
            set.set_base(id, base);
        }
        set
    }

    /// Builder form of [`AttributeSet::set_base`]
    pub fn with(mut self, id: impl Into<String>, base: f64) -> Self {
        self.set_base(id, base);
        self
    }

    /// Set the base value, creating the attribute if needed
    pub fn set_base(&mut self, id: impl Into<String>, base: f64) {
        self.attributes
            .entry(id.into())
            .and_modify(|a| a.base = base)
            .or_insert_with(|| AttributeInstance::with_base(base));
    }

    /// Add a modifier, creating the attribute with a zero base if needed
    pub fn add_modifier(&mut self, id: impl Into<String>, modifier: AttributeModifier) {
        self.attributes
            .entry(id.into())
            .or_default()
            .add_modifier(modifier);
    }

    /// Remove a modifier from an attribute
    pub fn remove_modifier(&mut self, id: &str, modifier_id: &str) -> Option<AttributeModifier> {
        self.attributes.get_mut(id)?.remove_modifier(modifier_id)
    }

    pub fn get_instance(&self, id: &str) -> Option<&AttributeInstance> {
        self.attributes.get(id)
    }

    pub fn instance_mut(&mut self, id: &str) -> Option<&mut AttributeInstance> {
        self.attributes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.attributes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Move the clock forward and drop expired modifiers
    ///
    /// Returns the number of modifiers removed. Moving backwards is ignored.
    pub fn advance_to(&mut self, tick: Tick) -> usize {
        if tick < self.current_tick {
            return 0;
        }
        self.current_tick = tick;
        self.attributes
            .values_mut()
            .map(|a| a.prune_expired(tick))
            .sum()
    }
}

impl AttributeView for AttributeSet {
    fn get(&self, id: &str) -> Option<f64> {
        self.attributes
            .get(id)
            .map(|a| a.value_at(self.current_tick))
    }
}

/// Scalar attribute values for entities without a tracked profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScalarAttributes {
    values: HashMap<String, f64>,
}

impl ScalarAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, value: f64) -> Self {
        self.values.insert(id.into(), value);
        self
    }

    pub fn set(&mut self, id: impl Into<String>, value: f64) {
        self.values.insert(id.into(), value);
    }
}

impl AttributeView for ScalarAttributes {
    fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ScalarAttributes {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        ScalarAttributes {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
