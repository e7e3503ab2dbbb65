//! DamageResult - Calculator output before mitigation

use serde::{Deserialize, Serialize};

/// Raw damage from one or more calculators
///
/// `tags` keeps calculator invocation order and never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Pre-mitigation damage
    pub amount: f64,
    pub is_critical: bool,
    pub tags: Vec<String>,
    /// Share of `amount` produced by the physical calculator
    #[serde(default)]
    pub physical_amount: f64,
}

impl DamageResult {
    pub fn new(amount: f64) -> Self {
        DamageResult {
            amount,
            is_critical: false,
            tags: Vec::new(),
            physical_amount: 0.0,
        }
    }

    /// Append a tag unless it is already present
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    /// Combine with the output of a later calculator
    pub fn merge(mut self, other: DamageResult) -> Self {
        self.amount += other.amount;
        self.physical_amount += other.physical_amount;
        self.is_critical |= other.is_critical;
        for tag in other.tags {
            self.add_tag(tag);
        }
        self
    }
}
