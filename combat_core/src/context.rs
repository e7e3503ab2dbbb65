//! DamageContext - Category tags for a single damage event
//!
//! The context decides which calculators run and which reduction and
//! mitigation paths apply. A context always holds at least one category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What triggered a damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCause {
    // Entity-caused
    Melee,
    SweepAttack,
    Projectile,
    Spell,
    // Environment, physical
    Fall,
    Contact,
    Suffocation,
    Drowning,
    Explosion,
    FallingBlock,
    FlyIntoWall,
    Thorns,
    // Environment, magical
    Fire,
    Lava,
    Lightning,
    Poison,
    Wither,
    Freeze,
    // Unmitigated
    Void,
    Starvation,
    Kill,
    Custom,
}

impl DamageCause {
    /// Environmental causes mitigated by magic resistance rather than defense
    pub fn is_magical_environment(&self) -> bool {
        matches!(
            self,
            DamageCause::Fire
                | DamageCause::Lava
                | DamageCause::Lightning
                | DamageCause::Poison
                | DamageCause::Wither
                | DamageCause::Freeze
        )
    }
}

/// Damage category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCategory {
    Physical,
    Magical,
    Projectile,
    Environmental,
    /// True damage: skips all defense-based mitigation
    Global,
}

impl DamageCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DamageCategory::Physical => "Physical",
            DamageCategory::Magical => "Magical",
            DamageCategory::Projectile => "Projectile",
            DamageCategory::Environmental => "Environmental",
            DamageCategory::Global => "Global",
        }
    }
}

/// Immutable classification of one damage event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageContext {
    cause: DamageCause,
    categories: BTreeSet<DamageCategory>,
}

impl DamageContext {
    /// Classify an event from its cause
    pub fn from_cause(cause: DamageCause) -> Self {
        let categories: &[DamageCategory] = match cause {
            DamageCause::Melee | DamageCause::SweepAttack => &[DamageCategory::Physical],
            DamageCause::Projectile => &[DamageCategory::Physical, DamageCategory::Projectile],
            DamageCause::Spell => &[DamageCategory::Magical],
            DamageCause::Void | DamageCause::Starvation | DamageCause::Kill | DamageCause::Custom => {
                &[DamageCategory::Global]
            }
            _ => &[DamageCategory::Environmental],
        };

        DamageContext {
            cause,
            categories: categories.iter().copied().collect(),
        }
    }

    /// Build a context with explicit categories (custom skills, hybrid hits)
    ///
    /// An empty category list falls back to the cause's default classification.
    pub fn with_categories<I>(cause: DamageCause, categories: I) -> Self
    where
        I: IntoIterator<Item = DamageCategory>,
    {
        let categories: BTreeSet<DamageCategory> = categories.into_iter().collect();
        if categories.is_empty() {
            return Self::from_cause(cause);
        }
        DamageContext { cause, categories }
    }

    pub fn cause(&self) -> DamageCause {
        self.cause
    }

    pub fn has(&self, category: DamageCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = DamageCategory> + '_ {
        self.categories.iter().copied()
    }

    pub fn is_global(&self) -> bool {
        self.has(DamageCategory::Global)
    }

    pub fn is_projectile(&self) -> bool {
        self.has(DamageCategory::Projectile)
    }

    /// Whether the defense / armor penetration path applies
    pub fn uses_physical_defense(&self) -> bool {
        self.has(DamageCategory::Physical)
            || self.has(DamageCategory::Projectile)
            || (self.has(DamageCategory::Environmental) && !self.cause.is_magical_environment())
    }

    /// Whether the magic resistance / magic penetration path applies
    pub fn uses_magic_resistance(&self) -> bool {
        self.has(DamageCategory::Magical)
            || (self.has(DamageCategory::Environmental) && self.cause.is_magical_environment())
    }
}

impl From<DamageCause> for DamageContext {
    fn from(cause: DamageCause) -> Self {
        DamageContext::from_cause(cause)
    }
}
