//! combat_core - Damage resolution engine for combat between entities
//!
//! This library provides:
//! - AttributeSet: Per-entity attribute storage with timed modifiers
//! - DamageContext: Cause and category classification of a hit
//! - Damage calculators: Physical (with crits), magical and elemental damage
//! - Defense: Dodge, parry, block and the capped defense curve
//! - CombatEngine: The full pipeline from damage event to final damage

pub mod attribute;
pub mod combat;
pub mod config;
pub mod context;
pub mod damage;
pub mod defense;
pub mod effects;
pub mod entity;
pub mod prelude;

// Re-export core types for convenience
pub use attribute::{AttributeModifier, AttributeSet, AttributeView, ModifierOperation, ScalarAttributes};
pub use combat::{CombatEngine, CombatOutcome, DamageEvent, Indicator};
pub use config::{default_config, CombatConfig, ConfigError};
pub use context::{DamageCategory, DamageCause, DamageContext};
pub use damage::{DamageResult, ElementalBreakdown};
pub use defense::{Avoidance, MitigationBreakdown};
pub use entity::{CombatEntity, Combatant, DamageApplication, EntityClassification, RecordingHost};
