//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Attributes
pub use crate::attribute::{ids, AttributeModifier, AttributeSet, AttributeView, ModifierOperation, ScalarAttributes, Tick};

// Context
pub use crate::context::{DamageCategory, DamageCause, DamageContext};

// Entities
pub use crate::entity::{CombatEntity, Combatant, DamageApplication, EntityClassification, RecordingHost};

// Combat
pub use crate::combat::{CombatEngine, CombatOutcome, DamageEvent, Indicator};

// Config
pub use crate::config::{default_config, CombatConfig, ConfigError};
