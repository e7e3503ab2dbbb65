//! Combat resolution - Run damage events through the engine

mod engine;
mod result;

pub use engine::{CombatEngine, DamageEvent};
pub use result::{CombatOutcome, Indicator};
