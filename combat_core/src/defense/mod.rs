//! Defense system - Avoidance rolls, block, defense curve and mitigation
//!
//! Check order for a hit is fixed: dodge, then parry (both cancel the hit),
//! then block on the calculated damage, then mitigation.

mod block;
mod curve;
mod dodge;
mod mitigation;
mod parry;

pub use block::{apply_block, apply_block_with_roll, BlockOutcome};
pub use curve::{curve_mitigation, defense_needed_for, effective_defense, mitigate};
pub use dodge::{check_dodge, check_dodge_with_roll, dodge_chance};
pub use mitigation::{
    flat_reduction, MitigationBreakdown, MitigationHandler, MitigationInput, Penetration,
};
pub use parry::{check_parry, check_parry_with_roll, parry_chance};

use crate::attribute::AttributeView;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A mechanic that cancelled a hit outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Avoidance {
    Dodge,
    Parry,
}

impl Avoidance {
    pub fn label(&self) -> &'static str {
        match self {
            Avoidance::Dodge => "DODGE",
            Avoidance::Parry => "PARRY",
        }
    }
}

/// Draw a uniform roll in `[0, 100)`
pub fn roll_percent(rng: &mut impl Rng) -> f64 {
    rng.gen_range(0.0..100.0)
}

/// Whether a roll lands under a percentage chance. Negative chances never land
pub fn roll_succeeds(chance: f64, roll: f64) -> bool {
    roll < chance.max(0.0)
}

/// Run dodge then parry, stopping at the first success
///
/// The parry roll is only drawn when the dodge fails.
pub fn check_avoidance(
    victim: &dyn AttributeView,
    attacker: Option<&dyn AttributeView>,
    rng: &mut impl Rng,
) -> Option<Avoidance> {
    if check_dodge(victim, attacker, rng) {
        return Some(Avoidance::Dodge);
    }
    if check_parry(victim, rng) {
        return Some(Avoidance::Parry);
    }
    None
}
