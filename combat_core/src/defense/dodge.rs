//! Dodge - Full avoidance, countered by attacker accuracy
//!
//! `chance = max(0, dodge_rating - accuracy)`, rolled against `[0, 100)`.
//! With no attacker attributes the accuracy reduction is skipped.

use super::{roll_percent, roll_succeeds};
use crate::attribute::{ids, AttributeView};
use rand::Rng;

/// Effective dodge chance in percent
pub fn dodge_chance(victim: &dyn AttributeView, attacker: Option<&dyn AttributeView>) -> f64 {
    let rating = victim.value(ids::DODGE_RATING);
    match attacker {
        Some(attacker) => (rating - attacker.value(ids::ACCURACY)).max(0.0),
        None => rating.max(0.0),
    }
}

/// Dodge check against an explicit roll
pub fn check_dodge_with_roll(
    victim: &dyn AttributeView,
    attacker: Option<&dyn AttributeView>,
    roll: f64,
) -> bool {
    roll_succeeds(dodge_chance(victim, attacker), roll)
}

/// Dodge check with a fresh roll
pub fn check_dodge(
    victim: &dyn AttributeView,
    attacker: Option<&dyn AttributeView>,
    rng: &mut impl Rng,
) -> bool {
    check_dodge_with_roll(victim, attacker, roll_percent(rng))
}
