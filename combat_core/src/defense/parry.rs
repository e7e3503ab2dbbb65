//! Parry - Full avoidance from a single rating

use super::{roll_percent, roll_succeeds};
use crate::attribute::{ids, AttributeView};
use rand::Rng;

pub fn parry_chance(victim: &dyn AttributeView) -> f64 {
    victim.value(ids::PARRY_RATING).max(0.0)
}

pub fn check_parry_with_roll(victim: &dyn AttributeView, roll: f64) -> bool {
    roll_succeeds(parry_chance(victim), roll)
}

pub fn check_parry(victim: &dyn AttributeView, rng: &mut impl Rng) -> bool {
    check_parry_with_roll(victim, roll_percent(rng))
}
