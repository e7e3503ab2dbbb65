//! Block - Partial reduction of an already calculated hit
//!
//! Roll against `block_rating`; on success the hit is multiplied by
//! `1 - block_power / 100`. A block with no power lets the hit through
//! unchanged.

use super::{roll_percent, roll_succeeds};
use crate::attribute::{ids, AttributeView};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockOutcome {
    /// Whether the block roll landed
    pub blocked: bool,
    /// Damage after the block
    pub damage: f64,
}

impl BlockOutcome {
    fn unblocked(damage: f64) -> Self {
        BlockOutcome {
            blocked: false,
            damage,
        }
    }

    pub fn reduced_by(&self, original: f64) -> f64 {
        (original - self.damage).max(0.0)
    }
}

pub fn apply_block_with_roll(victim: &dyn AttributeView, damage: f64, roll: f64) -> BlockOutcome {
    let chance = victim.value(ids::BLOCK_RATING);
    if !roll_succeeds(chance, roll) {
        return BlockOutcome::unblocked(damage);
    }

    let power = victim.value(ids::BLOCK_POWER);
    let damage = if power > 0.0 {
        (damage * (1.0 - power / 100.0)).max(0.0)
    } else {
        damage
    };

    BlockOutcome {
        blocked: true,
        damage,
    }
}

pub fn apply_block(victim: &dyn AttributeView, damage: f64, rng: &mut impl Rng) -> BlockOutcome {
    apply_block_with_roll(victim, damage, roll_percent(rng))
}
