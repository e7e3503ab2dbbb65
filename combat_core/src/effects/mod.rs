//! Post-damage effects - driven by the final mitigated damage

mod lifesteal;
mod thorns;

pub use lifesteal::{apply_lifesteal, lifesteal_heal, LifeStealOutcome};
pub use thorns::{apply_thorns, thorns_reflection};
