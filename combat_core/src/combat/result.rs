//! CombatOutcome - Everything one damage event produced

use crate::damage::{DamageResult, ElementalBreakdown};
use crate::defense::{Avoidance, MitigationBreakdown};
use crate::effects::LifeStealOutcome;
use serde::{Deserialize, Serialize};

/// Damage indicator to show for a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Dodge,
    Parry,
    Block,
    Critical,
}

impl Indicator {
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Dodge => "DODGE",
            Indicator::Parry => "PARRY",
            Indicator::Block => "BLOCK",
            Indicator::Critical => "CRIT",
        }
    }
}

impl From<Avoidance> for Indicator {
    fn from(avoidance: Avoidance) -> Self {
        match avoidance {
            Avoidance::Dodge => Indicator::Dodge,
            Avoidance::Parry => Indicator::Parry,
        }
    }
}

/// Result of resolving one damage event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    // === Damage ===
    /// Damage the host should deal to the victim
    pub final_damage: f64,
    /// Calculator output (or the host's damage when no calculator ran)
    pub calculated: DamageResult,
    /// Damage removed by a block
    pub blocked_amount: f64,
    pub mitigation: MitigationBreakdown,
    pub elemental: ElementalBreakdown,

    // === Avoidance ===
    pub avoided: Option<Avoidance>,

    // === Feedback ===
    pub indicators: Vec<Indicator>,
    /// Calculator tags, then "Elemental" if any elemental damage landed
    pub tags: Vec<String>,

    // === Side Effects ===
    pub lifesteal: Option<LifeStealOutcome>,
    /// Damage reflected onto the attacker
    pub reflected: Option<f64>,
}

impl CombatOutcome {
    /// Outcome for a hit cancelled by dodge or parry
    pub fn avoided(avoidance: Avoidance) -> Self {
        CombatOutcome {
            avoided: Some(avoidance),
            indicators: vec![avoidance.into()],
            ..Default::default()
        }
    }

    pub fn was_avoided(&self) -> bool {
        self.avoided.is_some()
    }

    pub fn is_critical(&self) -> bool {
        self.calculated.is_critical
    }

    pub fn was_blocked(&self) -> bool {
        self.indicators.contains(&Indicator::Block)
    }

    /// Mitigated damage from the physical calculator alone
    ///
    /// Block and mitigation scale the calculator output uniformly, so the
    /// physical share of a hybrid hit keeps its pre-mitigation proportion.
    pub fn physical_damage(&self) -> f64 {
        if self.calculated.amount > 0.0 {
            self.mitigation.final_damage * self.calculated.physical_amount / self.calculated.amount
        } else {
            0.0
        }
    }

    pub fn healed(&self) -> f64 {
        self.lifesteal.map(|l| l.healed).unwrap_or(0.0)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if let Some(avoidance) = self.avoided {
            return avoidance.label().to_string();
        }

        let mut parts = vec![format!("{:.1} damage", self.final_damage)];

        if self.is_critical() {
            parts.push("CRIT".to_string());
        }
        if self.blocked_amount > 0.0 {
            parts.push(format!("{:.1} blocked", self.blocked_amount));
        }
        if self.mitigation.applied_mitigation > 0.0 {
            parts.push(format!(
                "{:.0}% mitigated",
                self.mitigation.applied_mitigation * 100.0
            ));
        }
        if self.elemental.has_damage() {
            parts.push(format!("{:.1} elemental", self.elemental.total));
        }
        if self.healed() > 0.0 {
            parts.push(format!("{:.1} healed", self.healed()));
        }
        if let Some(reflected) = self.reflected {
            parts.push(format!("{:.1} reflected", reflected));
        }

        parts.join(", ")
    }
}
