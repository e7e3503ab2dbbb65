//! Combat tunables

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How stats convert into damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Stat contributions are already folded into flat bonuses upstream
    Additive,
    /// `(base + flat) * (1 + stat * multiplier) + other_flat`
    #[default]
    Multiplicative,
}

/// Per-server combat constants
///
/// Immutable while a damage event resolves; swapped only between events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatConfig {
    #[serde(default)]
    pub scaling: ScalingConfig,
    #[serde(default)]
    pub crit: CritConfig,
    #[serde(default)]
    pub mitigation: MitigationConfig,
    #[serde(default)]
    pub elemental: ElementalConfig,
}

impl CombatConfig {
    /// Reject values that would break the damage formulas
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.mitigation;
        if !m.defense_divisor.is_finite() || m.defense_divisor <= 0.0 {
            return Err(invalid(format!(
                "mitigation.defense_divisor must be > 0, got {}",
                m.defense_divisor
            )));
        }
        if m.defense_scaling_enabled
            && (!m.defense_scaling_base.is_finite() || m.defense_scaling_base <= 0.0)
        {
            return Err(invalid(format!(
                "mitigation.defense_scaling_base must be > 0 when scaling is enabled, got {}",
                m.defense_scaling_base
            )));
        }
        if !(0.0..=1.0).contains(&m.max_mitigation) {
            return Err(invalid(format!(
                "mitigation.max_mitigation must be within [0, 1], got {}",
                m.max_mitigation
            )));
        }

        let s = &self.scaling;
        for (name, value) in [
            ("scaling.base_hand_damage", s.base_hand_damage),
            ("scaling.strength_multiplier", s.strength_multiplier),
            ("scaling.intelligence_multiplier", s.intelligence_multiplier),
            ("scaling.min_spell_base_damage", s.min_spell_base_damage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be finite and >= 0, got {}", name, value)));
            }
        }

        for (attacker, row) in &self.elemental.multipliers {
            for (victim, value) in row {
                if !value.is_finite() {
                    return Err(invalid(format!(
                        "elemental.multipliers.{}.{} must be finite",
                        attacker, victim
                    )));
                }
            }
        }

        Ok(())
    }

    /// Divisor for the defense curve given the attacker's level
    pub fn defense_divisor(&self, attacker_level: u32) -> f64 {
        self.mitigation.divisor_for_level(attacker_level)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingConfig {
    #[serde(default)]
    pub mode: ScalingMode,
    /// Unarmed base damage added before weapon damage
    #[serde(default = "default_base_hand_damage")]
    pub base_hand_damage: f64,
    #[serde(default = "default_stat_multiplier")]
    pub strength_multiplier: f64,
    #[serde(default = "default_stat_multiplier")]
    pub intelligence_multiplier: f64,
    /// Spell base damage below this is treated as no base at all
    #[serde(default = "default_min_spell_base")]
    pub min_spell_base_damage: f64,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        ScalingConfig {
            mode: ScalingMode::default(),
            base_hand_damage: default_base_hand_damage(),
            strength_multiplier: default_stat_multiplier(),
            intelligence_multiplier: default_stat_multiplier(),
            min_spell_base_damage: default_min_spell_base(),
        }
    }
}

fn default_base_hand_damage() -> f64 {
    1.0
}
fn default_stat_multiplier() -> f64 {
    0.01
}
fn default_min_spell_base() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CritConfig {
    /// Crit chance (%) when the attacker has no critical_chance attribute
    #[serde(default = "default_crit_chance")]
    pub default_chance: f64,
    /// Crit damage (%) when the attacker has no critical_damage attribute
    #[serde(default = "default_crit_damage")]
    pub default_damage: f64,
}

impl Default for CritConfig {
    fn default() -> Self {
        CritConfig {
            default_chance: default_crit_chance(),
            default_damage: default_crit_damage(),
        }
    }
}

fn default_crit_chance() -> f64 {
    5.0
}
fn default_crit_damage() -> f64 {
    150.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationConfig {
    /// Formula constant: mitigation = defense / (defense + divisor)
    #[serde(default = "default_defense_divisor")]
    pub defense_divisor: f64,
    /// Replace the fixed divisor with `scaling_base * attacker_level`
    #[serde(default)]
    pub defense_scaling_enabled: bool,
    #[serde(default = "default_defense_scaling_base")]
    pub defense_scaling_base: f64,
    /// Hard cap on defense mitigation (0.85 = 85%)
    #[serde(default = "default_max_mitigation")]
    pub max_mitigation: f64,
}

impl MitigationConfig {
    pub fn divisor_for_level(&self, attacker_level: u32) -> f64 {
        if self.defense_scaling_enabled {
            self.defense_scaling_base * attacker_level.max(1) as f64
        } else {
            self.defense_divisor
        }
    }
}

impl Default for MitigationConfig {
    fn default() -> Self {
        MitigationConfig {
            defense_divisor: default_defense_divisor(),
            defense_scaling_enabled: false,
            defense_scaling_base: default_defense_scaling_base(),
            max_mitigation: default_max_mitigation(),
        }
    }
}

fn default_defense_divisor() -> f64 {
    100.0
}
fn default_defense_scaling_base() -> f64 {
    10.0
}
fn default_max_mitigation() -> f64 {
    0.85
}

/// Elemental damage attribute and the victim attribute that defends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementPair {
    pub damage_attribute: String,
    pub defense_attribute: String,
}

impl ElementPair {
    pub fn new(damage_attribute: impl Into<String>, defense_attribute: impl Into<String>) -> Self {
        ElementPair {
            damage_attribute: damage_attribute.into(),
            defense_attribute: defense_attribute.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementalConfig {
    #[serde(default = "default_interactions_enabled")]
    pub interactions_enabled: bool,
    /// `multipliers[attacker_element][victim_element]`
    #[serde(default)]
    pub multipliers: HashMap<String, HashMap<String, f64>>,
    #[serde(default = "default_element_pairs")]
    pub pairs: Vec<ElementPair>,
}

impl ElementalConfig {
    /// Interaction multiplier between two elements, if one is configured
    pub fn multiplier(&self, attacker_element: &str, victim_element: &str) -> Option<f64> {
        self.multipliers
            .get(attacker_element)
            .and_then(|row| row.get(victim_element))
            .copied()
    }
}

impl Default for ElementalConfig {
    fn default() -> Self {
        ElementalConfig {
            interactions_enabled: default_interactions_enabled(),
            multipliers: HashMap::new(),
            pairs: default_element_pairs(),
        }
    }
}

fn default_interactions_enabled() -> bool {
    true
}

/// Built-in element table
pub const DEFAULT_ELEMENTS: [&str; 8] = [
    "fire", "ice", "lightning", "water", "earth", "wind", "light", "dark",
];

fn default_element_pairs() -> Vec<ElementPair> {
    DEFAULT_ELEMENTS
        .iter()
        .map(|el| ElementPair::new(format!("{}_damage", el), format!("{}_defense", el)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CombatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scaling.mode, ScalingMode::Multiplicative);
        assert!((config.crit.default_chance - 5.0).abs() < f64::EPSILON);
        assert!((config.crit.default_damage - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.elemental.pairs.len(), 8);
        assert_eq!(config.elemental.pairs[0].damage_attribute, "fire_damage");
        assert_eq!(config.elemental.pairs[0].defense_attribute, "fire_defense");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
[scaling]
mode = "additive"

[mitigation]
defense_divisor = 20.0
"#;
        let config: CombatConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.scaling.mode, ScalingMode::Additive);
        assert!((config.scaling.base_hand_damage - 1.0).abs() < f64::EPSILON);
        assert!((config.mitigation.defense_divisor - 20.0).abs() < f64::EPSILON);
        assert!((config.mitigation.max_mitigation - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_divisor_level_scaling() {
        let mut mitigation = MitigationConfig::default();
        assert!((mitigation.divisor_for_level(50) - 100.0).abs() < f64::EPSILON);

        mitigation.defense_scaling_enabled = true;
        mitigation.defense_scaling_base = 10.0;
        assert!((mitigation.divisor_for_level(0) - 10.0).abs() < f64::EPSILON);
        assert!((mitigation.divisor_for_level(1) - 10.0).abs() < f64::EPSILON);
        assert!((mitigation.divisor_for_level(25) - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CombatConfig::default();
        config.mitigation.defense_divisor = -1.0;
        assert!(config.validate().is_err());

        let mut config = CombatConfig::default();
        config.mitigation.defense_divisor = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = CombatConfig::default();
        config.mitigation.max_mitigation = 1.5;
        assert!(config.validate().is_err());

        let mut config = CombatConfig::default();
        config.mitigation.defense_scaling_enabled = true;
        config.mitigation.defense_scaling_base = 0.0;
        assert!(config.validate().is_err());

        let mut config = CombatConfig::default();
        config.scaling.strength_multiplier = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_scaling_base_ok_when_disabled() {
        let mut config = CombatConfig::default();
        config.mitigation.defense_scaling_base = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_multiplier_lookup() {
        let toml = r#"
[elemental.multipliers.fire]
ice = 1.5
water = 0.5
"#;
        let config: CombatConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.elemental.multiplier("fire", "ice"), Some(1.5));
        assert_eq!(config.elemental.multiplier("fire", "earth"), None);
        assert_eq!(config.elemental.multiplier("plasma", "ice"), None);
    }
}
