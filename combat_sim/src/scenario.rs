//! Duel scenario files

use combat_core::attribute::{AttributeModifier, AttributeSet, ModifierOperation, Tick};
use combat_core::config::{load_toml, ConfigError};
use combat_core::{CombatEntity, DamageCategory, DamageCause, DamageContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A scripted exchange: one attacker hitting one defender on a fixed cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub attacker: FighterSpec,
    pub defender: FighterSpec,
    #[serde(default)]
    pub attack: AttackSpec,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }
}

/// One side of the duel as written in the scenario file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterSpec {
    pub id: String,
    pub health: f64,
    #[serde(default)]
    pub player: bool,
    #[serde(default)]
    pub undead: bool,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Base attribute values by id
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
    #[serde(default)]
    pub buffs: Vec<BuffSpec>,
}

/// A modifier applied to one attribute at the start of the duel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffSpec {
    pub attribute: String,
    pub id: String,
    pub operation: ModifierOperation,
    pub amount: f64,
    #[serde(default)]
    pub expires_at: Option<Tick>,
}

impl BuffSpec {
    pub fn modifier(&self) -> AttributeModifier {
        let modifier = AttributeModifier::new(self.id.clone(), self.operation, self.amount);
        match self.expires_at {
            Some(tick) => modifier.until(tick),
            None => modifier,
        }
    }
}

impl FighterSpec {
    pub fn build(&self) -> CombatEntity {
        let mut attributes = AttributeSet::from_bases(
            self.attributes.iter().map(|(id, base)| (id.clone(), *base)),
        );
        for buff in &self.buffs {
            attributes.add_modifier(buff.attribute.clone(), buff.modifier());
        }

        let mut entity = CombatEntity::new(self.id.clone(), self.health);
        entity.attributes = attributes;
        entity.player = self.player;
        entity.undead = self.undead;
        entity.tags = self.tags.clone();
        if let Some(level) = self.level {
            entity.level = level;
        }
        entity
    }
}

/// How the attacker swings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackSpec {
    #[serde(default = "default_cause")]
    pub cause: DamageCause,
    /// Explicit categories. Empty = derived from the cause
    #[serde(default)]
    pub categories: Vec<DamageCategory>,
    /// Damage the host reports for each hit
    #[serde(default)]
    pub base_damage: f64,
    #[serde(default = "default_hits")]
    pub hits: u32,
    /// Ticks between hits
    #[serde(default = "default_interval")]
    pub interval: Tick,
}

impl AttackSpec {
    pub fn context(&self) -> DamageContext {
        DamageContext::with_categories(self.cause, self.categories.iter().copied())
    }
}

impl Default for AttackSpec {
    fn default() -> Self {
        AttackSpec {
            cause: default_cause(),
            categories: Vec::new(),
            base_damage: 0.0,
            hits: default_hits(),
            interval: default_interval(),
        }
    }
}

fn default_cause() -> DamageCause {
    DamageCause::Melee
}
fn default_hits() -> u32 {
    50
}
fn default_interval() -> Tick {
    20
}
