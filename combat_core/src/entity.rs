//! Entity seams - What the engine needs to know about attackers and victims
//!
//! The host owns its entities. It exposes them to the engine through
//! [`Combatant`] and receives side effects (thorns, lifesteal) through
//! [`DamageApplication`].

use crate::attribute::{ids, AttributeSet, AttributeView};
use crate::context::DamageCause;
use serde::{Deserialize, Serialize};

/// Marker tag prefixes that carry an entity's element
pub const ELEMENT_TAG_PREFIXES: [&str; 2] = ["element_", "dummy_type_"];

/// Find the element named by the first marker tag with a known prefix
pub fn element_from_tags<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    tags.iter().find_map(|tag| {
        let tag = tag.as_ref();
        ELEMENT_TAG_PREFIXES.iter().find_map(|prefix| {
            tag.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(str::to_lowercase)
        })
    })
}

/// Classification queries the host answers about an entity
pub trait EntityClassification {
    fn is_player(&self) -> bool;

    fn is_undead(&self) -> bool {
        false
    }

    /// Scoreboard / marker tags on the entity
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Best-effort element of the entity, if any
    fn element_tag(&self) -> Option<String> {
        element_from_tags(self.tags())
    }
}

/// A living entity taking part in combat
pub trait Combatant: EntityClassification {
    fn id(&self) -> &str;

    fn attributes(&self) -> &dyn AttributeView;

    /// Level used for level-scaled defense divisors
    fn level(&self) -> u32 {
        1
    }

    fn health(&self) -> f64;

    fn max_health(&self) -> f64 {
        self.attributes().value(ids::MAX_HEALTH)
    }
}

/// Host primitives for inflicting damage and changing health
pub trait DamageApplication {
    /// Deal damage to `target` through the host's normal damage path
    fn apply_damage(&mut self, target: &str, amount: f64, source: Option<&str>, cause: DamageCause);

    /// Set the current health of `target` and sync any health display
    fn set_health(&mut self, target: &str, health: f64);
}

/// Records side effects instead of applying them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingHost {
    pub damage_applied: Vec<AppliedDamage>,
    pub health_updates: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDamage {
    pub target: String,
    pub amount: f64,
    pub source: Option<String>,
    pub cause: DamageCause,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DamageApplication for RecordingHost {
    fn apply_damage(&mut self, target: &str, amount: f64, source: Option<&str>, cause: DamageCause) {
        self.damage_applied.push(AppliedDamage {
            target: target.to_string(),
            amount,
            source: source.map(str::to_string),
            cause,
        });
    }

    fn set_health(&mut self, target: &str, health: f64) {
        self.health_updates.push((target.to_string(), health));
    }
}

/// A self-contained combatant backed by an [`AttributeSet`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEntity {
    pub id: String,
    #[serde(default)]
    pub attributes: AttributeSet,
    #[serde(default)]
    pub player: bool,
    #[serde(default)]
    pub undead: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_level")]
    pub level: u32,
    pub health: f64,
}

fn default_level() -> u32 {
    1
}

impl CombatEntity {
    pub fn new(id: impl Into<String>, health: f64) -> Self {
        CombatEntity {
            id: id.into(),
            attributes: AttributeSet::new(),
            player: false,
            undead: false,
            tags: Vec::new(),
            level: 1,
            health,
        }
    }

    pub fn player(id: impl Into<String>, health: f64) -> Self {
        CombatEntity {
            player: true,
            ..Self::new(id, health)
        }
    }

    pub fn with_attribute(mut self, id: impl Into<String>, base: f64) -> Self {
        self.attributes.set_base(id, base);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn undead(mut self) -> Self {
        self.undead = true;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

impl EntityClassification for CombatEntity {
    fn is_player(&self) -> bool {
        self.player
    }

    fn is_undead(&self) -> bool {
        self.undead
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Combatant for CombatEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> &dyn AttributeView {
        &self.attributes
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn health(&self) -> f64 {
        self.health
    }
}
