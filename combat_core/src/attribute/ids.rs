//! Attribute identifiers read by the combat engine
//!
//! Keys are plain strings so host configs and item definitions can name them
//! directly.

// === Offense ===
pub const WEAPON_DAMAGE: &str = "weapon_damage";
pub const STRENGTH: &str = "strength";
pub const INTELLIGENCE: &str = "intelligence";
pub const PHYSICAL_DAMAGE: &str = "physical_damage";
pub const MAGIC_DAMAGE: &str = "magic_damage";
pub const PROJECTILE_DAMAGE: &str = "projectile_damage";
pub const UNDEAD_DAMAGE: &str = "undead_damage";
pub const CRITICAL_CHANCE: &str = "critical_chance";
pub const CRITICAL_DAMAGE: &str = "critical_damage";
pub const ACCURACY: &str = "accuracy";

// === Penetration ===
pub const ARMOR_PENETRATION: &str = "armor_penetration";
pub const ARMOR_PENETRATION_FLAT: &str = "armor_penetration_flat";
pub const MAGIC_PENETRATION: &str = "magic_penetration";
pub const MAGIC_PENETRATION_FLAT: &str = "magic_penetration_flat";

// === Avoidance ===
pub const DODGE_RATING: &str = "dodge_rating";
pub const PARRY_RATING: &str = "parry_rating";
pub const BLOCK_RATING: &str = "block_rating";
pub const BLOCK_POWER: &str = "block_power";

// === Defense ===
pub const DEFENSE: &str = "defense";
pub const MAGIC_RESISTANCE: &str = "magic_resistance";
pub const CRITICAL_RESISTANCE: &str = "critical_resistance";

// === Flat percentage reductions ===
pub const DAMAGE_REDUCTION: &str = "damage_reduction";
pub const PVP_DAMAGE_REDUCTION: &str = "pvp_damage_reduction";
pub const PVE_DAMAGE_REDUCTION: &str = "pve_damage_reduction";
pub const FALL_DAMAGE_REDUCTION: &str = "fall_damage_reduction";
pub const PROJECTILE_DAMAGE_REDUCTION: &str = "projectile_damage_reduction";
pub const PHYSICAL_DAMAGE_REDUCTION: &str = "physical_damage_reduction";
pub const MAGIC_DAMAGE_REDUCTION: &str = "magic_damage_reduction";

// === Sustain / retaliation ===
pub const LIFESTEAL: &str = "lifesteal";
pub const THORNS: &str = "thorns";
pub const MAX_HEALTH: &str = "max_health";
