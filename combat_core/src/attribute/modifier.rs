//! AttributeModifier - Permanent and timed changes to an attribute

use serde::{Deserialize, Serialize};

/// Game tick counter used for modifier expiry
pub type Tick = u64;

/// How a modifier folds into the resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOperation {
    /// Added to the base value
    Flat,
    /// Summed with other increased modifiers (0.40 = 40%)
    Increased,
    /// Each one multiplies the result separately (0.20 = 20% more)
    More,
}

/// A modifier applied to one attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    /// Modifier identifier, unique within one attribute
    pub id: String,
    pub operation: ModifierOperation,
    pub amount: f64,
    /// Tick at which the modifier stops applying. `None` = permanent
    #[serde(default)]
    pub expires_at: Option<Tick>,
}

impl AttributeModifier {
    /// Create a permanent modifier
    pub fn new(id: impl Into<String>, operation: ModifierOperation, amount: f64) -> Self {
        AttributeModifier {
            id: id.into(),
            operation,
            amount,
            expires_at: None,
        }
    }

    pub fn flat(id: impl Into<String>, amount: f64) -> Self {
        Self::new(id, ModifierOperation::Flat, amount)
    }

    pub fn increased(id: impl Into<String>, amount: f64) -> Self {
        Self::new(id, ModifierOperation::Increased, amount)
    }

    pub fn more(id: impl Into<String>, amount: f64) -> Self {
        Self::new(id, ModifierOperation::More, amount)
    }

    /// Make this modifier expire at the given tick
    pub fn until(mut self, tick: Tick) -> Self {
        self.expires_at = Some(tick);
        self
    }

    /// Make this modifier last `duration` ticks starting at `now`
    pub fn lasting(self, now: Tick, duration: Tick) -> Self {
        self.until(now.saturating_add(duration))
    }

    /// Whether the modifier still applies at `tick`
    pub fn is_active_at(&self, tick: Tick) -> bool {
        match self.expires_at {
            Some(expiry) => tick < expiry,
            None => true,
        }
    }
}
