//! Global pricing settings shared by every product row

use serde::{Deserialize, Serialize};

use crate::entities::validation::{check_amount, InputError};

/// Monthly fixed cost used when neither config nor worksheet provides one
pub const DEFAULT_FIXED_COST: f64 = 100_000.0;

/// Target gross margin used when neither config nor worksheet provides one
pub const DEFAULT_TARGET_MARGIN: f64 = 0.40;

/// Upper bound for the target margin accepted at the input boundary
pub const DEFAULT_MAX_TARGET_MARGIN: f64 = 0.9;

/// Settings that apply to the whole worksheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Total monthly fixed cost, allocated across products by volume
    pub fixed_cost: f64,

    /// Desired gross margin as a fraction (0.40 = 40%)
    pub target_margin: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            fixed_cost: DEFAULT_FIXED_COST,
            target_margin: DEFAULT_TARGET_MARGIN,
        }
    }
}

impl GlobalSettings {
    pub fn new(fixed_cost: f64, target_margin: f64) -> Self {
        Self {
            fixed_cost,
            target_margin,
        }
    }

    /// Check the settings against the boundary rules
    ///
    /// `max_margin` is the highest target margin the caller accepts; the
    /// engine itself tolerates any value.
    pub fn validate(&self, max_margin: f64) -> Result<(), InputError> {
        check_amount(self.fixed_cost, "fixed_cost", InputError::NegativeFixedCost)?;

        if !self.target_margin.is_finite() {
            return Err(InputError::NotFinite {
                field: "target_margin".to_string(),
            });
        }
        if self.target_margin < 0.0 || self.target_margin > max_margin {
            return Err(InputError::MarginOutOfRange {
                value: self.target_margin,
                max: max_margin,
            });
        }

        Ok(())
    }
}

/// Convert a percentage (40) into the fraction the engine works with (0.40)
pub fn margin_from_percent(percent: f64) -> f64 {
    percent / 100.0
}
