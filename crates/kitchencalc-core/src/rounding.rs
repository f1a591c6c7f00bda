use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

// Halves computed through a division (e.g. 0.3 / 0.2) can land a hair below .5.
const HALF_EPSILON: f64 = 1e-9;

/// Nearest integer; exact halves go toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5 + HALF_EPSILON).floor()
}

pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    round_half_up(value / increment) * increment
}

/// Decimal rounding; dividing by the power of ten keeps `78.5` from printing as `78.50000000000001`.
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    round_half_up(value * scale) / scale
}

/// Serving counts never round up: a partial slice is not a serving.
pub fn floor_count(value: f64) -> u32 {
    (value + HALF_EPSILON).floor().max(0.0) as u32
}

/// Rounding applied to display values. Every field has a default, so an empty
/// `[rounding]` table in the config file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundingPolicy {
    pub practical_temperature_step: f64,
    pub time_step_minutes: f64,
    pub wattage_threshold_seconds: f64,
    pub wattage_fine_step_seconds: f64,
    pub wattage_coarse_step_seconds: f64,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            practical_temperature_step: 5.0,
            time_step_minutes: 1.0,
            wattage_threshold_seconds: 120.0,
            wattage_fine_step_seconds: 5.0,
            wattage_coarse_step_seconds: 15.0,
        }
    }
}

impl RoundingPolicy {
    pub fn validate(&self) -> Result<()> {
        let steps = [
            ("practical_temperature_step", self.practical_temperature_step),
            ("time_step_minutes", self.time_step_minutes),
            ("wattage_threshold_seconds", self.wattage_threshold_seconds),
            ("wattage_fine_step_seconds", self.wattage_fine_step_seconds),
            ("wattage_coarse_step_seconds", self.wattage_coarse_step_seconds),
        ];
        for (name, step) in steps {
            if !step.is_finite() || step <= 0.0 {
                return Err(CalcError::Config(format!(
                    "rounding.{name} must be a positive number, got {step}"
                )));
            }
        }
        Ok(())
    }

    /// Seconds are snapped to the fine step below the threshold and to the
    /// coarse step at or above it. The threshold is tested on the raw value.
    pub fn round_wattage_seconds(&self, seconds: f64) -> f64 {
        if seconds < self.wattage_threshold_seconds {
            round_to_increment(seconds, self.wattage_fine_step_seconds)
        } else {
            round_to_increment(seconds, self.wattage_coarse_step_seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }

    #[test]
    fn increments_snap_to_grid() {
        assert_eq!(round_to_increment(372.5, 5.0), 375.0);
        assert_eq!(round_to_increment(187.5, 15.0), 195.0);
        assert_eq!(round_to_increment(187.49, 15.0), 180.0);
        assert_eq!(round_to_increment(0.375, 0.25), 0.5);
    }

    #[test]
    fn wattage_policy_switches_step_at_threshold() {
        let policy = RoundingPolicy::default();
        assert_eq!(policy.round_wattage_seconds(62.0), 60.0);
        assert_eq!(policy.round_wattage_seconds(117.6), 120.0);
        assert_eq!(policy.round_wattage_seconds(120.0), 120.0);
        assert_eq!(policy.round_wattage_seconds(188.57), 195.0);
    }

    #[test]
    fn zero_step_is_rejected() {
        let policy = RoundingPolicy {
            wattage_fine_step_seconds: 0.0,
            ..RoundingPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
