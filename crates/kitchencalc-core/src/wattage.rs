use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::quantity::{CalculationResult, Unit};
use crate::rounding::RoundingPolicy;

/// Wattages printed on most packaging and microwave rating plates.
pub const COMMON_WATTAGES: [u32; 8] = [600, 700, 800, 900, 1000, 1100, 1200, 1250];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WattageQuery {
    pub time_seconds: f64,
    pub from_watts: f64,
    pub to_watts: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WattageAdjustment {
    pub time: CalculationResult,
    pub minutes: f64,
}

impl WattageAdjustment {
    /// `m:ss` form of the display time.
    pub fn clock(&self) -> String {
        format_clock(self.time.display_value)
    }
}

pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Energy delivered is held constant: `t2 = t1 * w1 / w2`.
pub fn scale_by_wattage(time_seconds: f64, from_watts: f64, to_watts: f64) -> Result<f64> {
    ensure_non_negative("time_seconds", time_seconds)?;
    ensure_positive("from_watts", from_watts)?;
    ensure_positive("to_watts", to_watts)?;
    Ok(time_seconds * (from_watts / to_watts))
}

#[derive(Debug, Clone, Default)]
pub struct WattageConverter {
    policy: RoundingPolicy,
}

impl WattageConverter {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }
}

impl Converter for WattageConverter {
    type Input = WattageQuery;
    type Output = WattageAdjustment;

    fn code(&self) -> &'static str {
        "wattage"
    }

    fn convert(&self, query: &WattageQuery) -> Result<WattageAdjustment> {
        let seconds = scale_by_wattage(query.time_seconds, query.from_watts, query.to_watts)?;
        let display = self.policy.round_wattage_seconds(seconds);
        Ok(WattageAdjustment {
            time: CalculationResult::rounded(seconds, display, Unit::Seconds),
            minutes: seconds / 60.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(195.0), "3:15");
        assert_eq!(format_clock(60.0), "1:00");
        assert_eq!(format_clock(5.0), "0:05");
    }
}
