//! Closed-form conversions between Fahrenheit, Celsius and the UK gas mark scale.
//!
//! Gas mark follows `(F - 250) / 25`. Display marks are clamped to `[1/4, 10]`,
//! snapped to quarter marks below 1 and to whole marks from 1 upward.

use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{ensure_finite, CalcError, Result};
use crate::quantity::{CalculationResult, Temperature, TemperatureUnit, Unit};
use crate::rounding::{round_half_up, round_to_increment, RoundingPolicy};

pub const GAS_MARK_BASE_F: f64 = 250.0;
pub const GAS_MARK_STEP_F: f64 = 25.0;
pub const GAS_MARK_MIN: f64 = 0.25;
pub const GAS_MARK_MAX: f64 = 10.0;

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Unclamped, unrounded mark.
pub fn raw_gas_mark(fahrenheit: f64) -> f64 {
    (fahrenheit - GAS_MARK_BASE_F) / GAS_MARK_STEP_F
}

/// The mark an oven dial would show.
pub fn display_gas_mark(raw: f64) -> f64 {
    let clamped = raw.clamp(GAS_MARK_MIN, GAS_MARK_MAX);
    if clamped < 1.0 {
        round_to_increment(clamped, 0.25).max(GAS_MARK_MIN)
    } else {
        round_half_up(clamped).min(GAS_MARK_MAX)
    }
}

pub fn fahrenheit_to_gas_mark(fahrenheit: f64) -> f64 {
    display_gas_mark(raw_gas_mark(fahrenheit))
}

pub fn celsius_to_gas_mark(celsius: f64) -> f64 {
    fahrenheit_to_gas_mark(celsius_to_fahrenheit(celsius))
}

pub fn gas_mark_to_celsius(mark: f64) -> Result<f64> {
    gas_mark_to_fahrenheit(mark).map(fahrenheit_to_celsius)
}

/// Only marks printed on a dial, `[1/4, 10]`, are accepted.
pub fn gas_mark_to_fahrenheit(mark: f64) -> Result<f64> {
    ensure_finite("gas_mark", mark)?;
    if !(GAS_MARK_MIN..=GAS_MARK_MAX).contains(&mark) {
        return Err(CalcError::validation(
            "gas_mark",
            format!("{mark} is outside the gas mark range {GAS_MARK_MIN}-{GAS_MARK_MAX}"),
        ));
    }
    Ok(GAS_MARK_BASE_F + GAS_MARK_STEP_F * mark)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureScale {
    Fahrenheit,
    Celsius,
    GasMark,
}

impl TemperatureScale {
    fn unit(&self) -> Unit {
        match self {
            TemperatureScale::Fahrenheit => Unit::Fahrenheit,
            TemperatureScale::Celsius => Unit::Celsius,
            TemperatureScale::GasMark => Unit::GasMark,
        }
    }
}

/// How temperature display values are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureDisplay {
    /// Nearest whole degree.
    #[default]
    Whole,
    /// Nearest practical oven setting (5 degrees by default).
    Practical,
}

impl TemperatureDisplay {
    pub fn apply(&self, degrees: f64, policy: &RoundingPolicy) -> f64 {
        match self {
            TemperatureDisplay::Whole => round_half_up(degrees),
            TemperatureDisplay::Practical => {
                round_to_increment(degrees, policy.practical_temperature_step)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureQuery {
    pub value: f64,
    pub from: TemperatureScale,
    pub to: TemperatureScale,
    #[serde(default)]
    pub display: TemperatureDisplay,
}

#[derive(Debug, Clone, Default)]
pub struct TemperatureConverter {
    policy: RoundingPolicy,
}

impl TemperatureConverter {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }

    fn to_fahrenheit(&self, value: f64, scale: TemperatureScale) -> Result<f64> {
        let fahrenheit = match scale {
            TemperatureScale::Fahrenheit => value,
            TemperatureScale::Celsius => {
                Temperature::celsius(value)?;
                celsius_to_fahrenheit(value)
            }
            TemperatureScale::GasMark => return gas_mark_to_fahrenheit(value),
        };
        Temperature::fahrenheit(fahrenheit)?;
        Ok(fahrenheit)
    }
}

impl Converter for TemperatureConverter {
    type Input = TemperatureQuery;
    type Output = CalculationResult;

    fn code(&self) -> &'static str {
        "temperature"
    }

    fn convert(&self, query: &TemperatureQuery) -> Result<CalculationResult> {
        let fahrenheit = self.to_fahrenheit(query.value, query.from)?;
        let unit = query.to.unit();

        let result = match query.to {
            TemperatureScale::Fahrenheit => CalculationResult::rounded(
                fahrenheit,
                query.display.apply(fahrenheit, &self.policy),
                unit,
            ),
            TemperatureScale::Celsius => {
                let celsius = fahrenheit_to_celsius(fahrenheit);
                CalculationResult::rounded(celsius, query.display.apply(celsius, &self.policy), unit)
            }
            TemperatureScale::GasMark => {
                let raw = raw_gas_mark(fahrenheit);
                CalculationResult::rounded(raw, display_gas_mark(raw), unit)
            }
        };
        Ok(result)
    }
}

/// A Fahrenheit table value expressed in `unit`, displayed to the whole degree.
pub(crate) fn table_temperature(fahrenheit: f64, unit: TemperatureUnit) -> CalculationResult {
    let value = match unit {
        TemperatureUnit::Fahrenheit => fahrenheit,
        TemperatureUnit::Celsius => fahrenheit_to_celsius(fahrenheit),
    };
    CalculationResult::rounded(value, round_half_up(value), unit.as_unit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mark_clamps_both_ends() {
        assert_eq!(display_gas_mark(-4.0), 0.25);
        assert_eq!(display_gas_mark(14.0), 10.0);
    }

    #[test]
    fn display_mark_uses_quarters_below_one() {
        assert_eq!(display_gas_mark(0.3), 0.25);
        assert_eq!(display_gas_mark(0.4), 0.5);
        assert_eq!(display_gas_mark(0.875), 1.0);
        assert_eq!(display_gas_mark(1.4), 1.0);
        assert_eq!(display_gas_mark(1.5), 2.0);
    }
}
