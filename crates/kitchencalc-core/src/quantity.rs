use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, Result};

pub const ABSOLUTE_ZERO_F: f64 = -459.67;
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Fahrenheit,
    Celsius,
    GasMark,
    Minutes,
    Seconds,
    Cups,
    Tablespoons,
    Teaspoons,
    Milliliters,
    FluidOunces,
    Grams,
    Ounces,
    Pounds,
    SquareInches,
    Servings,
    Ratio,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Fahrenheit => "°F",
            Unit::Celsius => "°C",
            Unit::GasMark => "gas mark",
            Unit::Minutes => "min",
            Unit::Seconds => "s",
            Unit::Cups => "cup",
            Unit::Tablespoons => "tbsp",
            Unit::Teaspoons => "tsp",
            Unit::Milliliters => "ml",
            Unit::FluidOunces => "fl oz",
            Unit::Grams => "g",
            Unit::Ounces => "oz",
            Unit::Pounds => "lb",
            Unit::SquareInches => "sq in",
            Unit::Servings => "servings",
            Unit::Ratio => "x",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One computed quantity. `value` is never rounded; `display_value` is what a
/// UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub value: f64,
    pub display_value: f64,
    pub unit: Unit,
    pub rounding_applied: bool,
}

impl CalculationResult {
    pub fn exact(value: f64, unit: Unit) -> Self {
        Self {
            value,
            display_value: value,
            unit,
            rounding_applied: false,
        }
    }

    pub fn rounded(value: f64, display_value: f64, unit: Unit) -> Self {
        Self {
            value,
            display_value,
            unit,
            rounding_applied: value != display_value,
        }
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_value, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

impl TimeRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        ensure_finite("time_range.min", min)?;
        ensure_finite("time_range.max", max)?;
        if min > max {
            return Err(CalcError::validation(
                "time_range",
                format!("min {min} exceeds max {max}"),
            ));
        }
        Ok(Self { min, max })
    }

    /// For static table data whose ordering is checked by the table tests.
    pub(crate) const fn fixed(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn absolute_zero(&self) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => ABSOLUTE_ZERO_F,
            TemperatureUnit::Celsius => ABSOLUTE_ZERO_C,
        }
    }

    pub fn as_unit(&self) -> Unit {
        match self {
            TemperatureUnit::Fahrenheit => Unit::Fahrenheit,
            TemperatureUnit::Celsius => Unit::Celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    #[serde(default)]
    pub unit: TemperatureUnit,
}

impl Temperature {
    pub fn new(value: f64, unit: TemperatureUnit) -> Result<Self> {
        let temperature = Self { value, unit };
        temperature.validate()?;
        Ok(temperature)
    }

    pub fn fahrenheit(value: f64) -> Result<Self> {
        Self::new(value, TemperatureUnit::Fahrenheit)
    }

    pub fn celsius(value: f64) -> Result<Self> {
        Self::new(value, TemperatureUnit::Celsius)
    }

    /// Deserialized temperatures bypass `new`, so callers re-check here.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("temperature", self.value)?;
        let floor = self.unit.absolute_zero();
        if self.value < floor {
            return Err(CalcError::validation(
                "temperature",
                format!("{} {} is below absolute zero", self.value, self.unit.as_unit()),
            ));
        }
        Ok(())
    }
}
