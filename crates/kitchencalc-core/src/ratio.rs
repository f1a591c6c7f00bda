//! Linear oven-to-appliance conversions: a fixed temperature offset and a
//! multiplicative time ratio, applied forward or in reverse.

use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{ensure_non_negative, ensure_positive, CalcError, Result};
use crate::quantity::{CalculationResult, Temperature, TemperatureUnit, Unit};
use crate::rounding::{round_to_increment, RoundingPolicy};
use crate::temperature::TemperatureDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureOffset {
    pub amount: f64,
    pub unit: TemperatureUnit,
}

impl TemperatureOffset {
    pub const fn fahrenheit(amount: f64) -> Self {
        Self {
            amount,
            unit: TemperatureUnit::Fahrenheit,
        }
    }

    /// The same temperature difference expressed in `unit`.
    pub fn in_unit(&self, unit: TemperatureUnit) -> f64 {
        match (self.unit, unit) {
            (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => self.amount * 5.0 / 9.0,
            (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => self.amount * 9.0 / 5.0,
            _ => self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    pub offset: Option<TemperatureOffset>,
    pub time_ratio: f64,
}

impl ConversionRule {
    pub const AIR_FRYER: ConversionRule = ConversionRule {
        offset: Some(TemperatureOffset::fahrenheit(25.0)),
        time_ratio: 0.80,
    };

    pub const CONVECTION: ConversionRule = ConversionRule {
        offset: Some(TemperatureOffset::fahrenheit(25.0)),
        time_ratio: 0.85,
    };

    pub const MICROWAVE: ConversionRule = ConversionRule {
        offset: None,
        time_ratio: 0.25,
    };

    pub fn validate(&self) -> Result<()> {
        if !self.time_ratio.is_finite() || self.time_ratio <= 0.0 {
            return Err(CalcError::Config(format!(
                "time ratio must be a positive number, got {}",
                self.time_ratio
            )));
        }
        if let Some(offset) = self.offset {
            if !offset.amount.is_finite() {
                return Err(CalcError::Config(format!(
                    "temperature offset must be finite, got {}",
                    offset.amount
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Oven recipe to the target appliance.
    #[default]
    Forward,
    /// Target appliance back to an oven recipe.
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioQuery {
    #[serde(default)]
    pub temperature: Option<Temperature>,
    pub time_minutes: f64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub display: TemperatureDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvertedSetting {
    pub temperature: Option<CalculationResult>,
    pub time: CalculationResult,
}

#[derive(Debug, Clone)]
pub struct RatioConverter {
    code: &'static str,
    rule: ConversionRule,
    policy: RoundingPolicy,
}

impl RatioConverter {
    pub fn new(code: &'static str, rule: ConversionRule, policy: RoundingPolicy) -> Self {
        Self { code, rule, policy }
    }

    pub fn air_fryer() -> Self {
        Self::new("air_fryer", ConversionRule::AIR_FRYER, RoundingPolicy::default())
    }

    pub fn convection() -> Self {
        Self::new("convection", ConversionRule::CONVECTION, RoundingPolicy::default())
    }

    pub fn microwave() -> Self {
        Self::new("microwave", ConversionRule::MICROWAVE, RoundingPolicy::default())
    }

    pub fn rule(&self) -> &ConversionRule {
        &self.rule
    }

    fn convert_temperature(
        &self,
        offset: TemperatureOffset,
        input: Option<Temperature>,
        direction: Direction,
        display: TemperatureDisplay,
    ) -> Result<CalculationResult> {
        let input = input.ok_or_else(|| {
            CalcError::validation("temperature", format!("{} conversion needs a temperature", self.code))
        })?;
        input.validate()?;

        let delta = offset.in_unit(input.unit);
        let value = match direction {
            Direction::Forward => input.value - delta,
            Direction::Reverse => input.value + delta,
        };
        Temperature::new(value, input.unit)?;

        Ok(CalculationResult::rounded(
            value,
            display.apply(value, &self.policy),
            input.unit.as_unit(),
        ))
    }

    fn convert_time(&self, minutes: f64, direction: Direction) -> Result<CalculationResult> {
        ensure_non_negative("time_minutes", minutes)?;
        let value = match direction {
            Direction::Forward => minutes * self.rule.time_ratio,
            Direction::Reverse => minutes / self.rule.time_ratio,
        };
        let display = round_to_increment(value, self.policy.time_step_minutes);
        Ok(CalculationResult::rounded(value, display, Unit::Minutes))
    }
}

impl Converter for RatioConverter {
    type Input = RatioQuery;
    type Output = ConvertedSetting;

    fn code(&self) -> &'static str {
        self.code
    }

    fn convert(&self, query: &RatioQuery) -> Result<ConvertedSetting> {
        ensure_positive("time_ratio", self.rule.time_ratio)?;
        let time = self.convert_time(query.time_minutes, query.direction)?;
        let temperature = match self.rule.offset {
            Some(offset) => Some(self.convert_temperature(
                offset,
                query.temperature,
                query.direction,
                query.display,
            )?),
            None => None,
        };
        Ok(ConvertedSetting { temperature, time })
    }
}
