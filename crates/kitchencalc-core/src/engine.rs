//! Single entry point over every converter. Requests arrive as a
//! `kind`-tagged enum so the HTTP and CLI surfaces share one shape.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::converter::Converter;
use crate::error::Result;
use crate::lookup::air_fryer::{AirFryerFoodConverter, AirFryerFoodQuery, AirFryerFoodSetting};
use crate::lookup::cake_pan::{CakePanConverter, CakePanEntry};
use crate::lookup::doneness::{DonenessConverter, DonenessQuery, DonenessTarget};
use crate::lookup::meat::{MeatConverter, MeatEstimate, MeatQuery};
use crate::measure::{MeasureConverter, MeasureQuery, Measurement};
use crate::pan::{CakeServings, CakeServingsConverter, PanScale, PanScaleConverter, PanScaleQuery, PanShape};
use crate::quantity::CalculationResult;
use crate::ratio::{ConvertedSetting, RatioConverter, RatioQuery};
use crate::temperature::{TemperatureConverter, TemperatureQuery};
use crate::wattage::{WattageAdjustment, WattageConverter, WattageQuery};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationRequest {
    AirFryer(RatioQuery),
    Convection(RatioQuery),
    Microwave(RatioQuery),
    Wattage(WattageQuery),
    Temperature(TemperatureQuery),
    Measure(MeasureQuery),
    PanScale(PanScaleQuery),
    CakeServings { pan: PanShape },
    Meat(MeatQuery),
    Doneness(DonenessQuery),
    AirFryerFood(AirFryerFoodQuery),
    CakePan { pan: PanShape },
}

impl CalculationRequest {
    /// The converter code this request is routed to.
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationRequest::AirFryer(_) => "air_fryer",
            CalculationRequest::Convection(_) => "convection",
            CalculationRequest::Microwave(_) => "microwave",
            CalculationRequest::Wattage(_) => "wattage",
            CalculationRequest::Temperature(_) => "temperature",
            CalculationRequest::Measure(_) => "measure",
            CalculationRequest::PanScale(_) => "pan_scale",
            CalculationRequest::CakeServings { .. } => "cake_servings",
            CalculationRequest::Meat(_) => "meat",
            CalculationRequest::Doneness(_) => "doneness",
            CalculationRequest::AirFryerFood(_) => "air_fryer_food",
            CalculationRequest::CakePan { .. } => "cake_pan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum CalculationResponse {
    AirFryer(ConvertedSetting),
    Convection(ConvertedSetting),
    Microwave(ConvertedSetting),
    Wattage(WattageAdjustment),
    Temperature(CalculationResult),
    Measure(Measurement),
    PanScale(PanScale),
    CakeServings(CakeServings),
    Meat(MeatEstimate),
    Doneness(DonenessTarget),
    AirFryerFood(AirFryerFoodSetting),
    CakePan(CakePanEntry),
}

/// Owns the loaded configuration and the converters built from it. The
/// reference tables are process-wide statics and are only borrowed.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    air_fryer: RatioConverter,
    convection: RatioConverter,
    microwave: RatioConverter,
    wattage: WattageConverter,
    temperature: TemperatureConverter,
    cake_servings: CakeServingsConverter,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let rounding = config.rounding.clone();
        Self {
            air_fryer: RatioConverter::new("air_fryer", config.rules.air_fryer(), rounding.clone()),
            convection: RatioConverter::new("convection", config.rules.convection(), rounding.clone()),
            microwave: RatioConverter::new("microwave", config.rules.microwave(), rounding.clone()),
            wattage: WattageConverter::new(rounding.clone()),
            temperature: TemperatureConverter::new(rounding),
            cake_servings: CakeServingsConverter::new(config.slices),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, request: &CalculationRequest) -> Result<CalculationResponse> {
        let started = Instant::now();
        let outcome = self.dispatch(request);
        debug!(
            kind = request.kind(),
            ok = outcome.is_ok(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "evaluated calculation"
        );
        outcome
    }

    fn dispatch(&self, request: &CalculationRequest) -> Result<CalculationResponse> {
        use CalculationRequest as Req;
        use CalculationResponse as Res;

        let response = match request {
            Req::AirFryer(query) => Res::AirFryer(self.air_fryer.convert(query)?),
            Req::Convection(query) => Res::Convection(self.convection.convert(query)?),
            Req::Microwave(query) => Res::Microwave(self.microwave.convert(query)?),
            Req::Wattage(query) => Res::Wattage(self.wattage.convert(query)?),
            Req::Temperature(query) => Res::Temperature(self.temperature.convert(query)?),
            Req::Measure(query) => Res::Measure(MeasureConverter.convert(query)?),
            Req::PanScale(query) => Res::PanScale(PanScaleConverter.convert(query)?),
            Req::CakeServings { pan } => Res::CakeServings(self.cake_servings.convert(pan)?),
            Req::Meat(query) => Res::Meat(MeatConverter.convert(query)?),
            Req::Doneness(query) => Res::Doneness(DonenessConverter.convert(query)?),
            Req::AirFryerFood(query) => Res::AirFryerFood(AirFryerFoodConverter.convert(query)?),
            Req::CakePan { pan } => Res::CakePan(CakePanConverter.convert(pan)?),
        };
        Ok(response)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}
