// crates/kitchencalc/src/commands/calculate.rs

use std::fmt::Display;

use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use kitchencalc_core::lookup::air_fryer::{AirFryerFoodQuery, FoodForm};
use kitchencalc_core::lookup::doneness::{Doneness, DonenessQuery};
use kitchencalc_core::lookup::meat::{MeatQuery, Protein, TimeBasis};
use kitchencalc_core::measure::{MeasureQuery, MeasureUnit};
use kitchencalc_core::pan::{PanScaleQuery, PanShape, ServingSource};
use kitchencalc_core::ratio::{Direction, RatioQuery};
use kitchencalc_core::temperature::{TemperatureDisplay, TemperatureQuery, TemperatureScale};
use kitchencalc_core::wattage::WattageQuery;
use kitchencalc_core::{
    CalcError, CalculationRequest, CalculationResponse, Engine, Temperature, TemperatureUnit,
};
use serde_json::json;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DegreesArg {
    F,
    C,
}

impl From<DegreesArg> for TemperatureUnit {
    fn from(arg: DegreesArg) -> Self {
        match arg {
            DegreesArg::F => TemperatureUnit::Fahrenheit,
            DegreesArg::C => TemperatureUnit::Celsius,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ScaleArg {
    F,
    C,
    #[value(alias = "gas-mark")]
    Gas,
}

impl From<ScaleArg> for TemperatureScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::F => TemperatureScale::Fahrenheit,
            ScaleArg::C => TemperatureScale::Celsius,
            ScaleArg::Gas => TemperatureScale::GasMark,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormArg {
    Fresh,
    Frozen,
}

impl From<FormArg> for FoodForm {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::Fresh => FoodForm::Fresh,
            FormArg::Frozen => FoodForm::Frozen,
        }
    }
}

fn temperature_display(practical: bool) -> TemperatureDisplay {
    if practical {
        TemperatureDisplay::Practical
    } else {
        TemperatureDisplay::Whole
    }
}

fn table_unit(celsius: bool) -> TemperatureUnit {
    if celsius {
        TemperatureUnit::Celsius
    } else {
        TemperatureUnit::Fahrenheit
    }
}

/// `m:ss` or plain seconds.
fn parse_clock(raw: &str) -> Result<f64, String> {
    let number = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("'{raw}' is not a time: {err}"))
    };
    match raw.split_once(':') {
        Some((minutes, seconds)) => Ok(number(minutes)? * 60.0 + number(seconds)?),
        None => number(raw),
    }
}

#[derive(Args, Debug)]
pub struct RatioArgs {
    /// Temperature to convert (not needed for the microwave)
    #[arg(long = "temp", allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// Scale of --temp
    #[arg(long, value_enum, default_value_t = DegreesArg::F)]
    unit: DegreesArg,
    /// Cooking time in minutes
    #[arg(long)]
    minutes: f64,
    /// Convert from the appliance back to a conventional oven
    #[arg(long)]
    reverse: bool,
    /// Round the temperature to the nearest practical dial setting
    #[arg(long)]
    practical: bool,
}

impl RatioArgs {
    pub fn query(&self) -> RatioQuery {
        RatioQuery {
            temperature: self.temperature.map(|value| Temperature {
                value,
                unit: self.unit.into(),
            }),
            time_minutes: self.minutes,
            direction: if self.reverse {
                Direction::Reverse
            } else {
                Direction::Forward
            },
            display: temperature_display(self.practical),
        }
    }
}

#[derive(Args, Debug)]
pub struct WattageArgs {
    /// Package time, as m:ss or seconds
    #[arg(long, value_parser = parse_clock)]
    time: f64,
    /// Wattage the package time was written for
    #[arg(long)]
    from: f64,
    /// Wattage of your microwave
    #[arg(long)]
    to: f64,
}

impl WattageArgs {
    pub fn query(&self) -> WattageQuery {
        WattageQuery {
            time_seconds: self.time,
            from_watts: self.from,
            to_watts: self.to,
        }
    }
}

#[derive(Args, Debug)]
pub struct TempArgs {
    #[arg(allow_negative_numbers = true)]
    value: f64,
    #[arg(long, value_enum)]
    from: ScaleArg,
    #[arg(long, value_enum)]
    to: ScaleArg,
    /// Round to the nearest practical dial setting
    #[arg(long)]
    practical: bool,
}

impl TempArgs {
    pub fn query(&self) -> TemperatureQuery {
        TemperatureQuery {
            value: self.value,
            from: self.from.into(),
            to: self.to.into(),
            display: temperature_display(self.practical),
        }
    }
}

#[derive(Args, Debug)]
pub struct GasMarkArgs {
    /// Oven temperature in °F (or °C with --celsius)
    #[arg(allow_negative_numbers = true)]
    value: f64,
    #[arg(long)]
    celsius: bool,
}

impl GasMarkArgs {
    pub fn query(&self) -> TemperatureQuery {
        TemperatureQuery {
            value: self.value,
            from: if self.celsius {
                TemperatureScale::Celsius
            } else {
                TemperatureScale::Fahrenheit
            },
            to: TemperatureScale::GasMark,
            display: TemperatureDisplay::Whole,
        }
    }
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    amount: f64,
    /// cup, tbsp, tsp, ml, "fl oz", g, oz or lb
    from: MeasureUnit,
    to: MeasureUnit,
    /// Needed when converting between volume and weight
    #[arg(long)]
    ingredient: Option<String>,
}

impl MeasureArgs {
    pub fn query(&self) -> MeasureQuery {
        MeasureQuery {
            amount: self.amount,
            from: self.from,
            to: self.to,
            ingredient: self.ingredient.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct MeatArgs {
    protein: Protein,
    cut: String,
    /// Weight in pounds
    #[arg(long)]
    weight: f64,
    #[arg(long, conflicts_with = "boneless")]
    bone_in: bool,
    #[arg(long)]
    boneless: bool,
    #[arg(long)]
    celsius: bool,
}

impl MeatArgs {
    pub fn query(&self) -> MeatQuery {
        let bone_in = match (self.bone_in, self.boneless) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        MeatQuery {
            protein: self.protein,
            cut: self.cut.clone(),
            bone_in,
            weight_lb: self.weight,
            unit: table_unit(self.celsius),
        }
    }
}

#[derive(Args, Debug)]
pub struct DonenessArgs {
    protein: Protein,
    /// rare, medium-rare, medium, medium-well or well-done
    doneness: Doneness,
    #[arg(long)]
    celsius: bool,
}

impl DonenessArgs {
    pub fn query(&self) -> DonenessQuery {
        DonenessQuery {
            protein: self.protein,
            doneness: self.doneness,
            unit: table_unit(self.celsius),
        }
    }
}

#[derive(Args, Debug)]
pub struct AirFryerFoodArgs {
    food: String,
    #[arg(long, value_enum)]
    form: Option<FormArg>,
    #[arg(long)]
    celsius: bool,
}

impl AirFryerFoodArgs {
    pub fn query(&self) -> AirFryerFoodQuery {
        AirFryerFoodQuery {
            food: self.food.clone(),
            form: self.form.map(FoodForm::from),
            unit: table_unit(self.celsius),
        }
    }
}

#[derive(Args, Debug)]
pub struct CakeArgs {
    /// Pan size, e.g. "10in round", "8 square" or 9x13
    pan: PanShape,
}

#[derive(Args, Debug)]
pub struct PanScaleArgs {
    /// Pan the recipe was written for
    from: PanShape,
    /// Pan you want to use
    to: PanShape,
    #[arg(long, requires = "to_depth")]
    from_depth: Option<f64>,
    #[arg(long, requires = "from_depth")]
    to_depth: Option<f64>,
}

impl PanScaleArgs {
    pub fn query(&self) -> PanScaleQuery {
        PanScaleQuery {
            from: self.from,
            to: self.to,
            from_depth: self.from_depth,
            to_depth: self.to_depth,
        }
    }
}

fn evaluate(engine: &Engine, request: &CalculationRequest) -> Result<CalculationResponse> {
    engine.evaluate(request).map_err(|err| {
        let hints = err.suggestions();
        if hints.is_empty() {
            anyhow!(err)
        } else {
            anyhow!("{err} (did you mean: {})", hints.join(", "))
        }
    })
}

pub fn run(engine: &Engine, request: &CalculationRequest, as_json: bool) -> Result<()> {
    let response = evaluate(engine, request)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

/// Servings for any pan, plus the chart's bake settings when the pan is on it.
pub fn cake(engine: &Engine, args: &CakeArgs, as_json: bool) -> Result<()> {
    let servings = evaluate(engine, &CalculationRequest::CakeServings { pan: args.pan })?;
    let chart = match engine.evaluate(&CalculationRequest::CakePan { pan: args.pan }) {
        Ok(entry) => Some(entry),
        Err(CalcError::NotFound { .. }) => None,
        Err(err) => return Err(err.into()),
    };

    if as_json {
        let body = json!({ "servings": servings, "chart": chart });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_response(&servings);
        if let Some(chart) = &chart {
            print_response(chart);
        }
    }
    Ok(())
}

fn line(label: &str, value: impl Display) {
    println!("{label:<18}{value}");
}

fn print_response(response: &CalculationResponse) {
    match response {
        CalculationResponse::AirFryer(setting)
        | CalculationResponse::Convection(setting)
        | CalculationResponse::Microwave(setting) => {
            if let Some(temperature) = &setting.temperature {
                line("Temperature", temperature);
            }
            line(
                "Time",
                format!("{} (exact {:.2} min)", setting.time, setting.time.value),
            );
        }
        CalculationResponse::Wattage(adjusted) => {
            line(
                "Time",
                format!("{} ({:.1} s exact)", adjusted.clock(), adjusted.time.value),
            );
        }
        CalculationResponse::Temperature(result) => {
            line("Result", result);
            if result.rounding_applied {
                line("Exact", format!("{:.2}", result.value));
            }
        }
        CalculationResponse::Measure(measurement) => {
            line("Result", measurement.result);
            if let (Some(name), Some(grams)) = (measurement.ingredient, measurement.grams_per_cup) {
                line("Density", format!("{name}: {grams} g per cup"));
            }
        }
        CalculationResponse::PanScale(scale) => {
            line("From area", scale.from_area);
            line("To area", scale.to_area);
            let basis = if scale.depth_adjusted { "area and depth" } else { "area" };
            line("Multiply by", format!("{} ({basis})", scale.factor.display_value));
        }
        CalculationResponse::CakeServings(servings) => {
            line("Pan", servings.pan);
            line("Area", servings.area);
            line("Party servings", servings.party);
            line("Wedding servings", servings.wedding);
            match &servings.source {
                ServingSource::Chart => line("Source", "standard chart"),
                ServingSource::AreaScaled {
                    reference,
                    area_ratio,
                } => line("Source", format!("scaled from {reference} (x{area_ratio:.2})")),
            }
            line(
                "Slice estimate",
                format!(
                    "{} party / {} wedding (single layer)",
                    servings.party_slice_estimate, servings.wedding_slice_estimate
                ),
            );
        }
        CalculationResponse::Meat(estimate) => {
            line("Cut", &estimate.key);
            if estimate.bone_in_defaulted {
                line("", "bone style not given; using the cut's default");
            }
            line("Oven", estimate.oven_temperature);
            line("Time", format!("{} min", estimate.display_minutes));
            if let (TimeBasis::PerPound, Some(per_pound)) =
                (estimate.basis, estimate.minutes_per_pound)
            {
                let how = if estimate.interpolated { " (interpolated)" } else { "" };
                line(
                    "Per pound",
                    format!("{:.1}-{:.1} min{how}", per_pound.min, per_pound.max),
                );
            }
            if let Some(target) = estimate.target_internal {
                line("Target internal", target);
            }
            line("Rest", format!("{} min", estimate.rest_minutes));
            if let Some(notes) = estimate.notes {
                line("Notes", notes);
            }
        }
        CalculationResponse::Doneness(target) => {
            line("Pull at", target.pull);
            line("Final", target.final_temperature);
            if !target.food_safety_minimum {
                line("Note", "below the recommended safe minimum");
            }
        }
        CalculationResponse::AirFryerFood(setting) => {
            line("Food", &setting.key);
            line("Temperature", setting.temperature);
            line("Time", format!("{} min", setting.time_minutes));
            if let Some(notes) = setting.notes {
                line("Notes", notes);
            }
        }
        CalculationResponse::CakePan(entry) => {
            line("Batter per layer", format!("{} cups", entry.batter_cups));
            line(
                "Bake",
                format!("{} °F for {} min", entry.bake.temperature_f, entry.bake.time),
            );
        }
    }
}
