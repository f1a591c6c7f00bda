//! Pan geometry, recipe scaling between pans and cake serving counts.
//!
//! Serving counts come from the standard cake chart when the pan is on it.
//! Off-chart pans are scaled by area from the closest chart pan of the same
//! family (round, or square/rectangular). Every serving count is floored.
//! The slice estimate is the plain `area / slice area` figure for a single
//! layer, by default 4 sq in per party slice (2"x2") and 2 sq in per wedding
//! slice (1"x2").

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{ensure_positive, CalcError, Result};
use crate::lookup::cake_pan::{self, cake_pan_table, CakePanEntry};
use crate::quantity::{CalculationResult, Unit};
use crate::rounding::{floor_count, round_to_places};

pub const PARTY_SERVING_SQ_IN: f64 = 4.0;
pub const WEDDING_SERVING_SQ_IN: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PanShape {
    Round { diameter: f64 },
    Square { side: f64 },
    Rectangle { width: f64, length: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanFamily {
    Round,
    Rectangular,
}

impl PanShape {
    pub fn validate(&self) -> Result<()> {
        match *self {
            PanShape::Round { diameter } => {
                ensure_positive("diameter", diameter)?;
            }
            PanShape::Square { side } => {
                ensure_positive("side", side)?;
            }
            PanShape::Rectangle { width, length } => {
                ensure_positive("width", width)?;
                ensure_positive("length", length)?;
            }
        }
        Ok(())
    }

    pub fn area(&self) -> f64 {
        match *self {
            PanShape::Round { diameter } => {
                let radius = diameter / 2.0;
                PI * radius * radius
            }
            PanShape::Square { side } => side * side,
            PanShape::Rectangle { width, length } => width * length,
        }
    }

    /// Equal-sided rectangles become squares and rectangle sides are ordered,
    /// so `13x9` and `9x13` share a chart entry.
    pub fn canonical(&self) -> PanShape {
        match *self {
            PanShape::Rectangle { width, length } if width == length => {
                PanShape::Square { side: width }
            }
            PanShape::Rectangle { width, length } => PanShape::Rectangle {
                width: width.min(length),
                length: width.max(length),
            },
            other => other,
        }
    }

    pub fn label(&self) -> String {
        match self.canonical() {
            PanShape::Round { diameter } => format!("{diameter}in round"),
            PanShape::Square { side } => format!("{side}in square"),
            PanShape::Rectangle { width, length } => format!("{width}x{length}"),
        }
    }

    fn family(&self) -> PanFamily {
        match self {
            PanShape::Round { .. } => PanFamily::Round,
            PanShape::Square { .. } | PanShape::Rectangle { .. } => PanFamily::Rectangular,
        }
    }
}

impl fmt::Display for PanShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Accepts `9x13`, `10 round`, `10in round`, `10" round`, `8 square`.
impl FromStr for PanShape {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        let invalid = || CalcError::validation("pan", format!("cannot read pan size '{s}'"));
        let number = |part: &str| -> Result<f64> {
            part.trim()
                .trim_end_matches("inches")
                .trim_end_matches("inch")
                .trim_end_matches("in")
                .trim_end_matches('"')
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid())
        };

        let pan = if let Some(size) = text.strip_suffix("round") {
            PanShape::Round {
                diameter: number(size)?,
            }
        } else if let Some(size) = text.strip_suffix("square") {
            PanShape::Square { side: number(size)? }
        } else if let Some((width, length)) = text.split_once('x') {
            PanShape::Rectangle {
                width: number(width)?,
                length: number(length)?,
            }
            .canonical()
        } else {
            return Err(invalid());
        };
        pan.validate()?;
        Ok(pan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingStyle {
    Party,
    Wedding,
}

/// Slice footprints in square inches for a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliceSizes {
    pub party_sq_in: f64,
    pub wedding_sq_in: f64,
}

impl Default for SliceSizes {
    fn default() -> Self {
        Self {
            party_sq_in: PARTY_SERVING_SQ_IN,
            wedding_sq_in: WEDDING_SERVING_SQ_IN,
        }
    }
}

impl SliceSizes {
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [("party_sq_in", self.party_sq_in), ("wedding_sq_in", self.wedding_sq_in)] {
            if !size.is_finite() || size <= 0.0 {
                return Err(CalcError::Config(format!(
                    "slices.{name} must be a positive number, got {size}"
                )));
            }
        }
        Ok(())
    }

    pub fn slice_area(&self, style: ServingStyle) -> f64 {
        match style {
            ServingStyle::Party => self.party_sq_in,
            ServingStyle::Wedding => self.wedding_sq_in,
        }
    }

    pub fn estimate(&self, pan: &PanShape, style: ServingStyle) -> Result<u32> {
        pan.validate()?;
        Ok(floor_count(pan.area() / self.slice_area(style)))
    }
}

/// `floor(area / slice area)` with the standard slice sizes.
pub fn slice_estimate(pan: &PanShape, style: ServingStyle) -> Result<u32> {
    SliceSizes::default().estimate(pan, style)
}

fn area_result(pan: &PanShape) -> CalculationResult {
    let area = pan.area();
    CalculationResult::rounded(area, round_to_places(area, 1), Unit::SquareInches)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ServingSource {
    Chart,
    AreaScaled { reference: String, area_ratio: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CakeServings {
    pub pan: PanShape,
    pub area: CalculationResult,
    pub party: u32,
    pub wedding: u32,
    pub source: ServingSource,
    pub party_slice_estimate: u32,
    pub wedding_slice_estimate: u32,
}

fn nearest_chart_pan(pan: &PanShape) -> Option<&'static CakePanEntry> {
    let area = pan.area();
    cake_pan_table()
        .rows()
        .iter()
        .filter(|entry| entry.pan.family() == pan.family())
        .min_by(|a, b| {
            let da = (a.pan.area() - area).abs();
            let db = (b.pan.area() - area).abs();
            da.total_cmp(&db)
        })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CakeServingsConverter {
    slices: SliceSizes,
}

impl CakeServingsConverter {
    pub fn new(slices: SliceSizes) -> Self {
        Self { slices }
    }
}

impl Converter for CakeServingsConverter {
    type Input = PanShape;
    type Output = CakeServings;

    fn code(&self) -> &'static str {
        "cake_servings"
    }

    fn convert(&self, pan: &PanShape) -> Result<CakeServings> {
        pan.validate()?;
        let pan = pan.canonical();

        let (party, wedding, source) = match cake_pan_table().get(&pan.label()) {
            Ok(entry) => (entry.party_servings, entry.wedding_servings, ServingSource::Chart),
            Err(_) => {
                let reference = nearest_chart_pan(&pan).ok_or_else(|| {
                    CalcError::not_found(cake_pan::TABLE_NAME, pan.label(), Vec::new())
                })?;
                let ratio = pan.area() / reference.pan.area();
                (
                    floor_count(f64::from(reference.party_servings) * ratio),
                    floor_count(f64::from(reference.wedding_servings) * ratio),
                    ServingSource::AreaScaled {
                        reference: reference.pan.label(),
                        area_ratio: ratio,
                    },
                )
            }
        };

        Ok(CakeServings {
            pan,
            area: area_result(&pan),
            party,
            wedding,
            source,
            party_slice_estimate: self.slices.estimate(&pan, ServingStyle::Party)?,
            wedding_slice_estimate: self.slices.estimate(&pan, ServingStyle::Wedding)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanScaleQuery {
    pub from: PanShape,
    pub to: PanShape,
    #[serde(default)]
    pub from_depth: Option<f64>,
    #[serde(default)]
    pub to_depth: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanScale {
    pub from_area: CalculationResult,
    pub to_area: CalculationResult,
    pub factor: CalculationResult,
    pub depth_adjusted: bool,
}

/// Recipe multiplier to move a recipe from one pan to another.
pub fn scale_factor(from: &PanShape, to: &PanShape) -> Result<f64> {
    from.validate()?;
    to.validate()?;
    Ok(to.area() / from.area())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PanScaleConverter;

impl Converter for PanScaleConverter {
    type Input = PanScaleQuery;
    type Output = PanScale;

    fn code(&self) -> &'static str {
        "pan_scale"
    }

    fn convert(&self, query: &PanScaleQuery) -> Result<PanScale> {
        let area_ratio = scale_factor(&query.from, &query.to)?;
        let depth_ratio = match (query.from_depth, query.to_depth) {
            (None, None) => None,
            (Some(from), Some(to)) => {
                Some(ensure_positive("to_depth", to)? / ensure_positive("from_depth", from)?)
            }
            _ => {
                return Err(CalcError::validation(
                    "depth",
                    "give both pan depths or neither",
                ))
            }
        };
        let factor = area_ratio * depth_ratio.unwrap_or(1.0);

        Ok(PanScale {
            from_area: area_result(&query.from),
            to_area: area_result(&query.to),
            factor: CalculationResult::rounded(factor, round_to_places(factor, 2), Unit::Ratio),
            depth_adjusted: depth_ratio.is_some(),
        })
    }
}
