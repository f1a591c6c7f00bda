//! Kitchen measures: US cups and spoons, millilitres, fluid ounces, grams,
//! ounces and pounds. Crossing between volume and weight goes through an
//! ingredient density stored as grams per US cup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{ensure_non_negative, CalcError, Result};
use crate::lookup::{normalize_key, suggest};
use crate::quantity::{CalculationResult, Unit};
use crate::rounding::round_to_places;

pub const ML_PER_CUP: f64 = 236.588;
pub const CUPS_PER_TBSP: f64 = 1.0 / 16.0;
pub const CUPS_PER_TSP: f64 = 1.0 / 48.0;
pub const CUPS_PER_FL_OZ: f64 = 1.0 / 8.0;
pub const GRAMS_PER_OUNCE: f64 = 28.349_523_125;
pub const GRAMS_PER_POUND: f64 = 453.592_37;

pub const TABLE_NAME: &str = "ingredient_density";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureUnit {
    Cup,
    Tablespoon,
    Teaspoon,
    Milliliter,
    FluidOunce,
    Gram,
    Ounce,
    Pound,
}

enum Dimension {
    /// Size in cups.
    Volume(f64),
    /// Size in grams.
    Weight(f64),
}

impl MeasureUnit {
    fn dimension(&self) -> Dimension {
        match self {
            MeasureUnit::Cup => Dimension::Volume(1.0),
            MeasureUnit::Tablespoon => Dimension::Volume(CUPS_PER_TBSP),
            MeasureUnit::Teaspoon => Dimension::Volume(CUPS_PER_TSP),
            MeasureUnit::Milliliter => Dimension::Volume(1.0 / ML_PER_CUP),
            MeasureUnit::FluidOunce => Dimension::Volume(CUPS_PER_FL_OZ),
            MeasureUnit::Gram => Dimension::Weight(1.0),
            MeasureUnit::Ounce => Dimension::Weight(GRAMS_PER_OUNCE),
            MeasureUnit::Pound => Dimension::Weight(GRAMS_PER_POUND),
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            MeasureUnit::Cup => Unit::Cups,
            MeasureUnit::Tablespoon => Unit::Tablespoons,
            MeasureUnit::Teaspoon => Unit::Teaspoons,
            MeasureUnit::Milliliter => Unit::Milliliters,
            MeasureUnit::FluidOunce => Unit::FluidOunces,
            MeasureUnit::Gram => Unit::Grams,
            MeasureUnit::Ounce => Unit::Ounces,
            MeasureUnit::Pound => Unit::Pounds,
        }
    }

    /// Whole grams and millilitres read naturally; everything else keeps two places.
    fn display_places(&self) -> i32 {
        match self {
            MeasureUnit::Gram | MeasureUnit::Milliliter => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit().symbol())
    }
}

impl FromStr for MeasureUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match normalize_key(s).as_str() {
            "cup" | "cups" | "c" => MeasureUnit::Cup,
            "tablespoon" | "tablespoons" | "tbsp" | "tbs" => MeasureUnit::Tablespoon,
            "teaspoon" | "teaspoons" | "tsp" => MeasureUnit::Teaspoon,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                MeasureUnit::Milliliter
            }
            "fl_oz" | "floz" | "fluid_ounce" | "fluid_ounces" => MeasureUnit::FluidOunce,
            "g" | "gram" | "grams" => MeasureUnit::Gram,
            "oz" | "ounce" | "ounces" => MeasureUnit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => MeasureUnit::Pound,
            other => {
                return Err(CalcError::validation(
                    "unit",
                    format!("unknown measuring unit '{other}'"),
                ))
            }
        };
        Ok(unit)
    }
}

const DENSITIES: &[(&str, f64)] = &[
    ("all_purpose_flour", 125.0),
    ("bread_flour", 127.0),
    ("cake_flour", 114.0),
    ("whole_wheat_flour", 120.0),
    ("almond_flour", 96.0),
    ("granulated_sugar", 200.0),
    ("brown_sugar", 220.0),
    ("powdered_sugar", 120.0),
    ("butter", 227.0),
    ("water", 236.6),
    ("milk", 245.0),
    ("heavy_cream", 238.0),
    ("yogurt", 245.0),
    ("vegetable_oil", 218.0),
    ("honey", 340.0),
    ("maple_syrup", 315.0),
    ("peanut_butter", 258.0),
    ("rolled_oats", 90.0),
    ("cocoa_powder", 85.0),
    ("white_rice", 185.0),
    ("table_salt", 288.0),
    ("cornstarch", 128.0),
    ("chocolate_chips", 170.0),
];

const ALIASES: &[(&str, &str)] = &[
    ("flour", "all_purpose_flour"),
    ("ap_flour", "all_purpose_flour"),
    ("plain_flour", "all_purpose_flour"),
    ("sugar", "granulated_sugar"),
    ("white_sugar", "granulated_sugar"),
    ("caster_sugar", "granulated_sugar"),
    ("icing_sugar", "powdered_sugar"),
    ("confectioners_sugar", "powdered_sugar"),
    ("oil", "vegetable_oil"),
    ("oats", "rolled_oats"),
    ("rice", "white_rice"),
    ("salt", "table_salt"),
    ("cream", "heavy_cream"),
    ("cocoa", "cocoa_powder"),
    ("corn_starch", "cornstarch"),
];

struct DensityData {
    grams_per_cup: HashMap<&'static str, f64>,
    aliases: HashMap<&'static str, &'static str>,
}

static DENSITY_DATA: Lazy<DensityData> = Lazy::new(|| DensityData {
    grams_per_cup: DENSITIES.iter().copied().collect(),
    aliases: ALIASES.iter().copied().collect(),
});

/// Canonical ingredient name and its grams per cup. Tries the exact name,
/// then aliases, then the name with a trailing `s` removed or added.
pub fn find_density(ingredient: &str) -> Result<(&'static str, f64)> {
    let data = &*DENSITY_DATA;
    let wanted = normalize_key(ingredient);

    let lookup = |name: &str| -> Option<(&'static str, f64)> {
        if let Some((&canonical, &density)) = data.grams_per_cup.get_key_value(name) {
            return Some((canonical, density));
        }
        let canonical = *data.aliases.get(name)?;
        data.grams_per_cup
            .get(canonical)
            .map(|&density| (canonical, density))
    };

    let singular = wanted.strip_suffix('s').map(str::to_string);
    let plural = format!("{wanted}s");
    std::iter::once(Some(wanted.clone()))
        .chain([singular, Some(plural)])
        .flatten()
        .find_map(|name| lookup(&name))
        .ok_or_else(|| {
            let known = data
                .grams_per_cup
                .keys()
                .chain(data.aliases.keys())
                .map(|name| name.to_string());
            CalcError::not_found(TABLE_NAME, wanted.clone(), suggest(&wanted, known))
        })
}

pub fn ingredient_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DENSITIES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureQuery {
    pub amount: f64,
    pub from: MeasureUnit,
    pub to: MeasureUnit,
    #[serde(default)]
    pub ingredient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub result: CalculationResult,
    pub ingredient: Option<&'static str>,
    pub grams_per_cup: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeasureConverter;

impl MeasureConverter {
    fn density_for(&self, query: &MeasureQuery) -> Result<(&'static str, f64)> {
        let ingredient = query.ingredient.as_deref().ok_or_else(|| {
            CalcError::validation(
                "ingredient",
                format!("converting {} to {} needs an ingredient", query.from, query.to),
            )
        })?;
        find_density(ingredient)
    }
}

impl Converter for MeasureConverter {
    type Input = MeasureQuery;
    type Output = Measurement;

    fn code(&self) -> &'static str {
        "measure"
    }

    fn convert(&self, query: &MeasureQuery) -> Result<Measurement> {
        let amount = ensure_non_negative("amount", query.amount)?;

        let (value, density) = match (query.from.dimension(), query.to.dimension()) {
            (Dimension::Volume(from), Dimension::Volume(to)) => (amount * from / to, None),
            (Dimension::Weight(from), Dimension::Weight(to)) => (amount * from / to, None),
            (Dimension::Volume(from_cups), Dimension::Weight(to_grams)) => {
                let density = self.density_for(query)?;
                (amount * from_cups * density.1 / to_grams, Some(density))
            }
            (Dimension::Weight(from_grams), Dimension::Volume(to_cups)) => {
                let density = self.density_for(query)?;
                (amount * from_grams / density.1 / to_cups, Some(density))
            }
        };

        let display = round_to_places(value, query.to.display_places());
        Ok(Measurement {
            result: CalculationResult::rounded(value, display, query.to.unit()),
            ingredient: density.map(|(name, _)| name),
            grams_per_cup: density.map(|(_, grams)| grams),
        })
    }
}
