//! Internal temperature targets by protein and doneness. `pull_f` is when to
//! take the meat off the heat; `final_f` is where carryover cooking lands it
//! after resting.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{CalcError, Result};
use crate::lookup::meat::Protein;
use crate::lookup::{normalize_key, suggest, LookupTable};
use crate::quantity::{CalculationResult, TemperatureUnit};
use crate::temperature::table_temperature;

pub const TABLE_NAME: &str = "doneness";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Doneness {
    Rare,
    MediumRare,
    Medium,
    MediumWell,
    WellDone,
}

impl Doneness {
    pub const ALL: [Doneness; 5] = [
        Doneness::Rare,
        Doneness::MediumRare,
        Doneness::Medium,
        Doneness::MediumWell,
        Doneness::WellDone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Doneness::Rare => "rare",
            Doneness::MediumRare => "medium_rare",
            Doneness::Medium => "medium",
            Doneness::MediumWell => "medium_well",
            Doneness::WellDone => "well_done",
        }
    }
}

impl fmt::Display for Doneness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Doneness {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_key(s);
        Doneness::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| {
                CalcError::not_found(
                    "doneness_level",
                    wanted.clone(),
                    suggest(&wanted, Doneness::ALL.iter().map(|d| d.to_string())),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DonenessKey {
    pub protein: Protein,
    pub doneness: Doneness,
}

impl fmt::Display for DonenessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.protein, self.doneness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonenessEntry {
    pub key: DonenessKey,
    pub pull_f: f64,
    pub final_f: f64,
    pub food_safety_minimum: bool,
}

const ENTRIES: &[(Protein, Doneness, f64, f64)] = &[
    (Protein::Beef, Doneness::Rare, 120.0, 125.0),
    (Protein::Beef, Doneness::MediumRare, 130.0, 135.0),
    (Protein::Beef, Doneness::Medium, 140.0, 145.0),
    (Protein::Beef, Doneness::MediumWell, 150.0, 155.0),
    (Protein::Beef, Doneness::WellDone, 155.0, 160.0),
    (Protein::Lamb, Doneness::Rare, 120.0, 125.0),
    (Protein::Lamb, Doneness::MediumRare, 130.0, 135.0),
    (Protein::Lamb, Doneness::Medium, 140.0, 145.0),
    (Protein::Lamb, Doneness::MediumWell, 150.0, 155.0),
    (Protein::Lamb, Doneness::WellDone, 155.0, 160.0),
    (Protein::Pork, Doneness::Medium, 140.0, 145.0),
    (Protein::Pork, Doneness::WellDone, 155.0, 160.0),
    (Protein::Ham, Doneness::WellDone, 135.0, 140.0),
    (Protein::Chicken, Doneness::WellDone, 165.0, 170.0),
    (Protein::Turkey, Doneness::WellDone, 165.0, 170.0),
];

// Lowest final temperature each protein may be served at.
fn safe_minimum_f(protein: Protein) -> f64 {
    match protein {
        Protein::Beef | Protein::Lamb | Protein::Pork => 145.0,
        Protein::Ham => 140.0,
        Protein::Chicken | Protein::Turkey => 165.0,
    }
}

static DONENESS_TABLE: Lazy<LookupTable<DonenessKey, DonenessEntry>> = Lazy::new(|| {
    let rows = ENTRIES
        .iter()
        .map(|&(protein, doneness, pull_f, final_f)| DonenessEntry {
            key: DonenessKey { protein, doneness },
            pull_f,
            final_f,
            food_safety_minimum: final_f >= safe_minimum_f(protein),
        })
        .collect();
    LookupTable::new(TABLE_NAME, rows, |entry| entry.key)
        .expect("built-in doneness table should have unique keys")
});

pub fn doneness_table() -> &'static LookupTable<DonenessKey, DonenessEntry> {
    &DONENESS_TABLE
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonenessQuery {
    pub protein: Protein,
    pub doneness: Doneness,
    #[serde(default)]
    pub unit: TemperatureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonenessTarget {
    pub key: DonenessKey,
    pub pull: CalculationResult,
    pub final_temperature: CalculationResult,
    pub carryover: f64,
    pub food_safety_minimum: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DonenessConverter;

impl Converter for DonenessConverter {
    type Input = DonenessQuery;
    type Output = DonenessTarget;

    fn code(&self) -> &'static str {
        "doneness"
    }

    fn convert(&self, query: &DonenessQuery) -> Result<DonenessTarget> {
        let key = DonenessKey {
            protein: query.protein,
            doneness: query.doneness,
        };
        let entry = doneness_table().get(&key).map_err(|_| {
            // Misses are nearly always a level the protein is not served at,
            // so hint with that protein's levels rather than the whole table.
            let levels = doneness_table()
                .rows()
                .iter()
                .filter(|row| row.key.protein == query.protein)
                .map(|row| row.key.to_string());
            CalcError::not_found(TABLE_NAME, key.to_string(), suggest(&key.to_string(), levels))
        })?;

        let pull = table_temperature(entry.pull_f, query.unit);
        let final_temperature = table_temperature(entry.final_f, query.unit);
        Ok(DonenessTarget {
            key,
            pull,
            final_temperature,
            carryover: final_temperature.value - pull.value,
            food_safety_minimum: entry.food_safety_minimum,
        })
    }
}
