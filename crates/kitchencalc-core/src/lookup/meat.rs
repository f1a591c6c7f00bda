//! Oven roasting chart keyed by protein, cut, bone style and weight.
//!
//! Weight brackets are half-open `[lower, upper)` in pounds, so a 4.0 lb roast
//! belongs to the `[4, 6)` row. Cuts whose chart is quoted in minutes per pound
//! interpolate between bracket midpoints; cuts quoted as a total time per
//! weight class (whole birds, tenderloins) return the bracket's time as-is.
//!
//! When the caller leaves the bone style unset, the cut's documented default
//! style is used and `bone_in_defaulted` is set on the estimate.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{ensure_positive, CalcError, Result};
use crate::lookup::{
    interpolate, normalize_key, select_bracket, suggest, validate_brackets, Bracket, LookupEntry,
    LookupTable,
};
use crate::quantity::{CalculationResult, TemperatureUnit, TimeRange};
use crate::rounding::round_half_up;
use crate::temperature::table_temperature;

pub const TABLE_NAME: &str = "meat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protein {
    Beef,
    Pork,
    Lamb,
    Ham,
    Chicken,
    Turkey,
}

impl Protein {
    pub const ALL: [Protein; 6] = [
        Protein::Beef,
        Protein::Pork,
        Protein::Lamb,
        Protein::Ham,
        Protein::Chicken,
        Protein::Turkey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protein::Beef => "beef",
            Protein::Pork => "pork",
            Protein::Lamb => "lamb",
            Protein::Ham => "ham",
            Protein::Chicken => "chicken",
            Protein::Turkey => "turkey",
        }
    }
}

impl fmt::Display for Protein {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protein {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_key(s);
        Protein::ALL
            .into_iter()
            .find(|protein| protein.as_str() == wanted)
            .ok_or_else(|| {
                CalcError::not_found(
                    "protein",
                    wanted.clone(),
                    suggest(&wanted, Protein::ALL.iter().map(|p| p.to_string())),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBasis {
    /// Row times are minutes per pound.
    PerPound,
    /// Row times are total minutes for the whole weight class.
    PerBracket,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CutKey {
    pub protein: Protein,
    pub cut: String,
    pub bone_in: bool,
}

impl fmt::Display for CutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bone = if self.bone_in { "bone_in" } else { "boneless" };
        write!(f, "{}/{}/{}", self.protein, self.cut, bone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightKey {
    pub cut: CutKey,
    pub weight_lb: Bracket,
}

#[derive(Debug, Clone, Serialize)]
pub struct CutProfile {
    pub key: CutKey,
    pub basis: TimeBasis,
    pub rest_minutes: f64,
    pub default_style: bool,
    pub rows: Vec<LookupEntry<WeightKey>>,
}

impl CutProfile {
    fn brackets(&self) -> Vec<Bracket> {
        self.rows.iter().map(|row| row.key.weight_lb).collect()
    }

    fn interpolation_rows(&self) -> Vec<(Bracket, TimeRange)> {
        self.rows
            .iter()
            .map(|row| (row.key.weight_lb, row.time))
            .collect()
    }
}

struct CutDef {
    protein: Protein,
    cut: &'static str,
    bone_in: bool,
    default_style: bool,
    oven_f: f64,
    target_f: f64,
    rest_minutes: f64,
    basis: TimeBasis,
    notes: Option<&'static str>,
    // (lower, upper, min minutes, max minutes); upper None is the open top row.
    rows: &'static [(f64, Option<f64>, f64, f64)],
}

const CUTS: &[CutDef] = &[
    CutDef {
        protein: Protein::Beef,
        cut: "rib_roast",
        bone_in: true,
        default_style: true,
        oven_f: 325.0,
        target_f: 135.0,
        rest_minutes: 20.0,
        basis: TimeBasis::PerPound,
        notes: Some("medium-rare; pull 5-10°F early for carryover"),
        rows: &[
            (0.0, Some(4.0), 26.0, 28.0),
            (4.0, Some(6.0), 23.0, 25.0),
            (6.0, Some(8.0), 21.0, 23.0),
            (8.0, None, 19.0, 21.0),
        ],
    },
    CutDef {
        protein: Protein::Beef,
        cut: "rib_roast",
        bone_in: false,
        default_style: false,
        oven_f: 325.0,
        target_f: 135.0,
        rest_minutes: 20.0,
        basis: TimeBasis::PerPound,
        notes: Some("medium-rare; pull 5-10°F early for carryover"),
        rows: &[
            (0.0, Some(4.0), 28.0, 30.0),
            (4.0, Some(6.0), 25.0, 27.0),
            (6.0, None, 22.0, 24.0),
        ],
    },
    CutDef {
        protein: Protein::Beef,
        cut: "tenderloin",
        bone_in: false,
        default_style: true,
        oven_f: 425.0,
        target_f: 135.0,
        rest_minutes: 10.0,
        basis: TimeBasis::PerBracket,
        notes: Some("sear first for a crust"),
        rows: &[
            (0.0, Some(3.0), 25.0, 30.0),
            (3.0, Some(5.0), 35.0, 45.0),
            (5.0, None, 45.0, 60.0),
        ],
    },
    CutDef {
        protein: Protein::Beef,
        cut: "brisket",
        bone_in: false,
        default_style: true,
        oven_f: 275.0,
        target_f: 195.0,
        rest_minutes: 60.0,
        basis: TimeBasis::PerPound,
        notes: Some("cook to probe-tender rather than a fixed temperature"),
        rows: &[(0.0, Some(6.0), 60.0, 75.0), (6.0, None, 55.0, 65.0)],
    },
    CutDef {
        protein: Protein::Pork,
        cut: "loin_roast",
        bone_in: true,
        default_style: true,
        oven_f: 350.0,
        target_f: 145.0,
        rest_minutes: 3.0,
        basis: TimeBasis::PerPound,
        notes: None,
        rows: &[
            (0.0, Some(3.0), 25.0, 30.0),
            (3.0, Some(5.0), 20.0, 25.0),
            (5.0, None, 20.0, 22.0),
        ],
    },
    CutDef {
        protein: Protein::Pork,
        cut: "loin_roast",
        bone_in: false,
        default_style: false,
        oven_f: 350.0,
        target_f: 145.0,
        rest_minutes: 3.0,
        basis: TimeBasis::PerPound,
        notes: None,
        rows: &[(0.0, Some(3.0), 25.0, 30.0), (3.0, None, 20.0, 25.0)],
    },
    CutDef {
        protein: Protein::Pork,
        cut: "tenderloin",
        bone_in: false,
        default_style: true,
        oven_f: 425.0,
        target_f: 145.0,
        rest_minutes: 3.0,
        basis: TimeBasis::PerBracket,
        notes: None,
        rows: &[(0.0, Some(1.5), 20.0, 27.0), (1.5, None, 25.0, 35.0)],
    },
    CutDef {
        protein: Protein::Pork,
        cut: "shoulder",
        bone_in: true,
        default_style: true,
        oven_f: 300.0,
        target_f: 195.0,
        rest_minutes: 30.0,
        basis: TimeBasis::PerPound,
        notes: Some("for pulling; collagen renders above 190°F"),
        rows: &[(0.0, Some(6.0), 50.0, 60.0), (6.0, None, 45.0, 55.0)],
    },
    CutDef {
        protein: Protein::Lamb,
        cut: "leg",
        bone_in: true,
        default_style: true,
        oven_f: 325.0,
        target_f: 145.0,
        rest_minutes: 15.0,
        basis: TimeBasis::PerPound,
        notes: None,
        rows: &[(0.0, Some(7.0), 20.0, 25.0), (7.0, None, 15.0, 20.0)],
    },
    CutDef {
        protein: Protein::Lamb,
        cut: "leg",
        bone_in: false,
        default_style: false,
        oven_f: 325.0,
        target_f: 145.0,
        rest_minutes: 15.0,
        basis: TimeBasis::PerPound,
        notes: None,
        rows: &[(0.0, Some(5.0), 25.0, 30.0), (5.0, None, 20.0, 25.0)],
    },
    CutDef {
        protein: Protein::Ham,
        cut: "fully_cooked",
        bone_in: true,
        default_style: true,
        oven_f: 325.0,
        target_f: 140.0,
        rest_minutes: 10.0,
        basis: TimeBasis::PerPound,
        notes: Some("reheating only"),
        rows: &[(0.0, Some(8.0), 18.0, 24.0), (8.0, None, 15.0, 18.0)],
    },
    CutDef {
        protein: Protein::Ham,
        cut: "fully_cooked",
        bone_in: false,
        default_style: false,
        oven_f: 325.0,
        target_f: 140.0,
        rest_minutes: 10.0,
        basis: TimeBasis::PerPound,
        notes: Some("reheating only"),
        rows: &[(0.0, None, 10.0, 15.0)],
    },
    CutDef {
        protein: Protein::Chicken,
        cut: "whole",
        bone_in: true,
        default_style: true,
        oven_f: 350.0,
        target_f: 165.0,
        rest_minutes: 15.0,
        basis: TimeBasis::PerBracket,
        notes: Some("unstuffed; check the thickest part of the thigh"),
        rows: &[
            (0.0, Some(3.0), 60.0, 75.0),
            (3.0, Some(5.0), 75.0, 90.0),
            (5.0, None, 120.0, 135.0),
        ],
    },
    CutDef {
        protein: Protein::Turkey,
        cut: "whole",
        bone_in: true,
        default_style: true,
        oven_f: 325.0,
        target_f: 165.0,
        rest_minutes: 30.0,
        basis: TimeBasis::PerBracket,
        notes: Some("unstuffed; add 15-30 minutes when stuffed"),
        rows: &[
            (0.0, Some(12.0), 165.0, 180.0),
            (12.0, Some(14.0), 180.0, 225.0),
            (14.0, Some(18.0), 225.0, 255.0),
            (18.0, Some(20.0), 255.0, 270.0),
            (20.0, None, 270.0, 300.0),
        ],
    },
    CutDef {
        protein: Protein::Turkey,
        cut: "breast",
        bone_in: true,
        default_style: true,
        oven_f: 325.0,
        target_f: 165.0,
        rest_minutes: 15.0,
        basis: TimeBasis::PerPound,
        notes: None,
        rows: &[(0.0, Some(6.0), 20.0, 25.0), (6.0, None, 18.0, 22.0)],
    },
    CutDef {
        protein: Protein::Turkey,
        cut: "breast",
        bone_in: false,
        default_style: false,
        oven_f: 325.0,
        target_f: 165.0,
        rest_minutes: 10.0,
        basis: TimeBasis::PerPound,
        notes: None,
        rows: &[(0.0, None, 20.0, 22.0)],
    },
];

#[derive(Debug)]
pub struct MeatTable {
    profiles: LookupTable<CutKey, CutProfile>,
    default_style: HashMap<(Protein, String), bool>,
}

impl MeatTable {
    fn build(defs: &[CutDef]) -> Result<Self> {
        let mut profiles = Vec::with_capacity(defs.len());
        let mut default_style = HashMap::new();

        for def in defs {
            let key = CutKey {
                protein: def.protein,
                cut: def.cut.to_string(),
                bone_in: def.bone_in,
            };
            let mut rows = Vec::with_capacity(def.rows.len());
            for &(lower, upper, min, max) in def.rows {
                rows.push(LookupEntry {
                    key: WeightKey {
                        cut: key.clone(),
                        weight_lb: Bracket { lower, upper },
                    },
                    temperature_f: def.oven_f,
                    time: TimeRange::new(min, max)?,
                    target_internal_f: Some(def.target_f),
                    notes: def.notes,
                });
            }
            let profile = CutProfile {
                key,
                basis: def.basis,
                rest_minutes: def.rest_minutes,
                default_style: def.default_style,
                rows,
            };
            validate_brackets(&profile.key.to_string(), &profile.brackets())?;

            if def.default_style {
                let slot = (def.protein, def.cut.to_string());
                if default_style.insert(slot, def.bone_in).is_some() {
                    return Err(CalcError::Config(format!(
                        "{TABLE_NAME}: {}/{} has more than one default bone style",
                        def.protein, def.cut
                    )));
                }
            }
            profiles.push(profile);
        }

        for profile in &profiles {
            let slot = (profile.key.protein, profile.key.cut.clone());
            if !default_style.contains_key(&slot) {
                return Err(CalcError::Config(format!(
                    "{TABLE_NAME}: {}/{} has no default bone style",
                    slot.0, slot.1
                )));
            }
        }

        Ok(Self {
            profiles: LookupTable::new(TABLE_NAME, profiles, |p| p.key.clone())?,
            default_style,
        })
    }

    pub fn profiles(&self) -> &[CutProfile] {
        self.profiles.rows()
    }

    pub fn cuts_for(&self, protein: Protein) -> Vec<String> {
        let mut cuts: Vec<String> = self
            .default_style
            .keys()
            .filter(|(p, _)| *p == protein)
            .map(|(_, cut)| cut.clone())
            .collect();
        cuts.sort();
        cuts
    }

    /// Resolves the profile for a query, applying the documented bone-style
    /// default when `bone_in` is unset. Returns the profile and whether the
    /// default was applied.
    pub fn resolve(
        &self,
        protein: Protein,
        cut: &str,
        bone_in: Option<bool>,
    ) -> Result<(&CutProfile, bool)> {
        let cut = normalize_key(cut);
        let (bone_in, defaulted) = match bone_in {
            Some(flag) => (flag, false),
            None => match self.default_style.get(&(protein, cut.clone())) {
                Some(&flag) => (flag, true),
                None => {
                    return Err(CalcError::not_found(
                        TABLE_NAME,
                        format!("{protein}/{cut}"),
                        suggest(&cut, self.cuts_for(protein)),
                    ))
                }
            },
        };
        let key = CutKey {
            protein,
            cut,
            bone_in,
        };
        Ok((self.profiles.get(&key)?, defaulted))
    }
}

static MEAT_TABLE: Lazy<MeatTable> =
    Lazy::new(|| MeatTable::build(CUTS).expect("built-in meat table should be consistent"));

pub fn meat_table() -> &'static MeatTable {
    &MEAT_TABLE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeatQuery {
    pub protein: Protein,
    pub cut: String,
    #[serde(default)]
    pub bone_in: Option<bool>,
    pub weight_lb: f64,
    #[serde(default)]
    pub unit: TemperatureUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeatEstimate {
    pub key: CutKey,
    pub bone_in_defaulted: bool,
    pub weight_lb: f64,
    pub bracket: Bracket,
    pub basis: TimeBasis,
    pub oven_temperature: CalculationResult,
    pub target_internal: Option<CalculationResult>,
    pub minutes_per_pound: Option<TimeRange>,
    pub interpolated: bool,
    pub total_minutes: TimeRange,
    pub display_minutes: TimeRange,
    pub rest_minutes: f64,
    pub notes: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeatConverter;

impl Converter for MeatConverter {
    type Input = MeatQuery;
    type Output = MeatEstimate;

    fn code(&self) -> &'static str {
        "meat"
    }

    fn convert(&self, query: &MeatQuery) -> Result<MeatEstimate> {
        let weight = ensure_positive("weight_lb", query.weight_lb)?;
        let (profile, bone_in_defaulted) =
            meat_table().resolve(query.protein, &query.cut, query.bone_in)?;

        let index = select_bracket(&profile.brackets(), weight).ok_or_else(|| {
            CalcError::not_found(
                TABLE_NAME,
                format!("{} at {weight} lb", profile.key),
                profile.rows.iter().map(|r| r.key.weight_lb.to_string()).collect(),
            )
        })?;
        let row = &profile.rows[index];

        let (minutes_per_pound, total_minutes, interpolated) = match profile.basis {
            TimeBasis::PerPound => {
                let per_pound = interpolate(&profile.interpolation_rows(), weight)
                    .unwrap_or(row.time);
                (Some(per_pound), per_pound.scale(weight), per_pound != row.time)
            }
            TimeBasis::PerBracket => (None, row.time, false),
        };

        Ok(MeatEstimate {
            key: profile.key.clone(),
            bone_in_defaulted,
            weight_lb: weight,
            bracket: row.key.weight_lb,
            basis: profile.basis,
            oven_temperature: table_temperature(row.temperature_f, query.unit),
            target_internal: row
                .target_internal_f
                .map(|target| table_temperature(target, query.unit)),
            minutes_per_pound,
            interpolated,
            total_minutes,
            display_minutes: TimeRange {
                min: round_half_up(total_minutes.min),
                max: round_half_up(total_minutes.max),
            },
            rest_minutes: profile.rest_minutes,
            notes: row.notes,
        })
    }
}
