//! Standard cake pan chart: servings for a two-layer, 4-inch-tall cake and
//! per-layer batter and bake settings for a 2-inch-deep pan.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::converter::Converter;
use crate::error::Result;
use crate::lookup::{LookupEntry, LookupTable};
use crate::pan::PanShape;
use crate::quantity::TimeRange;

pub const TABLE_NAME: &str = "cake_pan";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CakePanEntry {
    pub pan: PanShape,
    pub party_servings: u32,
    pub wedding_servings: u32,
    pub batter_cups: f64,
    pub bake: LookupEntry<String>,
}

// (pan, party, wedding, batter cups per layer, bake °F, min minutes, max minutes)
type PanRow = (PanShape, u32, u32, f64, f64, f64, f64);

const PANS: &[PanRow] = &[
    (PanShape::Round { diameter: 6.0 }, 12, 12, 2.0, 350.0, 25.0, 30.0),
    (PanShape::Round { diameter: 8.0 }, 20, 24, 3.5, 350.0, 30.0, 35.0),
    (PanShape::Round { diameter: 9.0 }, 24, 32, 4.0, 350.0, 30.0, 35.0),
    (PanShape::Round { diameter: 10.0 }, 28, 38, 6.0, 350.0, 35.0, 40.0),
    (PanShape::Round { diameter: 12.0 }, 40, 56, 7.5, 350.0, 35.0, 40.0),
    (PanShape::Round { diameter: 14.0 }, 63, 78, 10.0, 325.0, 50.0, 55.0),
    (PanShape::Square { side: 6.0 }, 12, 18, 2.0, 350.0, 25.0, 30.0),
    (PanShape::Square { side: 8.0 }, 20, 32, 4.0, 350.0, 35.0, 40.0),
    (PanShape::Square { side: 10.0 }, 30, 50, 6.0, 350.0, 35.0, 40.0),
    (PanShape::Square { side: 12.0 }, 48, 72, 10.0, 350.0, 40.0, 45.0),
    (PanShape::Square { side: 14.0 }, 63, 98, 13.5, 325.0, 45.0, 50.0),
    (PanShape::Rectangle { width: 9.0, length: 13.0 }, 24, 36, 5.0, 350.0, 30.0, 35.0),
    (PanShape::Rectangle { width: 11.0, length: 15.0 }, 35, 54, 8.0, 350.0, 35.0, 40.0),
    (PanShape::Rectangle { width: 12.0, length: 18.0 }, 54, 72, 11.0, 325.0, 35.0, 40.0),
];

fn build(rows: &[PanRow]) -> Result<LookupTable<String, CakePanEntry>> {
    let mut entries = Vec::with_capacity(rows.len());
    for &(pan, party_servings, wedding_servings, batter_cups, bake_f, min, max) in rows {
        pan.validate()?;
        entries.push(CakePanEntry {
            pan,
            party_servings,
            wedding_servings,
            batter_cups,
            bake: LookupEntry {
                key: pan.label(),
                temperature_f: bake_f,
                time: TimeRange::new(min, max)?,
                target_internal_f: None,
                notes: None,
            },
        });
    }
    LookupTable::new(TABLE_NAME, entries, |entry| entry.pan.label())
}

static CAKE_PANS: Lazy<LookupTable<String, CakePanEntry>> =
    Lazy::new(|| build(PANS).expect("built-in cake pan table should be consistent"));

pub fn cake_pan_table() -> &'static LookupTable<String, CakePanEntry> {
    &CAKE_PANS
}

pub fn find_cake_pan(pan: &PanShape) -> Result<&'static CakePanEntry> {
    pan.validate()?;
    cake_pan_table().get(&pan.label())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CakePanConverter;

impl Converter for CakePanConverter {
    type Input = PanShape;
    type Output = CakePanEntry;

    fn code(&self) -> &'static str {
        "cake_pan"
    }

    fn convert(&self, pan: &PanShape) -> Result<CakePanEntry> {
        find_cake_pan(pan).cloned()
    }
}
