use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::Result;

/// A stateless calculation: structured input in, structured output out.
pub trait Converter: Send + Sync {
    type Input;
    type Output;

    fn code(&self) -> &'static str;
    fn convert(&self, input: &Self::Input) -> Result<Self::Output>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConverterFamily {
    Ratio,
    Wattage,
    Lookup,
    UnitScale,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConverterDescriptor {
    pub code: &'static str,
    pub family: ConverterFamily,
    pub description: &'static str,
}

static CONVERTERS: Lazy<Vec<ConverterDescriptor>> = Lazy::new(|| {
    use ConverterFamily::*;

    vec![
        ConverterDescriptor {
            code: "air_fryer",
            family: Ratio,
            description: "Oven recipe to air fryer (and back): 25°F cooler, 80% of the time",
        },
        ConverterDescriptor {
            code: "convection",
            family: Ratio,
            description: "Conventional to convection oven (and back): 25°F cooler, 85% of the time",
        },
        ConverterDescriptor {
            code: "microwave",
            family: Ratio,
            description: "Conventional oven to microwave (and back): a quarter of the time",
        },
        ConverterDescriptor {
            code: "wattage",
            family: Wattage,
            description: "Rescales a microwave time between two wattages",
        },
        ConverterDescriptor {
            code: "temperature",
            family: UnitScale,
            description: "Fahrenheit, Celsius and gas mark conversions",
        },
        ConverterDescriptor {
            code: "measure",
            family: UnitScale,
            description: "Cups, spoons, millilitres, grams and ounces, with ingredient densities",
        },
        ConverterDescriptor {
            code: "pan_scale",
            family: UnitScale,
            description: "Recipe multiplier between two pan sizes by area (and optionally depth)",
        },
        ConverterDescriptor {
            code: "cake_servings",
            family: UnitScale,
            description: "Party and wedding servings for a cake pan",
        },
        ConverterDescriptor {
            code: "meat",
            family: Lookup,
            description: "Roasting temperature, time and target internal temperature by cut and weight",
        },
        ConverterDescriptor {
            code: "doneness",
            family: Lookup,
            description: "Pull and final internal temperatures by protein and doneness",
        },
        ConverterDescriptor {
            code: "air_fryer_food",
            family: Lookup,
            description: "Air fryer temperature and time for common foods",
        },
        ConverterDescriptor {
            code: "cake_pan",
            family: Lookup,
            description: "Batter volume and bake settings for standard cake pans",
        },
    ]
});

pub fn all_converter_descriptors() -> &'static [ConverterDescriptor] {
    CONVERTERS.as_slice()
}

pub fn find_converter_descriptor(code: &str) -> Option<&'static ConverterDescriptor> {
    CONVERTERS.iter().find(|descriptor| descriptor.code == code)
}
