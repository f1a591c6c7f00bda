// crates/kitchencalc-core/src/lib.rs

pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod measure;
pub mod pan;
pub mod quantity;
pub mod ratio;
pub mod rounding;
pub mod temperature;
pub mod wattage;

pub use config::EngineConfig;
pub use converter::{all_converter_descriptors, Converter, ConverterDescriptor};
pub use engine::{CalculationRequest, CalculationResponse, Engine};
pub use error::{CalcError, Result};
pub use quantity::{CalculationResult, Temperature, TemperatureUnit, TimeRange, Unit};
