// crates/kitchencalc-core/src/config.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CalcError, Result};
use crate::pan::SliceSizes;
use crate::ratio::{ConversionRule, TemperatureOffset};
use crate::rounding::RoundingPolicy;

/// Environment variable naming the config file when no path is passed explicitly.
pub const CONFIG_ENV: &str = "KITCHENCALC_CONFIG";

/// Partial override of a built-in conversion rule. Unset fields keep the
/// built-in value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOverride {
    pub offset_f: Option<f64>,
    pub time_ratio: Option<f64>,
}

impl RuleOverride {
    pub fn apply(&self, base: ConversionRule) -> ConversionRule {
        ConversionRule {
            offset: self
                .offset_f
                .map(TemperatureOffset::fahrenheit)
                .or(base.offset),
            time_ratio: self.time_ratio.unwrap_or(base.time_ratio),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub air_fryer: RuleOverride,
    pub convection: RuleOverride,
    pub microwave: RuleOverride,
}

impl RulesConfig {
    pub fn air_fryer(&self) -> ConversionRule {
        self.air_fryer.apply(ConversionRule::AIR_FRYER)
    }

    pub fn convection(&self) -> ConversionRule {
        self.convection.apply(ConversionRule::CONVECTION)
    }

    pub fn microwave(&self) -> ConversionRule {
        self.microwave.apply(ConversionRule::MICROWAVE)
    }
}

/// Everything the engine can be tuned with. Every table and field is optional
/// in the TOML file:
///
/// ```toml
/// [rounding]
/// practical_temperature_step = 5
///
/// [rules.air_fryer]
/// offset_f = 25
/// time_ratio = 0.8
///
/// [slices]
/// party_sq_in = 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rounding: RoundingPolicy,
    pub rules: RulesConfig,
    pub slices: SliceSizes,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates `path`. A missing file is an error here; see
    /// [`EngineConfig::resolve`] for the lenient form.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|err| match err {
            CalcError::Toml(inner) => {
                CalcError::Config(format!("{}: {inner}", path.display()))
            }
            other => other,
        })
    }

    /// Loads from `explicit`, else from `$KITCHENCALC_CONFIG`, else defaults.
    /// A path that does not exist falls back to defaults with a warning.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let Some(path) = path else {
            info!("no configuration file given, using built-in defaults");
            return Ok(Self::default());
        };

        match Self::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(CalcError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "configuration file not found, using built-in defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.rounding.validate()?;
        self.slices.validate()?;
        for (name, rule) in [
            ("air_fryer", self.rules.air_fryer()),
            ("convection", self.rules.convection()),
            ("microwave", self.rules.microwave()),
        ] {
            rule.validate()
                .map_err(|err| CalcError::Config(format!("rules.{name}: {err}")))?;
        }
        Ok(())
    }
}
