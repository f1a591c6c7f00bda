// crates/kitchencalc-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("no {table} entry for '{key}'")]
    NotFound {
        table: &'static str,
        key: String,
        suggestions: Vec<String>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CalcError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CalcError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(table: &'static str, key: impl Into<String>, suggestions: Vec<String>) -> Self {
        CalcError::NotFound {
            table,
            key: key.into(),
            suggestions,
        }
    }

    /// Short machine-readable category, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "validation",
            CalcError::NotFound { .. } => "not_found",
            CalcError::Config(_) | CalcError::Io(_) | CalcError::Toml(_) => "config",
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            CalcError::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Rejects NaN and infinities for any numeric input.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::validation(field, format!("{value} is not a finite number")))
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::validation(field, format!("{value} must not be negative")));
    }
    Ok(value)
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::validation(field, format!("{value} must be greater than zero")));
    }
    Ok(value)
}
