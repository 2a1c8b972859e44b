//! Soil sample input and validation.
//!
//! Raw form values (strings from a text field, or JSON numbers from an API
//! client) are turned into a `SoilSample` here. Nothing downstream of
//! `validate` ever sees an unchecked value.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue as JsonRawValue;
use std::fmt;
use thiserror::Error;

/// Lowest pH accepted for analysis (inclusive).
pub const PH_MIN: f64 = 3.0;

/// Highest pH accepted for analysis (inclusive).
pub const PH_MAX: f64 = 10.0;

/// Which soil-test field a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilField {
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl SoilField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilField::Ph => "ph",
            SoilField::Nitrogen => "nitrogen",
            SoilField::Phosphorus => "phosphorus",
            SoilField::Potassium => "potassium",
        }
    }
}

impl fmt::Display for SoilField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single raw field value: either already numeric or still text.
///
/// JSON numbers that do not fit a finite f64 (e.g. `1e400`), booleans, arrays
/// and objects are kept as their JSON text so they fail in `validate` as
/// invalid numbers instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Raw capture scans number tokens without converting them
        let raw = Box::<JsonRawValue>::deserialize(deserializer)?;
        let text = raw.get();

        if text.starts_with('"') {
            let s: String = serde_json::from_str(text).map_err(de::Error::custom)?;
            return Ok(RawValue::Text(s));
        }

        Ok(match text.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            _ => RawValue::Text(text.to_string()),
        })
    }
}

impl RawValue {
    /// Parse to a finite f64. Text is trimmed; `inf`/`NaN` spellings are rejected.
    pub fn to_finite(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    fn describe(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Unvalidated soil-test inputs as submitted by a form or API client.
///
/// Missing fields deserialize to `None` and fail validation as invalid numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSoilInputs {
    #[serde(default)]
    pub ph: Option<RawValue>,
    #[serde(default)]
    pub nitrogen: Option<RawValue>,
    #[serde(default)]
    pub phosphorus: Option<RawValue>,
    #[serde(default)]
    pub potassium: Option<RawValue>,
}

impl RawSoilInputs {
    pub fn new(
        ph: impl Into<RawValue>,
        nitrogen: impl Into<RawValue>,
        phosphorus: impl Into<RawValue>,
        potassium: impl Into<RawValue>,
    ) -> Self {
        Self {
            ph: Some(ph.into()),
            nitrogen: Some(nitrogen.into()),
            phosphorus: Some(phosphorus.into()),
            potassium: Some(potassium.into()),
        }
    }
}

/// Validated soil-test values. Nutrients are in ppm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

/// Why a set of raw inputs was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid number for {field}: {raw:?}")]
    InvalidNumber { field: SoilField, raw: String },

    #[error("pH {0} is outside the accepted range 3-10")]
    PhOutOfRange(f64),
}

impl ValidationError {
    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidNumber { .. } => "invalid_number",
            ValidationError::PhOutOfRange(_) => "ph_out_of_range",
        }
    }

    pub fn field(&self) -> SoilField {
        match self {
            ValidationError::InvalidNumber { field, .. } => *field,
            ValidationError::PhOutOfRange(_) => SoilField::Ph,
        }
    }
}

fn parse_field(field: SoilField, raw: Option<&RawValue>) -> Result<f64, ValidationError> {
    raw.and_then(RawValue::to_finite)
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            raw: raw.map(RawValue::describe).unwrap_or_default(),
        })
}

/// Validate raw inputs into a `SoilSample`.
///
/// All four fields are parsed before the pH range is checked, so a sample with
/// both a garbage nutrient and an out-of-range pH reports the invalid number.
/// Nutrient values have no range check.
pub fn validate(raw: &RawSoilInputs) -> Result<SoilSample, ValidationError> {
    let ph = parse_field(SoilField::Ph, raw.ph.as_ref())?;
    let nitrogen = parse_field(SoilField::Nitrogen, raw.nitrogen.as_ref())?;
    let phosphorus = parse_field(SoilField::Phosphorus, raw.phosphorus.as_ref())?;
    let potassium = parse_field(SoilField::Potassium, raw.potassium.as_ref())?;

    if !(PH_MIN..=PH_MAX).contains(&ph) {
        tracing::debug!("Rejected sample with pH {}", ph);
        return Err(ValidationError::PhOutOfRange(ph));
    }

    Ok(SoilSample {
        ph,
        nitrogen,
        phosphorus,
        potassium,
    })
}
