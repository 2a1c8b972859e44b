//! Classification functions for soil analysis.
//!
//! pH buckets and NPK thresholds used by the engine. The nutrient thresholds
//! are paired with the deficit formulas in `recommendations`: the "medium"
//! threshold here is the target level each Low-dose formula tops up to.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Soil Type (pH-based)
// ============================================================================

/// Soil classification derived solely from pH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    #[serde(rename = "Acidic Sandy Soil")]
    AcidicSandy,
    #[serde(rename = "Slightly Acidic Loamy Soil")]
    SlightlyAcidicLoamy,
    #[serde(rename = "Neutral Loamy Soil")]
    NeutralLoamy,
    #[serde(rename = "Alkaline Clay Soil")]
    AlkalineClay,
    #[serde(rename = "Highly Alkaline Soil")]
    HighlyAlkaline,
}

impl SoilType {
    pub fn label(&self) -> &'static str {
        match self {
            SoilType::AcidicSandy => "Acidic Sandy Soil",
            SoilType::SlightlyAcidicLoamy => "Slightly Acidic Loamy Soil",
            SoilType::NeutralLoamy => "Neutral Loamy Soil",
            SoilType::AlkalineClay => "Alkaline Clay Soil",
            SoilType::HighlyAlkaline => "Highly Alkaline Soil",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify soil type from pH.
///
/// - pH < 5.5: Acidic Sandy
/// - 5.5 <= pH < 6.5: Slightly Acidic Loamy
/// - 6.5 <= pH <= 7.5: Neutral Loamy (7.5 stays neutral)
/// - 7.5 < pH < 8.5: Alkaline Clay
/// - pH >= 8.5: Highly Alkaline
pub fn classify_soil_type(ph: f64) -> SoilType {
    if ph < 5.5 {
        SoilType::AcidicSandy
    } else if ph < 6.5 {
        SoilType::SlightlyAcidicLoamy
    } else if ph <= 7.5 {
        SoilType::NeutralLoamy
    } else if ph < 8.5 {
        SoilType::AlkalineClay
    } else {
        SoilType::HighlyAlkaline
    }
}

// ============================================================================
// Nutrient Levels (threshold-based)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutrientLevel {
    Low,
    Medium,
    High,
}

impl NutrientLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NutrientLevel::Low => "Low",
            NutrientLevel::Medium => "Medium",
            NutrientLevel::High => "High",
        }
    }

    /// Fill percentage of the nutrient gauge in the result display.
    pub fn gauge_percent(&self) -> u8 {
        match self {
            NutrientLevel::Low => 30,
            NutrientLevel::Medium => 60,
            NutrientLevel::High => 100,
        }
    }
}

impl fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Low/medium cut points for one nutrient, in ppm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientThresholds {
    pub low: f64,
    pub medium: f64,
}

impl NutrientThresholds {
    pub fn classify(&self, value: f64) -> NutrientLevel {
        classify_nutrient_level(value, self.low, self.medium)
    }
}

pub const NITROGEN_THRESHOLDS: NutrientThresholds = NutrientThresholds { low: 100.0, medium: 200.0 };
pub const PHOSPHORUS_THRESHOLDS: NutrientThresholds = NutrientThresholds { low: 15.0, medium: 30.0 };
pub const POTASSIUM_THRESHOLDS: NutrientThresholds = NutrientThresholds { low: 100.0, medium: 200.0 };

/// Classify a nutrient value against its thresholds.
/// Lower edges are inclusive: `value == low` is Medium, `value == medium` is High.
pub fn classify_nutrient_level(value: f64, low: f64, medium: f64) -> NutrientLevel {
    if value < low {
        NutrientLevel::Low
    } else if value < medium {
        NutrientLevel::Medium
    } else {
        NutrientLevel::High
    }
}
