//! Amendment, fertilizer, crop and organic-matter recommendations.
//!
//! Dosages are kg/acre rounded to the nearest whole number. Each Low-nutrient
//! formula tops the nutrient up to its "medium" threshold, scaled by the
//! nutrient fraction of the product (46% N in urea, 46% P2O5 in DAP, 60% K2O
//! in MOP). If a threshold in `classify` moves, the matching target here must
//! move with it.

use crate::classify::{NutrientLevel, NITROGEN_THRESHOLDS, PHOSPHORUS_THRESHOLDS, POTASSIUM_THRESHOLDS};
use serde::{Deserialize, Serialize};
use std::fmt;

fn round_kg(value: f64) -> i64 {
    value.round() as i64
}

// ============================================================================
// pH Adjustment
// ============================================================================

/// Below this pH, lime is recommended.
pub const LIME_TRIGGER_PH: f64 = 6.0;
/// Target pH the lime dose raises to.
pub const LIME_TARGET_PH: f64 = 6.5;
/// kg/acre of agricultural lime per pH unit.
pub const LIME_KG_PER_UNIT: f64 = 200.0;

/// Above this pH, sulfur is recommended.
pub const SULFUR_TRIGGER_PH: f64 = 7.5;
/// Target pH the sulfur dose lowers to.
pub const SULFUR_TARGET_PH: f64 = 7.0;
/// kg/acre of elemental sulfur per pH unit.
pub const SULFUR_KG_PER_UNIT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "amendment", rename_all = "camelCase")]
pub enum PhAdjustment {
    #[serde(rename_all = "camelCase")]
    Lime { kg_per_acre: i64 },
    #[serde(rename_all = "camelCase")]
    Sulfur { kg_per_acre: i64 },
    NoneNeeded,
}

impl fmt::Display for PhAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhAdjustment::Lime { kg_per_acre } => {
                write!(f, "Add {} kg/acre of agricultural lime to raise pH", kg_per_acre)
            }
            PhAdjustment::Sulfur { kg_per_acre } => {
                write!(f, "Add {} kg/acre of elemental sulfur to lower pH", kg_per_acre)
            }
            PhAdjustment::NoneNeeded => f.write_str("pH is in optimal range. No adjustment needed."),
        }
    }
}

pub fn compute_ph_adjustment(ph: f64) -> PhAdjustment {
    if ph < LIME_TRIGGER_PH {
        PhAdjustment::Lime {
            kg_per_acre: round_kg((LIME_TARGET_PH - ph) * LIME_KG_PER_UNIT),
        }
    } else if ph > SULFUR_TRIGGER_PH {
        PhAdjustment::Sulfur {
            kg_per_acre: round_kg((ph - SULFUR_TARGET_PH) * SULFUR_KG_PER_UNIT),
        }
    } else {
        PhAdjustment::NoneNeeded
    }
}

// ============================================================================
// Fertilizer Plan
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fertilizer {
    #[serde(rename = "Urea (46-0-0)")]
    Urea,
    #[serde(rename = "DAP (18-46-0)")]
    Dap,
    #[serde(rename = "MOP (0-0-60)")]
    Mop,
}

impl Fertilizer {
    pub fn label(&self) -> &'static str {
        match self {
            Fertilizer::Urea => "Urea (46-0-0)",
            Fertilizer::Dap => "DAP (18-46-0)",
            Fertilizer::Mop => "MOP (0-0-60)",
        }
    }

    /// Percentage of the target nutrient in the product.
    pub fn nutrient_percent(&self) -> f64 {
        match self {
            Fertilizer::Urea => 46.0,
            Fertilizer::Dap => 46.0,
            Fertilizer::Mop => 60.0,
        }
    }
}

/// How each nutrient is corrected.
struct DoseRule {
    nutrient: Nutrient,
    product: Fertilizer,
    target_ppm: f64,
    maintenance_kg: i64,
}

const NITROGEN_RULE: DoseRule = DoseRule {
    nutrient: Nutrient::Nitrogen,
    product: Fertilizer::Urea,
    target_ppm: NITROGEN_THRESHOLDS.medium,
    maintenance_kg: 100,
};

const PHOSPHORUS_RULE: DoseRule = DoseRule {
    nutrient: Nutrient::Phosphorus,
    product: Fertilizer::Dap,
    target_ppm: PHOSPHORUS_THRESHOLDS.medium,
    maintenance_kg: 50,
};

const POTASSIUM_RULE: DoseRule = DoseRule {
    nutrient: Nutrient::Potassium,
    product: Fertilizer::Mop,
    target_ppm: POTASSIUM_THRESHOLDS.medium,
    maintenance_kg: 75,
};

/// One line of the fertilizer plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerDose {
    pub nutrient: Nutrient,
    pub product: Fertilizer,
    pub kg_per_acre: i64,
    /// True for the fixed maintenance dose given at Medium level.
    pub maintenance: bool,
}

impl fmt::Display for FertilizerDose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} kg/acre", self.product.label(), self.kg_per_acre)?;
        if self.maintenance {
            f.write_str(" for maintenance")?;
        }
        Ok(())
    }
}

impl DoseRule {
    fn dose(&self, level: NutrientLevel, value: f64) -> Option<FertilizerDose> {
        let (kg_per_acre, maintenance) = match level {
            NutrientLevel::Low => (
                round_kg((self.target_ppm - value) / self.product.nutrient_percent() * 100.0),
                false,
            ),
            NutrientLevel::Medium => (self.maintenance_kg, true),
            NutrientLevel::High => return None,
        };
        Some(FertilizerDose {
            nutrient: self.nutrient,
            product: self.product,
            kg_per_acre,
            maintenance,
        })
    }
}

/// Fertilizer plan in N, P, K order. Nutrients at High are omitted.
pub fn compute_fertilizer_plan(
    n_level: NutrientLevel,
    p_level: NutrientLevel,
    k_level: NutrientLevel,
    n: f64,
    p: f64,
    k: f64,
) -> Vec<FertilizerDose> {
    [
        NITROGEN_RULE.dose(n_level, n),
        PHOSPHORUS_RULE.dose(p_level, p),
        POTASSIUM_RULE.dose(k_level, k),
    ]
    .into_iter()
    .flatten()
    .collect()
}

// ============================================================================
// Crop Suitability
// ============================================================================

pub const NEUTRAL_CROPS: &[&str] = &["Rice", "Wheat", "Corn", "Vegetables", "Cotton"];
pub const ACID_TOLERANT_CROPS: &[&str] = &["Potato", "Blueberry", "Tea", "Sweet Potato"];
pub const ALKALINE_TOLERANT_CROPS: &[&str] = &["Barley", "Beetroot", "Asparagus"];

/// Crops suited to the pH bucket: [6.0, 7.5], below 6.0, above 7.5.
pub fn compute_suitable_crops(ph: f64) -> &'static [&'static str] {
    if (6.0..=7.5).contains(&ph) {
        NEUTRAL_CROPS
    } else if ph < 6.0 {
        ACID_TOLERANT_CROPS
    } else {
        ALKALINE_TOLERANT_CROPS
    }
}

// ============================================================================
// Organic Matter
// ============================================================================

pub const ORGANIC_BASE: &str = "Apply 5-10 tons/acre of well-decomposed farmyard manure or compost annually to improve soil structure and nutrient retention.";
pub const ORGANIC_NITROGEN_BOOST: &str = " Add green manure crops or neem cake for nitrogen boost.";

pub fn compute_organic_recommendation(n_level: NutrientLevel) -> String {
    let mut text = String::from(ORGANIC_BASE);
    if n_level == NutrientLevel::Low {
        text.push_str(ORGANIC_NITROGEN_BOOST);
    }
    text
}
