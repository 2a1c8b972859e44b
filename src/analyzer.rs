//! Soil Analyzer - runs the full recommendation pipeline for a sample
//!
//! Pure and deterministic: the same sample always yields the same result.
//! Includes a batch entry point that fans samples out over Rayon.

use crate::classify::{
    classify_soil_type, NutrientLevel, SoilType, NITROGEN_THRESHOLDS, PHOSPHORUS_THRESHOLDS,
    POTASSIUM_THRESHOLDS,
};
use crate::recommendations::{
    compute_fertilizer_plan, compute_organic_recommendation, compute_ph_adjustment,
    compute_suitable_crops, FertilizerDose, PhAdjustment,
};
use crate::sample::{validate, RawSoilInputs, SoilSample, ValidationError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Complete analysis for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisResult {
    /// The validated input, echoed for display
    pub sample: SoilSample,
    pub soil_type: SoilType,
    pub nitrogen_level: NutrientLevel,
    pub phosphorus_level: NutrientLevel,
    pub potassium_level: NutrientLevel,
    pub ph_adjustment: String,
    pub ph_amendment: PhAdjustment,
    pub fertilizer_recommendations: Vec<String>,
    pub fertilizer_plan: Vec<FertilizerDose>,
    pub suitable_crops: Vec<String>,
    pub organic_recommendation: String,
}

/// Analyze a validated sample. Total over the validated pH domain.
pub fn analyze(sample: &SoilSample) -> SoilAnalysisResult {
    let soil_type = classify_soil_type(sample.ph);

    let nitrogen_level = NITROGEN_THRESHOLDS.classify(sample.nitrogen);
    let phosphorus_level = PHOSPHORUS_THRESHOLDS.classify(sample.phosphorus);
    let potassium_level = POTASSIUM_THRESHOLDS.classify(sample.potassium);

    let ph_amendment = compute_ph_adjustment(sample.ph);

    let fertilizer_plan = compute_fertilizer_plan(
        nitrogen_level,
        phosphorus_level,
        potassium_level,
        sample.nitrogen,
        sample.phosphorus,
        sample.potassium,
    );

    let suitable_crops = compute_suitable_crops(sample.ph)
        .iter()
        .map(|crop| crop.to_string())
        .collect();

    SoilAnalysisResult {
        sample: *sample,
        soil_type,
        nitrogen_level,
        phosphorus_level,
        potassium_level,
        ph_adjustment: ph_amendment.to_string(),
        ph_amendment,
        fertilizer_recommendations: fertilizer_plan.iter().map(ToString::to_string).collect(),
        fertilizer_plan,
        suitable_crops,
        organic_recommendation: compute_organic_recommendation(nitrogen_level),
    }
}

/// Validate then analyze. No computation runs if validation fails.
pub fn analyze_raw(raw: &RawSoilInputs) -> Result<SoilAnalysisResult, ValidationError> {
    let sample = validate(raw)?;
    Ok(analyze(&sample))
}

/// Analyze many samples in parallel; one result per input, in input order.
pub fn analyze_batch(samples: &[RawSoilInputs]) -> Vec<Result<SoilAnalysisResult, ValidationError>> {
    let results: Vec<_> = samples.par_iter().map(analyze_raw).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(
        "Batch analysis: {} samples, {} rejected",
        samples.len(),
        failed
    );

    results
}
