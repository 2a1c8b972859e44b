//! Soil Analysis Rust Implementation
//!
//! Deterministic soil-test analysis: pH and NPK readings in, soil class,
//! amendment doses, fertilizer plan and crop suggestions out.
//!
//! Module layout:
//! - `sample`: raw inputs and validation
//! - `classify`: soil type and nutrient level thresholds
//! - `recommendations`: lime/sulfur, fertilizer, crop and organic advice
//! - `analyzer`: the full pipeline, single and batch
//! - `formatters`: Markdown and JSON reports
//! - `config`: API server settings from the environment
//! - `api_server`: Axum REST API (feature `api`)

pub mod sample;
pub mod classify;
pub mod recommendations;
pub mod analyzer;
pub mod formatters;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use sample::{validate, RawSoilInputs, RawValue, SoilField, SoilSample, ValidationError};
pub use classify::{classify_nutrient_level, classify_soil_type, NutrientLevel, SoilType};
pub use recommendations::{
    compute_fertilizer_plan, compute_organic_recommendation, compute_ph_adjustment,
    compute_suitable_crops, FertilizerDose, PhAdjustment,
};
pub use analyzer::{analyze, analyze_batch, analyze_raw, SoilAnalysisResult};
pub use config::ApiConfig;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
