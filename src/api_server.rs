// Axum API Server Module
//
// Purpose: REST API over the soil analysis engine (manual entry, batch, report)
// Stateless: handlers share only the read-only config

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::analyzer::{analyze_batch, analyze_raw, SoilAnalysisResult};
use crate::config::ApiConfig;
use crate::formatters::{ErrorEnvelope, MarkdownFormatter};
use crate::sample::{RawSoilInputs, ValidationError};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Soil analysis endpoints
        .route("/api/soil-analysis/manual", post(analyze_manual))
        .route("/api/soil-analysis/batch", post(analyze_samples_batch))
        .route("/api/soil-analysis/report", post(soil_report))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// POST /api/soil-analysis/manual
async fn analyze_manual(body: Bytes) -> Result<Json<SoilAnalysisResult>, AppError> {
    let payload: RawSoilInputs = parse_body(&body)?;
    let result = analyze_raw(&payload)?;
    tracing::debug!(
        "Analyzed sample pH {} -> {}",
        result.sample.ph,
        result.soil_type
    );
    Ok(Json(result))
}

/// POST /api/soil-analysis/batch
///
/// Each sample succeeds or fails on its own; a bad sample does not fail the request.
async fn analyze_samples_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchAnalysisResponse>, AppError> {
    let payload: BatchAnalysisRequest = parse_body(&body)?;
    let count = payload.samples.len();
    let limit = state.config.max_batch_size;
    if count > limit {
        return Err(AppError::BatchTooLarge { count, limit });
    }

    tracing::info!("Batch soil analysis for {} samples", count);

    // CPU-bound work: run in blocking thread pool
    let results = tokio::task::spawn_blocking(move || analyze_batch(&payload.samples))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let results: Vec<BatchItem> = results.into_iter().map(BatchItem::from).collect();
    let succeeded = results.iter().filter(|item| item.ok).count();

    Ok(Json(BatchAnalysisResponse {
        count,
        succeeded,
        failed: count - succeeded,
        results,
    }))
}

/// POST /api/soil-analysis/report
async fn soil_report(body: Bytes) -> Result<impl IntoResponse, AppError> {
    let payload: RawSoilInputs = parse_body(&body)?;
    let result = analyze_raw(&payload)?;
    let markdown = MarkdownFormatter::format(&result);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    ))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct BatchAnalysisRequest {
    #[serde(default)]
    pub samples: Vec<RawSoilInputs>,
}

#[derive(Serialize, Debug)]
pub struct BatchAnalysisResponse {
    pub count: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Serialize, Debug)]
pub struct BatchItem {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SoilAnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl From<Result<SoilAnalysisResult, ValidationError>> for BatchItem {
    fn from(outcome: Result<SoilAnalysisResult, ValidationError>) -> Self {
        match outcome {
            Ok(result) => Self { ok: true, result: Some(result), error: None },
            Err(e) => Self { ok: false, result: None, error: Some(ErrorEnvelope::from(&e)) },
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Decode a JSON request body.
///
/// Bodies are decoded here rather than through the `Json` extractor so that
/// malformed JSON gets the same coded error body as everything else. Field
/// values that are not usable numbers still decode and fail in `validate`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::InvalidJson(e.to_string()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    InvalidJson(String),
    BatchTooLarge { count: usize, limit: usize },
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Validation(e) => {
                tracing::debug!("Rejected soil sample: {}", e);
                (StatusCode::BAD_REQUEST, ErrorEnvelope::from(&e))
            }
            AppError::InvalidJson(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorEnvelope::general("invalid_json", format!("Invalid JSON body: {}", msg)),
                )
            }
            AppError::BatchTooLarge { count, limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorEnvelope::general(
                    "batch_too_large",
                    format!("Batch of {} samples exceeds limit of {}", count, limit),
                ),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::general("internal", msg),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
