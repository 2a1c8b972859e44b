//! JSON output for analysis results and rejected samples.
//!
//! `ErrorEnvelope` is the one error shape shared by the API and the CLI:
//! `{ "error": <message>, "code": <machine code>, "field"?: <input field> }`.

use crate::analyzer::SoilAnalysisResult;
use crate::sample::{SoilField, ValidationError};
use serde::Serialize;

/// Machine-readable error body
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<SoilField>,
}

impl ErrorEnvelope {
    /// Error not tied to one input field (bad body, oversize batch, ...)
    pub fn general(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            field: None,
        }
    }
}

impl From<&ValidationError> for ErrorEnvelope {
    fn from(e: &ValidationError) -> Self {
        Self {
            error: e.to_string(),
            code: e.code(),
            field: Some(e.field()),
        }
    }
}

/// JSON formatter for soil analysis results
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format result as pretty-printed JSON
    pub fn format(result: &SoilAnalysisResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(result)
    }

    /// Format a rejected sample as a pretty-printed error envelope
    pub fn format_error(error: &ValidationError) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ErrorEnvelope::from(error))
    }
}
