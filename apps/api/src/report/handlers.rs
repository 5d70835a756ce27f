//! Axum route handlers for the Report API.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use crate::errors::{messages, AppError};
use crate::models::report::CompleteReport;
use crate::report::orchestrator::generate_report;
use crate::report::validation::parse_complete_input;
use crate::state::AppState;

/// POST /api/generate
///
/// Validates the wizard payload and returns the three generated report sections.
/// The body is parsed as JSON whatever its `Content-Type`. Every body problem is
/// a 400; the upstream API is only called for valid input.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CompleteReport>, AppError> {
    let Some(generator) = state.generator.as_deref() else {
        return Err(AppError::Configuration(
            "ANTHROPIC_API_KEY is not set".to_string(),
        ));
    };

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected generate body: {e}");
        AppError::Validation(messages::VALIDATION_ERROR.to_string())
    })?;

    let input = parse_complete_input(payload)?;

    let report = generate_report(generator, &input, state.generation).await?;

    Ok(Json(report))
}
