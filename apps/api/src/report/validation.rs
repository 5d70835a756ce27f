//! Payload validation for `/api/generate`.
//!
//! Two passes: a structural check on the raw JSON (required nested objects are
//! present), then field rules on the typed input. Both reject with 400 before
//! any upstream call is made.

use serde_json::Value;
use tracing::debug;

use crate::errors::{messages, AppError};
use crate::models::input::{CareerSnapshotInput, CompleteInput, RealityCheckInput};

pub const MIN_RESUME_CHARS: usize = 50;
pub const MAX_RESUME_CHARS: usize = 5000;
pub const MIN_CONSTRAINT_CHARS: usize = 10;
pub const MAX_CONSTRAINT_CHARS: usize = 500;

/// Checks that the payload carries the three step objects and a resume string.
pub fn validate_payload_shape(payload: &Value) -> Result<(), AppError> {
    let invalid = |reason: &str| {
        debug!("Rejected generate payload: {reason}");
        Err(AppError::Validation(messages::VALIDATION_ERROR.to_string()))
    };

    let Some(data) = payload.as_object() else {
        return invalid("payload is not an object");
    };

    for key in ["realityCheck", "careerSnapshot", "idea"] {
        if !data.get(key).is_some_and(Value::is_object) {
            return invalid(&format!("`{key}` missing or not an object"));
        }
    }

    let has_resume = data["careerSnapshot"]
        .get("resumeText")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    if !has_resume {
        return invalid("`careerSnapshot.resumeText` missing or empty");
    }

    Ok(())
}

/// Field rules for step 1. Returns one message per violation; empty means valid.
pub fn validate_reality_check(input: &RealityCheckInput) -> Vec<String> {
    let mut errors = Vec::new();

    // Optional, but once filled in it must be meaningful.
    let length = input.absolute_constraints.trim().chars().count();
    if length > 0 && length < MIN_CONSTRAINT_CHARS {
        errors.push(format!(
            "절대적 제약 조건은 최소 {MIN_CONSTRAINT_CHARS}자 이상 입력해주세요."
        ));
    }
    if length > MAX_CONSTRAINT_CHARS {
        errors.push(format!(
            "절대적 제약 조건은 최대 {MAX_CONSTRAINT_CHARS}자까지 입력 가능합니다."
        ));
    }

    errors
}

/// Field rules for step 2. Returns one message per violation; empty means valid.
pub fn validate_career_snapshot(input: &CareerSnapshotInput) -> Vec<String> {
    let mut errors = Vec::new();

    let length = input.resume_text.trim().chars().count();
    if length < MIN_RESUME_CHARS {
        errors.push(format!(
            "이력서는 최소 {MIN_RESUME_CHARS}자 이상 입력해주세요."
        ));
    }
    if length > MAX_RESUME_CHARS {
        errors.push(format!(
            "이력서는 최대 {MAX_RESUME_CHARS}자까지 입력 가능합니다."
        ));
    }

    if let Some(parsed) = &input.parsed_career {
        if parsed.roles.is_empty() {
            errors.push("파싱된 역할 정보가 유효하지 않습니다.".to_string());
        }
        if parsed.skills.is_empty() {
            errors.push("파싱된 기술 정보가 유효하지 않습니다.".to_string());
        }
        if parsed.repeat_tasks.is_empty() {
            errors.push("파싱된 반복 업무 정보가 유효하지 않습니다.".to_string());
        }
    }

    errors
}

/// Runs both passes and yields the typed input.
pub fn parse_complete_input(payload: Value) -> Result<CompleteInput, AppError> {
    validate_payload_shape(&payload)?;

    let input: CompleteInput = serde_json::from_value(payload).map_err(|e| {
        debug!("Rejected generate payload: {e}");
        AppError::Validation(messages::VALIDATION_ERROR.to_string())
    })?;

    let mut errors = validate_reality_check(&input.reality_check);
    errors.extend(validate_career_snapshot(&input.career_snapshot));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join(" ")));
    }

    Ok(input)
}
