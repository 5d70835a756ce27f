use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// User-facing messages. The product is Korean-language, so are these.
pub mod messages {
    pub const API_ERROR: &str = "API 요청 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";
    pub const VALIDATION_ERROR: &str = "입력 데이터가 유효하지 않습니다.";
    pub const TIMEOUT_ERROR: &str = "요청 시간이 초과되었습니다. 다시 시도해주세요.";
    pub const NETWORK_ERROR: &str = "네트워크 연결을 확인해주세요.";
    pub const RATE_LIMITED: &str = "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.";
    pub const AUTH_ERROR: &str = "API 인증에 실패했습니다.";
    pub const CONFIGURATION_ERROR: &str = "API 설정이 올바르지 않습니다.";
    pub const UNKNOWN_ERROR: &str = "알 수 없는 오류가 발생했습니다.";
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Upstream calls timed out")]
    Timeout,

    #[error("Upstream rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream rejected credentials: {0}")]
    UpstreamAuth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Cancelled => AppError::Timeout,
            LlmError::Api { status: 429, message } => AppError::RateLimited(message),
            LlmError::Api {
                status: 401 | 403,
                message,
            } => AppError::UpstreamAuth(message),
            LlmError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
                AppError::Network(e.to_string())
            }
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamAuth(_)
            | AppError::Llm(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => ("UNPROCESSABLE_ENTITY", msg.clone()),
            AppError::Timeout => {
                tracing::warn!("Report generation timed out");
                ("TIMEOUT", messages::TIMEOUT_ERROR.to_string())
            }
            AppError::RateLimited(msg) => {
                tracing::warn!("Upstream rate limit: {msg}");
                ("RATE_LIMITED", messages::RATE_LIMITED.to_string())
            }
            AppError::UpstreamAuth(msg) => {
                tracing::error!("Upstream auth failure: {msg}");
                ("UPSTREAM_AUTH_ERROR", messages::AUTH_ERROR.to_string())
            }
            AppError::Network(msg) => {
                tracing::error!("Network error: {msg}");
                ("NETWORK_ERROR", messages::NETWORK_ERROR.to_string())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                ("LLM_ERROR", messages::API_ERROR.to_string())
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                ("CONFIGURATION_ERROR", messages::CONFIGURATION_ERROR.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                ("INTERNAL_ERROR", messages::UNKNOWN_ERROR.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
