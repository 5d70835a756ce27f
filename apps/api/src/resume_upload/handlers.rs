//! Axum route handlers for resume upload.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::Multipart,
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume_upload::extract::{extract_text, DocumentKind, MAX_FILE_SIZE};

const FIELD_NAME: &str = "file";

const MISSING_FILE: &str = "파일이 첨부되지 않았습니다";
const UNSUPPORTED_TYPE: &str = "PDF 또는 DOCX 파일만 업로드할 수 있습니다";
const FILE_TOO_LARGE: &str = "파일 크기는 5MB 이하여야 합니다";
const EXTRACTION_FAILED: &str = "파일에서 텍스트를 추출할 수 없습니다. 직접 입력해주세요.";

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub text: String,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/upload-resume
///
/// Takes multipart field `file` (PDF or DOCX, at most 5 MiB) and returns its text.
/// The upload is processed in memory only.
pub async fn handle_upload_resume(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|_| AppError::Validation(MISSING_FILE.to_string()))?;

    let file = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation(MISSING_FILE.to_string()))?;

    let kind = DocumentKind::detect(file.content_type.as_deref(), &file.file_name)
        .ok_or_else(|| AppError::Validation(UNSUPPORTED_TYPE.to_string()))?;

    if file.data.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(FILE_TOO_LARGE.to_string()));
    }

    let size = file.data.len();
    let text = extract_text(kind, file.data).await.map_err(|e| {
        warn!("Text extraction failed for {:?} upload: {e}", kind);
        AppError::UnprocessableEntity(EXTRACTION_FAILED.to_string())
    })?;

    info!(
        "Extracted {} chars from {:?} upload ({} bytes)",
        text.chars().count(),
        kind,
        size
    );

    Ok(Json(UploadResumeResponse { text }))
}

/// Returns the first `file` field that carries a file name, skipping anything else.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FIELD_NAME) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            data,
        }));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(FILE_TOO_LARGE.to_string())
    } else {
        AppError::Internal(anyhow::anyhow!("Failed to read multipart body: {}", err.body_text()))
    }
}
