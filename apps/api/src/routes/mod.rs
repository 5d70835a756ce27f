pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::report::handlers::handle_generate;
use crate::resume_upload::extract::MAX_FILE_SIZE;
use crate::resume_upload::handlers::handle_upload_resume;
use crate::state::AppState;

/// Leaves room for multipart framing so oversize files reach the handler's size check.
const BODY_LIMIT: usize = MAX_FILE_SIZE + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate", post(handle_generate))
        .route("/api/upload-resume", post(handle_upload_resume))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::{LlmClient, TextGenerator};
    use crate::report::orchestrator::tests::{FailingGenerator, ScriptedGenerator};
    use crate::report::orchestrator::{GenerationSettings, RetryPolicy};
    use crate::resume_upload::extract::tests::docx_with_body;
    use crate::resume_upload::extract::{DOCX_MIME, PDF_MIME};

    fn no_retry() -> GenerationSettings {
        GenerationSettings {
            timeout: Duration::from_secs(10),
            retry: RetryPolicy {
                max_retries: 0,
                backoff: Duration::ZERO,
            },
        }
    }

    fn app_with(generator: Option<Arc<dyn TextGenerator>>, generation: GenerationSettings) -> Router {
        build_router(AppState {
            generator,
            generation,
        })
    }

    fn wizard_payload() -> Value {
        json!({
            "realityCheck": {
                "weeklyHours": "20시간 이상",
                "budgetLimit": "500-1000만원",
                "failureTolerance": "높음",
                "absoluteConstraints": "수도권 밖으로 이사할 수 없습니다"
            },
            "careerSnapshot": {
                "resumeText": "초등학교 교사로 10년 근무했습니다. 교육과정 설계와 학부모 상담, 교내 디지털 교육 도입을 맡았습니다.",
                "parsedCareer": {
                    "roles": ["담임 교사", "정보 부장"],
                    "skills": ["교육과정 설계", "구글 워크스페이스"],
                    "repeatTasks": ["주간 학습 계획 작성"]
                }
            },
            "idea": { "hasIdea": true, "ideaSummary": "교사 대상 수업 자료 구독 서비스" }
        })
    }

    async fn post_json(app: Router, body: String) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    fn multipart_request(file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let boundary = "myoi-test-boundary";
        let mut body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload-resume")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app_with(None, no_retry())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["llmConfigured"], false);
    }

    #[tokio::test]
    async fn test_health_reports_configured_generator() {
        let app = app_with(Some(Arc::new(ScriptedGenerator::new())), no_retry());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(json_body(response).await["llmConfigured"], true);
    }

    #[tokio::test]
    async fn test_generate_returns_combined_report() {
        let generator = Arc::new(ScriptedGenerator::new());
        let app = app_with(Some(generator.clone()), no_retry());

        let response = post_json(app, wizard_payload().to_string()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
        let body = json_body(response).await;
        assert_eq!(body["realityReport"]["warnings"].as_array().unwrap().len(), 3);
        assert_eq!(body["incomeMap"]["learningGaps"][0]["urgency"], "높음");
        assert!(body["decisionQuestions"]["sevenDayExperiment"]["title"].is_string());
    }

    #[tokio::test]
    async fn test_generate_missing_step_is_400_without_upstream_call() {
        let generator = Arc::new(ScriptedGenerator::new());
        let app = app_with(Some(generator.clone()), no_retry());

        let mut payload = wizard_payload();
        payload.as_object_mut().unwrap().remove("idea");
        let response = post_json(app, payload.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_400() {
        let generator = Arc::new(ScriptedGenerator::new());
        let app = app_with(Some(generator.clone()), no_retry());

        let response = post_json(app, "{\"realityCheck\": ".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_accepts_json_without_content_type() {
        let generator = Arc::new(ScriptedGenerator::new());
        let app = app_with(Some(generator.clone()), no_retry());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/generate")
                    .body(Body::from(wizard_payload().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_generate_without_api_key_is_500() {
        let response = post_json(app_with(None, no_retry()), wizard_payload().to_string()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "CONFIGURATION_ERROR"
        );
    }

    #[tokio::test]
    async fn test_generate_rate_limited_is_429() {
        let generator = Arc::new(FailingGenerator {
            calls: AtomicUsize::new(0),
            status: 429,
        });
        let app = app_with(Some(generator), no_retry());

        let response = post_json(app, wizard_payload().to_string()).await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json_body(response).await["error"]["code"], "RATE_LIMITED");
    }

    #[tokio::test]
    async fn test_generate_upstream_auth_failure_is_500() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(401).json_body(json!({
                    "type": "error",
                    "error": {"type": "authentication_error", "message": "invalid x-api-key"}
                }));
            })
            .await;
        let llm = LlmClient::new("wrong".to_string(), &server.base_url()).unwrap();
        let app = app_with(Some(Arc::new(llm)), no_retry());

        let response = post_json(app, wizard_payload().to_string()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "UPSTREAM_AUTH_ERROR"
        );
        assert!(mock.hits_async().await >= 1);
    }

    #[tokio::test]
    async fn test_generate_unreachable_upstream_is_503() {
        let llm = LlmClient::new("k".to_string(), "http://127.0.0.1:1").unwrap();
        let app = app_with(Some(Arc::new(llm)), no_retry());

        let response = post_json(app, wizard_payload().to_string()).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["error"]["code"], "NETWORK_ERROR");
    }

    #[tokio::test]
    async fn test_upload_docx_returns_text() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t>김민지</w:t></w:r></w:p><w:p><w:r><w:t>UX 디자이너 5년</w:t></w:r></w:p>"#,
        );
        let response = app_with(None, no_retry())
            .oneshot(multipart_request("resume.docx", DOCX_MIME, &docx))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["text"], "김민지\n\nUX 디자이너 5년");
    }

    #[tokio::test]
    async fn test_upload_accepts_extension_when_mime_is_generic() {
        let docx = docx_with_body(r#"<w:p><w:r><w:t>hello</w:t></w:r></w:p>"#);
        let response = app_with(None, no_retry())
            .oneshot(multipart_request(
                "Resume.DOCX",
                "application/octet-stream",
                &docx,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_unsupported_type_is_400() {
        let response = app_with(None, no_retry())
            .oneshot(multipart_request("resume.txt", "text/plain", b"plain text"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_oversize_is_400() {
        let big = vec![b'a'; MAX_FILE_SIZE + 1];
        let response = app_with(None, no_retry())
            .oneshot(multipart_request("resume.pdf", PDF_MIME, &big))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "파일 크기는 5MB 이하여야 합니다"
        );
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_400() {
        let huge = vec![b'a'; BODY_LIMIT + 1024 * 1024];
        let response = app_with(None, no_retry())
            .oneshot(multipart_request("resume.pdf", PDF_MIME, &huge))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "파일 크기는 5MB 이하여야 합니다"
        );
    }

    #[tokio::test]
    async fn test_upload_unreadable_document_is_422() {
        let response = app_with(None, no_retry())
            .oneshot(multipart_request("resume.docx", DOCX_MIME, b"not a zip at all"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_400() {
        let boundary = "myoi-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"note\"\r\n\r\n\
             no file here\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/upload-resume")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app_with(None, no_retry()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_without_multipart_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/upload-resume")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app_with(None, no_retry()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
