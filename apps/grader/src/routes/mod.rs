pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};

use crate::errors::AppError;
use crate::grading::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler).fallback(not_found))
        // Grading API
        .route(
            "/api/grade",
            get(handlers::handle_grade_url)
                .post(handlers::handle_grade_upload)
                .fallback(not_found),
        )
        .route(
            "/api/feedback",
            get(handlers::handle_grade_url)
                .post(handlers::handle_grade_body)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::grading::document::tests::sample_pdf_by;
    use crate::grading::grader::tests::{grade, test_assets, CannedGrader};
    use crate::grading::grader::ResumeGrader;

    const BOUNDARY: &str = "X-GRADER-BOUNDARY";

    fn config(public_dir: PathBuf) -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            anthropic_api_url: "http://127.0.0.1:9/v1/messages".to_string(),
            template_url: "https://example.com/template".to_string(),
            training_dir: public_dir.clone(),
            public_dir,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn router_with(grader: Arc<dyn ResumeGrader>, public_dir: PathBuf) -> Router {
        build_router(AppState {
            config: config(public_dir),
            assets: Arc::new(test_assets()),
            grader,
            http: reqwest::Client::new(),
        })
    }

    fn router(grader: Arc<dyn ResumeGrader>) -> Router {
        router_with(grader, PathBuf::from("does-not-exist"))
    }

    fn multipart_body(field: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload(field: &str, data: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/grade")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field, data)))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(Arc::new(CannedGrader::returning(grade(&[], &[]))));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_multipart_upload_returns_sanitized_grade() {
        let grader = Arc::new(CannedGrader::returning(grade(
            &["Avoid gmail", "Two pages long"],
            &["Avoid hotmail, use gmail"],
        )));
        let pdf = sample_pdf_by("Jane");

        let response = router(grader.clone()).oneshot(upload("resume", &pdf)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["grade"], "A");
        assert_eq!(body["red_flags"], serde_json::json!(["Two pages long"]));
        assert_eq!(body["yellow_flags"], serde_json::json!(["Avoid hotmail, use gmail"]));
        assert_eq!(grader.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_rejected() {
        let grader = Arc::new(CannedGrader::returning(grade(&[], &[])));
        let response = router(grader.clone())
            .oneshot(upload("avatar", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No resume file uploaded");
        assert!(grader.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_raw_body_feedback() {
        let grader = Arc::new(CannedGrader::returning(grade(&["no metrics"], &[])));
        let request = Request::post("/api/feedback")
            .header(header::CONTENT_TYPE, "application/pdf")
            .body(Body::from(sample_pdf_by("Jane")))
            .unwrap();

        let response = router(grader).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["red_flags"][0], "no metrics");
    }

    #[tokio::test]
    async fn test_get_without_url_is_rejected() {
        let app = router(Arc::new(CannedGrader::returning(grade(&[], &[]))));
        let response = app
            .oneshot(Request::get("/api/grade").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "You must provide a PDF file or URL"
        );
    }

    #[tokio::test]
    async fn test_public_resume_is_cacheable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_resume.pdf"), sample_pdf_by("silver")).unwrap();
        let grader = Arc::new(CannedGrader::returning(grade(&[], &[])));

        let response = router_with(grader, dir.path().to_path_buf())
            .oneshot(
                Request::get("/api/feedback?url=public/a_resume.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_LOCATION],
            "public/a_resume.pdf"
        );
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=604800, stale-while-revalidate=604800"
        );
    }

    #[tokio::test]
    async fn test_model_failure_is_generic_error_payload() {
        let grader = Arc::new(CannedGrader::failing(|| {
            AppError::Llm("upstream 529".to_string())
        }));
        let response = router(grader)
            .oneshot(upload("resume", &sample_pdf_by("Jane")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Could not complete the call to the artificial intelligence"})
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = router(Arc::new(CannedGrader::returning(grade(&[], &[]))));
        let response = app
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_unsupported_method_is_json_not_found() {
        let app = router(Arc::new(CannedGrader::returning(grade(&[], &[]))));
        let response = app
            .oneshot(
                Request::put("/api/grade")
                    .body(Body::from(sample_pdf_by("Jane")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, serde_json::json!({"error": "Not Found"}));
    }

    #[tokio::test]
    async fn test_non_multipart_post_without_url_asks_for_file_or_url() {
        let grader = Arc::new(CannedGrader::returning(grade(&[], &[])));
        let request = Request::post("/api/grade")
            .header(header::CONTENT_TYPE, "application/pdf")
            .body(Body::from(sample_pdf_by("Jane")))
            .unwrap();

        let response = router(grader.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "You must provide a PDF file or URL"})
        );
        assert!(grader.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_multipart_post_uses_url_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_resume.pdf"), sample_pdf_by("Jane")).unwrap();
        let grader = Arc::new(CannedGrader::returning(grade(&["no metrics"], &[])));

        let request = Request::post("/api/grade?url=public/a_resume.pdf")
            .body(Body::empty())
            .unwrap();
        let response = router_with(grader.clone(), dir.path().to_path_buf())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["red_flags"][0], "no metrics");
        assert_eq!(grader.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_feedback_body_is_json_413() {
        let grader = Arc::new(CannedGrader::returning(grade(&[], &[])));
        let request = Request::post("/api/feedback")
            .header(header::CONTENT_TYPE, "application/pdf")
            .body(Body::from(vec![b'x'; 2 * 1024 * 1024]))
            .unwrap();

        let response = router(grader.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Uploaded file is too large"})
        );
        assert!(grader.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_multipart_upload_is_json_413() {
        let grader = Arc::new(CannedGrader::returning(grade(&[], &[])));
        let response = router(grader.clone())
            .oneshot(upload("resume", &vec![b'x'; 2 * 1024 * 1024]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"], "Uploaded file is too large");
        assert!(grader.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_path_with_control_character_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad\x01.pdf"), sample_pdf_by("Jane")).unwrap();
        let grader = Arc::new(CannedGrader::returning(grade(&[], &[])));

        let response = router_with(grader.clone(), dir.path().to_path_buf())
            .oneshot(
                Request::get("/api/grade?url=public/bad%01.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid public resume path"));
        assert!(grader.seen.lock().unwrap().is_empty());
    }
}
