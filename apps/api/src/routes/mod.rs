pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::analysis::handlers as analysis;
use crate::extraction::handlers as extraction;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction
        .route("/api/v1/extract", post(extraction::handle_extract))
        // Analysis
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/analyze/", post(analysis::handle_analyze))
        .route("/api/v1/resume", post(analysis::handle_resume_upload))
        .route("/api/v1/highlight", post(analysis::handle_highlight))
        // Report
        .route("/api/v1/report", post(report::handle_report))
        .route("/api/v1/resume/report", post(report::handle_resume_report))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::tests::default_analyzer;
    use crate::config::Config;
    use crate::report::default_page_config;

    const BOUNDARY: &str = "tone-analyzer-test-boundary";

    fn test_router() -> Router {
        build_router(AppState {
            config: Config::default(),
            analyzer: Arc::new(default_analyzer()),
            page_config: default_page_config(),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> Response {
        test_router().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const RESUME: &str = "Responsible for the budget. The roadmap was approved by leadership.\n\
                          • Helped onboard new hires";

    #[tokio::test]
    async fn test_health() {
        let response = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "tone-analyzer");
    }

    #[tokio::test]
    async fn test_analyze_returns_all_three_artifacts() {
        let response = send(json_request("/api/v1/analyze", json!({ "text": RESUME }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["sentiment"]["VADER"]["compound"].is_number());
        assert!(json["sentiment"]["Polarity"].is_number());
        assert!(json["sentiment"]["Subjectivity"].is_number());
        assert_eq!(
            json["passive_sents"],
            json!(["The roadmap was approved by leadership."])
        );
        assert_eq!(
            json["suggestions"],
            json!([
                "Replace 'responsible for' → 'led'",
                "Replace 'helped' → 'contributed to'"
            ])
        );
    }

    #[tokio::test]
    async fn test_analyze_legacy_path_matches() {
        let current = body_json(send(json_request("/api/v1/analyze", json!({ "text": RESUME }))).await).await;
        let legacy = body_json(send(json_request("/analyze/", json!({ "text": RESUME }))).await).await;
        assert_eq!(current, legacy);
    }

    #[tokio::test]
    async fn test_analyze_empty_and_missing_text() {
        for body in [json!({ "text": "" }), json!({})] {
            let response = send(json_request("/api/v1/analyze", body)).await;
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["passive_sents"], json!([]));
            assert_eq!(json["suggestions"], json!([]));
            assert_eq!(json["sentiment"]["VADER"]["compound"], json!(0.0));
        }
    }

    #[tokio::test]
    async fn test_extract_plain_text() {
        let response = send(multipart_request(
            "/api/v1/extract",
            "text/plain; charset=utf-8",
            RESUME.as_bytes(),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["text"], RESUME);
        assert_eq!(json["content_type"], "text/plain");
        assert_eq!(json["chars"], json!(RESUME.chars().count()));
    }

    #[tokio::test]
    async fn test_extract_pdf() {
        let pdf = crate::extraction::pdf::tests::build_pdf(&[Some("Led a team of five")]);
        let response = send(multipart_request("/api/v1/extract", "application/pdf", &pdf)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["text"].as_str().unwrap().contains("Led a team of five"));
        assert_eq!(json["content_type"], "application/pdf");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_415() {
        let response = send(multipart_request("/api/v1/resume", "image/png", b"\x89PNG")).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_422() {
        let response = send(multipart_request(
            "/api/v1/resume",
            "application/pdf",
            b"definitely not a pdf",
        ))
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let response = send(
            Request::builder()
                .method("POST")
                .uri("/api/v1/resume")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(format!("--{BOUNDARY}--\r\n")))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_and_json_analysis_agree() {
        let upload = body_json(
            send(multipart_request("/api/v1/resume", "text/plain", RESUME.as_bytes())).await,
        )
        .await;
        let direct = body_json(send(json_request("/api/v1/analyze", json!({ "text": RESUME }))).await).await;
        assert_eq!(upload["text"], RESUME);
        assert_eq!(upload["analysis"], direct);
    }

    #[tokio::test]
    async fn test_highlight() {
        let response = send(json_request(
            "/api/v1/highlight",
            json!({ "text": "Helped ship\nit was done" }),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_json(response).await["html"].as_str().unwrap().to_string();
        assert!(html.contains("class=\"weak-phrase\""));
        assert!(html.contains("class=\"passive-marker\""));
        assert!(html.contains("<br>"));
    }

    #[tokio::test]
    async fn test_report_is_pdf_attachment() {
        let response = send(json_request("/api/v1/report", json!({ "text": RESUME }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume_tone_report.pdf\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_resume_report_from_upload() {
        let response = send(multipart_request(
            "/api/v1/resume/report",
            "text/plain",
            RESUME.as_bytes(),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let router = build_router(AppState {
            config: Config {
                max_upload_bytes: 64,
                ..Config::default()
            },
            analyzer: Arc::new(default_analyzer()),
            page_config: default_page_config(),
        });
        let response = router
            .oneshot(json_request("/api/v1/analyze", json!({ "text": "x".repeat(1024) })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
