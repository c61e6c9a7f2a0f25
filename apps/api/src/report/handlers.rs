use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::analysis::handlers::{run_analysis, TextRequest};
use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::handlers::{extract_upload, read_upload};
use crate::report::{render_report, REPORT_FILENAME};
use crate::state::AppState;

const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Renders on the blocking pool and wraps the bytes as a file download.
async fn report_response(
    state: &AppState,
    text: String,
    analysis: AnalysisResult,
) -> Result<Response, AppError> {
    let config = state.page_config.clone();
    let generated_at = chrono::Local::now().naive_local();
    let bytes = tokio::task::spawn_blocking(move || {
        render_report(&text, &analysis, generated_at, &config)
    })
    .await
    .map_err(|e| AppError::join("report rendering", e))??;

    info!("Report rendered: {} bytes", bytes.len());

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{REPORT_FILENAME}\""))
        .map_err(|e| AppError::Report(e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_MEDIA_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/report
pub async fn handle_report(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Response, AppError> {
    let (text, analysis) = run_analysis(&state, req.text).await?;
    report_response(&state, text, analysis).await
}

/// POST /api/v1/resume/report
/// Upload → extraction → analysis → report in one request.
pub async fn handle_resume_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_upload(upload).await?;
    let (text, analysis) = run_analysis(&state, text).await?;
    report_response(&state, text, analysis).await
}
