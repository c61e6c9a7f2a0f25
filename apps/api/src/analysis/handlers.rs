use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::handlers::{extract_upload, read_upload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// Missing text is treated as empty input, not an error.
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeAnalysisResponse {
    pub text: String,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    pub html: String,
}

/// Runs the analyzer on the blocking pool.
pub async fn run_analysis(state: &AppState, text: String) -> Result<(String, AnalysisResult), AppError> {
    let analyzer = state.analyzer.clone();
    tokio::task::spawn_blocking(move || {
        let result = analyzer.analyze(&text);
        (text, result)
    })
    .await
    .map_err(|e| AppError::join("analysis", e))
}

/// POST /api/v1/analyze (also served at /analyze/)
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let (_, result) = run_analysis(&state, req.text).await?;
    info!(
        "Analysis complete: {} passive, {} suggestion(s)",
        result.passive_sents.len(),
        result.suggestions.len()
    );
    Ok(Json(result))
}

/// POST /api/v1/resume
/// Upload → extraction → analysis in one request.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeAnalysisResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_upload(upload).await?;
    let (text, analysis) = run_analysis(&state, text).await?;
    Ok(Json(ResumeAnalysisResponse { text, analysis }))
}

/// POST /api/v1/highlight
pub async fn handle_highlight(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<HighlightResponse>, AppError> {
    let html = state.analyzer.highlight(&req.text);
    Ok(Json(HighlightResponse { html }))
}
