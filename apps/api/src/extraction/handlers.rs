use axum::extract::Multipart;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, ContentKind};

/// Multipart field carrying the resume.
pub const UPLOAD_FIELD: &str = "file";

/// A classified upload, ready for extraction.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub kind: ContentKind,
    pub data: Bytes,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub content_type: ContentKind,
    pub chars: usize,
}

/// Pulls the `file` field out of a multipart body and classifies it by declared type.
///
/// Unsupported types are rejected here, before any bytes reach an extractor.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let declared = field.content_type().unwrap_or_default().to_string();
        let kind = ContentKind::from_declared(&declared)?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok(UploadedFile {
            file_name,
            kind,
            data,
        });
    }
    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// Runs extraction on the blocking pool.
pub async fn extract_upload(upload: UploadedFile) -> Result<String, AppError> {
    let UploadedFile {
        file_name,
        kind,
        data,
    } = upload;
    let text = tokio::task::spawn_blocking(move || extract_text(kind, &data))
        .await
        .map_err(|e| AppError::join("extraction", e))??;
    info!(
        "Extracted {} chars from {} ({:?})",
        text.chars().count(),
        file_name.as_deref().unwrap_or("<unnamed>"),
        kind
    );
    Ok(text)
}

/// POST /api/v1/extract
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let content_type = upload.kind;
    let text = extract_upload(upload).await?;
    Ok(Json(ExtractResponse {
        chars: text.chars().count(),
        text,
        content_type,
    }))
}
