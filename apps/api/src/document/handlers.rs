//! Axum route handlers for document extraction.

use anyhow::Context;
use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::analysis::dispatch::MissingInput;
use crate::document::extract::{extract_text, ExtractedText, UploadedDocument};
use crate::document::upload::read_upload_form;
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub file_name: String,
    pub text: String,
    pub char_count: usize,
}

/// Runs extraction on the blocking pool; `pdf-extract` is CPU-bound.
pub async fn extract_in_background(document: UploadedDocument) -> Result<ExtractedText, AppError> {
    let file_name = document.file_name.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .context("PDF extraction task failed")??;

    info!(
        "Extracted {} chars from '{file_name}'",
        text.as_str().chars().count()
    );
    Ok(text)
}

/// POST /api/v1/documents/extract
///
/// Extracts the text of the uploaded `resume` PDF so a client can reuse it
/// across several analyses without re-uploading.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let document = form.resume.ok_or(MissingInput::Resume)?;
    let file_name = document.file_name.clone();

    let text = extract_in_background(document).await?.into_inner();

    Ok(Json(ExtractResponse {
        file_name,
        char_count: text.chars().count(),
        text,
    }))
}
