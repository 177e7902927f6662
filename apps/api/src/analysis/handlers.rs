//! Axum route handlers for the Analysis API.

use axum::{extract::Multipart, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::action::AnalysisAction;
use crate::analysis::dispatch::{run_analysis, AnalysisResult};
use crate::document::handlers::extract_in_background;
use crate::document::upload::{read_upload_form, ACTION_FIELD};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub action: AnalysisAction,
    pub heading: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub action: AnalysisAction,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/analysis/actions
pub async fn handle_list_actions() -> Json<Vec<ActionInfo>> {
    Json(
        AnalysisAction::ALL
            .into_iter()
            .map(|action| ActionInfo {
                action,
                heading: action.heading(),
            })
            .collect(),
    )
}

/// POST /api/v1/analysis
///
/// One-shot flow: multipart `job_description`, `action` and `resume` (PDF).
/// An uploaded resume is extracted first; extraction errors win over
/// missing-input errors.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = read_upload_form(multipart).await?;

    let action: AnalysisAction = form
        .action
        .as_deref()
        .ok_or_else(|| AppError::Validation(format!("'{ACTION_FIELD}' field is required")))?
        .parse()
        .map_err(AppError::Validation)?;

    let resume_text = match form.resume {
        Some(document) => Some(extract_in_background(document).await?.into_inner()),
        None => None,
    };

    let result = run_analysis(
        state.generator.as_ref(),
        action,
        form.job_description.as_deref(),
        resume_text.as_deref(),
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/analysis/text
///
/// Same analysis over text previously returned by `/api/v1/documents/extract`.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = run_analysis(
        state.generator.as_ref(),
        request.action,
        request.job_description.as_deref(),
        request.resume_text.as_deref(),
    )
    .await?;

    Ok(Json(result))
}
