//! Single dispatch path for all four analyses: precondition check, request
//! assembly, one generator call. No retries, no caching, no shared state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::action::AnalysisAction;
use crate::analysis::request::GenerationRequest;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Which required input was absent when an action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Resume,
    JobDescription,
}

impl MissingInput {
    pub fn user_message(self) -> &'static str {
        match self {
            MissingInput::Resume => "Please upload your resume to proceed.",
            MissingInput::JobDescription => "Please provide a job description to proceed.",
        }
    }
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::Resume => f.write_str("resume text"),
            MissingInput::JobDescription => f.write_str("job description"),
        }
    }
}

/// Generated text for one action, rendered under the action's heading.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub request_id: Uuid,
    pub action: AnalysisAction,
    pub heading: String,
    pub text: String,
    /// Length of `text` in characters, not bytes.
    pub char_count: usize,
    pub generated_at: DateTime<Utc>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Runs one analysis.
///
/// Resume presence is checked before the job description; either missing
/// short-circuits with `MissingInput` and the generator is never called.
/// The generator's text is returned verbatim.
pub async fn run_analysis(
    generator: &dyn TextGenerator,
    action: AnalysisAction,
    job_description: Option<&str>,
    resume_text: Option<&str>,
) -> Result<AnalysisResult, AppError> {
    let Some(resume_text) = present(resume_text) else {
        warn!("Action '{action}' triggered without a resume; skipping generation");
        return Err(MissingInput::Resume.into());
    };
    let Some(job_description) = present(job_description) else {
        warn!("Action '{action}' triggered without a job description; skipping generation");
        return Err(MissingInput::JobDescription.into());
    };

    let request_id = Uuid::new_v4();
    info!(%request_id, "{}", action.progress_label());

    let request = GenerationRequest::assemble(action, job_description, resume_text);
    let text = generator.generate(&request).await?;
    let char_count = text.chars().count();

    info!(%request_id, "Action '{action}' completed ({char_count} chars)");

    Ok(AnalysisResult {
        request_id,
        action,
        heading: action.heading().to_string(),
        text,
        char_count,
        generated_at: Utc::now(),
    })
}
