use crate::analysis::action::AnalysisAction;
use crate::analysis::prompts::{JOB_DESCRIPTION_LABEL, RESUME_LABEL};

/// The ordered triple sent to the generator: instruction, labeled job
/// description, labeled resume text. Inputs are labeled, never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub action: AnalysisAction,
    instruction: &'static str,
    job_description: String,
    resume: String,
}

impl GenerationRequest {
    pub fn assemble(action: AnalysisAction, job_description: &str, resume_text: &str) -> Self {
        Self {
            action,
            instruction: action.instruction(),
            job_description: format!("{JOB_DESCRIPTION_LABEL}\n{job_description}"),
            resume: format!("{RESUME_LABEL}\n{resume_text}"),
        }
    }

    /// The three parts in wire order.
    pub fn parts(&self) -> [&str; 3] {
        [self.instruction, &self.job_description, &self.resume]
    }
}
