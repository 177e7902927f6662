//! The four analyses a user can request. One enum replaces four independent
//! "button clicked" flags, so every action goes through the same dispatch path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{
    COVER_LETTER_PROMPT, FIT_REVIEW_PROMPT, MATCH_SCORE_PROMPT, TAILORED_RESUME_PROMPT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisAction {
    FitReview,
    MatchScore,
    CoverLetter,
    TailoredResume,
}

impl AnalysisAction {
    pub const ALL: [AnalysisAction; 4] = [
        AnalysisAction::FitReview,
        AnalysisAction::MatchScore,
        AnalysisAction::CoverLetter,
        AnalysisAction::TailoredResume,
    ];

    /// Wire name, as used in JSON bodies and the multipart `action` field.
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisAction::FitReview => "fit_review",
            AnalysisAction::MatchScore => "match_score",
            AnalysisAction::CoverLetter => "cover_letter",
            AnalysisAction::TailoredResume => "tailored_resume",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            AnalysisAction::FitReview => FIT_REVIEW_PROMPT,
            AnalysisAction::MatchScore => MATCH_SCORE_PROMPT,
            AnalysisAction::CoverLetter => COVER_LETTER_PROMPT,
            AnalysisAction::TailoredResume => TAILORED_RESUME_PROMPT,
        }
    }

    /// Heading the result is rendered under.
    pub fn heading(self) -> &'static str {
        match self {
            AnalysisAction::FitReview => "Resume Analysis",
            AnalysisAction::MatchScore => "Match Percentage & Recommendations",
            AnalysisAction::CoverLetter => "Tailored Cover Letter",
            AnalysisAction::TailoredResume => "Tailored Resume",
        }
    }

    pub fn progress_label(self) -> &'static str {
        match self {
            AnalysisAction::FitReview => "Analyzing resume...",
            AnalysisAction::MatchScore => "Calculating match percentage...",
            AnalysisAction::CoverLetter => "Generating cover letter...",
            AnalysisAction::TailoredResume => "Generating tailored resume...",
        }
    }
}

impl fmt::Display for AnalysisAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AnalysisAction::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = AnalysisAction::ALL.iter().map(|a| a.as_str()).collect();
                format!("Unknown action '{s}'. Expected one of: {}", known.join(", "))
            })
    }
}
