use chrono::{DateTime, Utc};
use serde::Serialize;

use super::analysis::AnalysisResult;
use super::classifier::{classify, ScoreCategory};
use crate::workflows::candidates::Candidate;

/// Downloadable snapshot of one analysis. Building it never touches the candidate store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub candidate: Candidate,
    pub analysis: AnalysisResult,
    pub category: ScoreCategory,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(candidate: Candidate, analysis: AnalysisResult, generated_at: DateTime<Utc>) -> Self {
        let category = classify(i32::from(analysis.overall_score));
        Self {
            candidate,
            analysis,
            category,
            generated_at,
        }
    }

    /// `resume-analysis-<name with whitespace runs as dashes, lowercased>.json`
    pub fn file_name(&self) -> String {
        let slug = self
            .candidate
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        format!("resume-analysis-{slug}.json")
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
