use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::classifier::{classify, decide_selection, ScoreCategory};
use super::roles::requirements_for;

const MATCHED_SKILL_SCORE: u8 = 8;
const REPEATED_SKILL_SCORE: u8 = 10;
const MISSING_SKILL_SCORE: u8 = 2;
const MAX_STRENGTHS: usize = 5;
const MAX_IMPROVEMENT_AREAS: usize = 3;

/// Input handed to an [`AnalysisProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub candidate_name: String,
    pub role: String,
    pub resume_text: String,
    /// Overrides the built-in requirement list for `role` when non-empty.
    pub role_requirements: Vec<String>,
    pub cutoff_score: u8,
}

/// Session-scoped analysis output; callers decide whether any of it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub skill_scores: BTreeMap<String, u8>,
    pub skill_reasoning: BTreeMap<String, String>,
    pub selected: bool,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub recommendations: Vec<String>,
    pub cutoff_score: u8,
}

impl AnalysisResult {
    /// Skill names ordered by descending rating, ties by name.
    pub fn ranked_skills(&self) -> Vec<String> {
        let mut ranked: Vec<(&String, &u8)> = self.skill_scores.iter().collect();
        ranked.sort_by(|(a_name, a_score), (b_name, b_score)| {
            b_score.cmp(a_score).then_with(|| a_name.cmp(b_name))
        });
        ranked.into_iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Seam for the resume analysis engine.
pub trait AnalysisProvider: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("resume text is empty")]
    EmptyResume,
    #[error("no requirement list for role '{0}'")]
    UnknownRole(String),
    #[error("analysis engine unavailable: {0}")]
    Unavailable(String),
}

/// Deterministic stand-in for a model-backed analyzer.
///
/// Rates each role requirement by whole-word mentions in the resume text: 10 when repeated,
/// 8 when mentioned once, 2 when absent. The overall score is the mean rating scaled to 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalysisProvider;

impl AnalysisProvider for KeywordAnalysisProvider {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        if request.resume_text.trim().is_empty() {
            return Err(AnalysisError::EmptyResume);
        }

        let requirements: Vec<String> = if request.role_requirements.is_empty() {
            requirements_for(&request.role)
                .ok_or_else(|| AnalysisError::UnknownRole(request.role.clone()))?
                .iter()
                .map(|skill| skill.to_string())
                .collect()
        } else {
            request.role_requirements.clone()
        };

        let haystack = request.resume_text.to_lowercase();
        let mut skill_scores = BTreeMap::new();
        let mut skill_reasoning = BTreeMap::new();
        for skill in requirements.iter().map(|skill| skill.trim()) {
            if skill.is_empty() || skill_scores.contains_key(skill) {
                continue;
            }
            let mentions = count_mentions(&haystack, &skill.to_lowercase());
            let (score, reason) = match mentions {
                0 => (MISSING_SKILL_SCORE, "not found in the resume".to_string()),
                1 => (MATCHED_SKILL_SCORE, "mentioned once in the resume".to_string()),
                n => (REPEATED_SKILL_SCORE, format!("mentioned {n} times in the resume")),
            };
            skill_scores.insert(skill.to_string(), score);
            skill_reasoning.insert(skill.to_string(), reason);
        }

        if skill_scores.is_empty() {
            return Err(AnalysisError::UnknownRole(request.role.clone()));
        }

        let total: u32 = skill_scores.values().map(|score| u32::from(*score)).sum();
        let overall_score = ((total * 10) as f64 / skill_scores.len() as f64).round() as u8;
        let selected = decide_selection(i32::from(overall_score), i32::from(request.cutoff_score));

        let mut result = AnalysisResult {
            overall_score,
            skill_scores,
            skill_reasoning,
            selected,
            reasoning: String::new(),
            strengths: Vec::new(),
            improvement_areas: Vec::new(),
            recommendations: Vec::new(),
            cutoff_score: request.cutoff_score,
        };

        let ranked = result.ranked_skills();
        let (matched, missing): (Vec<&String>, Vec<&String>) = ranked
            .iter()
            .partition(|skill| result.skill_scores[skill.as_str()] > MISSING_SKILL_SCORE);

        result.strengths = matched
            .iter()
            .take(MAX_STRENGTHS)
            .map(|skill| format!("Demonstrated {skill} experience"))
            .collect();
        result.improvement_areas = missing
            .iter()
            .take(MAX_IMPROVEMENT_AREAS)
            .map(|skill| format!("No evidence of {skill}"))
            .collect();
        result.recommendations = recommendations(classify(i32::from(overall_score)), &missing);
        result.reasoning = format!(
            "{} of {} {} requirements appear in {}'s resume. Overall score {} is {} the cutoff of {}.",
            matched.len(),
            ranked.len(),
            request.role.trim(),
            request.candidate_name.trim(),
            overall_score,
            if selected { "at or above" } else { "below" },
            request.cutoff_score,
        );

        Ok(result)
    }
}

fn recommendations(category: ScoreCategory, missing: &[&String]) -> Vec<String> {
    let mut advice = vec![match category {
        ScoreCategory::Excellent => "Fast-track to a technical interview",
        ScoreCategory::Good => "Schedule a technical interview to validate skills",
        ScoreCategory::Fair => "Run a screening call before committing interview time",
        ScoreCategory::Poor => "Keep on file for roles with a closer skill match",
    }
    .to_string()];

    if let Some(gap) = missing.first() {
        advice.push(format!("Ask about {gap} experience in the next conversation"));
    }
    advice
}

/// Count whole-word occurrences of `needle` in `haystack` (both already lowercased).
pub(crate) fn count_mentions(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .match_indices(needle)
        .filter(|(start, matched)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + matched.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}
