use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::analysis::{AnalysisError, AnalysisProvider, AnalysisRequest, AnalysisResult};
use super::classifier::{ScoreCategory, ScoreVerdict};
use super::notification::{compose_result_email, EmailResult, Mailer};
use super::report::AnalysisReport;
use crate::settings::SettingsStore;
use crate::storage::KeyValueStore;
use crate::workflows::candidates::{
    AnalysisUpdate, Candidate, CandidateId, CandidateStatus, CandidateStore, CandidateStoreError,
};

/// Per-call screening options. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreeningRequest {
    /// Replaces the stored resume text for this run and is persisted with the result.
    pub resume_text: Option<String>,
    pub role_requirements: Vec<String>,
    /// Overrides the `autoEmail` setting when present.
    pub notify: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningOutcome {
    pub candidate: Candidate,
    pub analysis: AnalysisResult,
    pub category: ScoreCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailResult>,
}

impl ScreeningOutcome {
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::new(self.candidate.clone(), self.analysis.clone(), Utc::now())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Candidates(#[from] CandidateStoreError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Runs one candidate through analysis, scoring, status update, and notification.
pub struct ScreeningService<
    P: ?Sized = dyn AnalysisProvider,
    M: ?Sized = dyn Mailer,
    B: ?Sized = dyn KeyValueStore,
> {
    candidates: Arc<CandidateStore<B>>,
    settings: Arc<SettingsStore<B>>,
    provider: Arc<P>,
    mailer: Arc<M>,
}

impl<P, M, B> ScreeningService<P, M, B>
where
    P: AnalysisProvider + ?Sized,
    M: Mailer + ?Sized,
    B: KeyValueStore + ?Sized,
{
    pub fn new(
        candidates: Arc<CandidateStore<B>>,
        settings: Arc<SettingsStore<B>>,
        provider: Arc<P>,
        mailer: Arc<M>,
    ) -> Self {
        Self {
            candidates,
            settings,
            provider,
            mailer,
        }
    }

    pub fn screen(
        &self,
        id: &CandidateId,
        request: ScreeningRequest,
    ) -> Result<ScreeningOutcome, ScreeningError> {
        let candidate = self.candidates.get(id)?;
        let settings = self.settings.load();

        let supplied_text = request
            .resume_text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let resume_text = supplied_text
            .clone()
            .or_else(|| candidate.resume_text.clone())
            .unwrap_or_default();

        let mut analysis = self.provider.analyze(&AnalysisRequest {
            candidate_name: candidate.name.clone(),
            role: candidate.position.clone(),
            resume_text,
            role_requirements: request.role_requirements,
            cutoff_score: settings.cutoff_score,
        })?;

        // The provider's own verdict is advisory; selection always follows the stored cutoff.
        let verdict = ScoreVerdict::new(analysis.overall_score, settings.cutoff_score);
        analysis.selected = verdict.selected;
        analysis.cutoff_score = verdict.cutoff;

        let status = if verdict.selected {
            CandidateStatus::Screening
        } else {
            CandidateStatus::Rejected
        };
        let candidate = self.candidates.record_analysis(
            id,
            AnalysisUpdate {
                score: verdict.score,
                skills: analysis.ranked_skills(),
                status,
                resume_text: supplied_text,
            },
        )?;
        info!(
            candidate_id = %candidate.id,
            score = verdict.score,
            cutoff = verdict.cutoff,
            category = %verdict.category,
            selected = verdict.selected,
            "candidate screened"
        );

        let email = request
            .notify
            .unwrap_or(settings.auto_email)
            .then(|| self.notify(&candidate, verdict));

        Ok(ScreeningOutcome {
            candidate,
            analysis,
            category: verdict.category,
            email,
        })
    }

    fn notify(&self, candidate: &Candidate, verdict: ScoreVerdict) -> EmailResult {
        let message = compose_result_email(
            &candidate.name,
            &candidate.email,
            &candidate.position,
            verdict.score,
            verdict.selected,
        );

        match self.mailer.send(&message) {
            Ok(receipt) => EmailResult {
                success: true,
                message: format!("Result email sent to {}", receipt.accepted_for),
                email_sent_to: Some(receipt.accepted_for),
            },
            Err(err) => {
                warn!(candidate_id = %candidate.id, error = %err, "result email failed");
                EmailResult {
                    success: false,
                    message: err.to_string(),
                    email_sent_to: None,
                }
            }
        }
    }
}
