use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::analysis::{
    InterviewAnalysis, InterviewAnalysisError, InterviewAnalysisRequest, InterviewAnalyzer,
};
use crate::settings::SettingsStore;
use crate::storage::KeyValueStore;
use crate::workflows::screening::ScoreVerdict;

/// Interview analysis judged against the stored cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewReview {
    pub analysis: InterviewAnalysis,
    pub verdict: ScoreVerdict,
}

/// Runs transcripts through an [`InterviewAnalyzer`] and applies the configured cutoff.
pub struct InterviewReviewer<A: ?Sized = dyn InterviewAnalyzer, B: ?Sized = dyn KeyValueStore> {
    analyzer: Arc<A>,
    settings: Arc<SettingsStore<B>>,
}

impl<A, B> InterviewReviewer<A, B>
where
    A: InterviewAnalyzer + ?Sized,
    B: KeyValueStore + ?Sized,
{
    pub fn new(analyzer: Arc<A>, settings: Arc<SettingsStore<B>>) -> Self {
        Self { analyzer, settings }
    }

    pub fn review(
        &self,
        request: &InterviewAnalysisRequest,
    ) -> Result<InterviewReview, InterviewAnalysisError> {
        let cutoff = self.settings.load().cutoff_score;
        let analysis = self.analyzer.analyze(request).map_err(|err| {
            warn!(candidate = %request.candidate_name, error = %err, "interview analysis failed");
            err
        })?;
        let verdict = analysis.verdict(cutoff);

        info!(
            candidate = %request.candidate_name,
            score = verdict.score,
            cutoff = verdict.cutoff,
            selected = verdict.selected,
            "interview reviewed"
        );
        Ok(InterviewReview { analysis, verdict })
    }
}
