use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::settings::{Settings, SettingsStore};
use crate::storage::MemoryStore;
use crate::workflows::interviews::{
    InterviewAnalysis, InterviewAnalysisError, InterviewAnalysisRequest, InterviewAnalyzer,
    InterviewReviewer, TranscriptAnalyzer,
};
use crate::workflows::screening::classify;

/// Three complete Java answers, two of them hedged. Scores 85.
pub(super) const JAVA_SCREEN: &str = "\
Interviewer: How would you rate your Java?

Candidate: I think about six and a half out of ten, mostly from backend work.

Interviewer: Fine. Explain the difference between the JDK, the JVM and the JRE.

Candidate: The JDK is basically the toolkit with the compiler and the JRE inside it. The JVM
basically runs bytecode, and the JRE is basically the JVM plus the standard libraries.
I think that covers the main difference.

Interviewer: Does Java have pointers?

Candidate: Java has references rather than raw pointers, and the garbage collector takes care of memory allocation for you.";

/// Two solid answers and a non-answer to the closing question. Scores 77.
pub(super) const PLATFORM_CHAT: &str = "\
Interviewer: Tell me about yourself.
Candidate: I build payment services in Rust and run them on Kubernetes for a large bank.
Interviewer: How do you handle retries?
Candidate: Idempotency keys on every request, exponential backoff with jitter, and a dead letter queue.
Interviewer: Do you have any questions for us?
Candidate: I don't know.";

pub(super) fn java_request() -> InterviewAnalysisRequest {
    InterviewAnalysisRequest::new("Ravi Kumar", JAVA_SCREEN)
}

pub(super) fn platform_request() -> InterviewAnalysisRequest {
    InterviewAnalysisRequest::new("Ada Lovelace", PLATFORM_CHAT)
}

/// Analyzer that reports a fixed overall score with no exchanges.
pub(super) struct FixedAnalyzer(pub(super) u8);

impl InterviewAnalyzer for FixedAnalyzer {
    fn analyze(
        &self,
        request: &InterviewAnalysisRequest,
    ) -> Result<InterviewAnalysis, InterviewAnalysisError> {
        Ok(InterviewAnalysis {
            overall_score: self.0,
            confidence: 1.0,
            communication_score: self.0,
            technical_score: self.0,
            category: classify(i32::from(self.0)),
            transcript: request.transcript.clone(),
            sentiment: Default::default(),
            qa_pairs: Vec::new(),
            key_insights: Vec::new(),
            time_breakdown: Default::default(),
            summary: String::new(),
        })
    }
}

pub(super) struct OfflineAnalyzer;

impl InterviewAnalyzer for OfflineAnalyzer {
    fn analyze(
        &self,
        _request: &InterviewAnalysisRequest,
    ) -> Result<InterviewAnalysis, InterviewAnalysisError> {
        Err(InterviewAnalysisError::Unavailable(
            "speech model not loaded".to_string(),
        ))
    }
}

pub(super) fn settings_with_cutoff(cutoff: u8) -> Arc<SettingsStore<MemoryStore>> {
    let settings = Arc::new(SettingsStore::open(Arc::new(MemoryStore::new())));
    settings
        .save(Settings {
            cutoff_score: cutoff,
            ..Settings::default()
        })
        .expect("seed settings");
    settings
}

pub(super) fn transcript_reviewer(
    cutoff: u8,
) -> InterviewReviewer<TranscriptAnalyzer, MemoryStore> {
    InterviewReviewer::new(Arc::new(TranscriptAnalyzer), settings_with_cutoff(cutoff))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
