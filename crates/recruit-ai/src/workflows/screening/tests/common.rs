use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::settings::{Settings, SettingsStore};
use crate::storage::MemoryStore;
use crate::workflows::candidates::{Candidate, CandidateDraft, CandidateStore};
use crate::workflows::screening::{
    AnalysisError, AnalysisProvider, AnalysisRequest, AnalysisResult, EmailMessage, EmailReceipt,
    KeywordAnalysisProvider, MailError, Mailer, ScreeningService,
};

/// Resume that scores 73 against [`platform_requirements`].
pub(super) const PLATFORM_RESUME: &str =
    "Rust services on Kafka. More Rust, more Kafka, no container work yet.";

pub(super) fn platform_requirements() -> Vec<String> {
    ["Rust", "Kafka", "Kubernetes"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Mailer that keeps every message it is handed.
#[derive(Default)]
pub(super) struct RecordingMailer {
    pub(super) sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub(super) fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &EmailMessage) -> Result<EmailReceipt, MailError> {
        self.sent.lock().expect("mailer lock").push(message.clone());
        Ok(EmailReceipt {
            accepted_for: message.to.clone(),
        })
    }
}

pub(super) struct FailingMailer;

impl Mailer for FailingMailer {
    fn send(&self, _message: &EmailMessage) -> Result<EmailReceipt, MailError> {
        Err(MailError::Transport("smtp relay refused connection".to_string()))
    }
}

/// Provider that reports a fixed score and always claims the candidate is selected.
pub(super) struct FixedScoreProvider(pub(super) u8);

impl AnalysisProvider for FixedScoreProvider {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        Ok(AnalysisResult {
            overall_score: self.0,
            skill_scores: BTreeMap::from([("Python".to_string(), self.0 / 10)]),
            skill_reasoning: BTreeMap::new(),
            selected: true,
            reasoning: "fixed".to_string(),
            strengths: Vec::new(),
            improvement_areas: Vec::new(),
            recommendations: Vec::new(),
            cutoff_score: request.cutoff_score,
        })
    }
}

pub(super) struct Fixture<P: AnalysisProvider> {
    pub(super) candidates: Arc<CandidateStore<MemoryStore>>,
    pub(super) settings: Arc<SettingsStore<MemoryStore>>,
    pub(super) mailer: Arc<RecordingMailer>,
    pub(super) service: ScreeningService<P, RecordingMailer, MemoryStore>,
}

pub(super) fn fixture_with<P: AnalysisProvider>(provider: P) -> Fixture<P> {
    let backend = Arc::new(MemoryStore::new());
    let candidates = Arc::new(CandidateStore::open(backend.clone()));
    let settings = Arc::new(SettingsStore::open(backend));
    let mailer = Arc::new(RecordingMailer::default());
    let service = ScreeningService::new(
        candidates.clone(),
        settings.clone(),
        Arc::new(provider),
        mailer.clone(),
    );
    Fixture {
        candidates,
        settings,
        mailer,
        service,
    }
}

pub(super) fn fixture() -> Fixture<KeywordAnalysisProvider> {
    fixture_with(KeywordAnalysisProvider)
}

impl<P: AnalysisProvider> Fixture<P> {
    pub(super) fn configure(&self, cutoff_score: u8, auto_email: bool) {
        self.settings
            .save(Settings {
                cutoff_score,
                auto_email,
                ..Settings::default()
            })
            .expect("settings saved");
    }

    pub(super) fn platform_engineer(&self) -> Candidate {
        self.candidates
            .create(
                CandidateDraft::new("Linus Byte", "linus@x.com", "Platform Engineer")
                    .with_resume_text(PLATFORM_RESUME),
            )
            .expect("candidate created")
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
