use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use recruit_ai::config::{StorageConfig, StorageKind};
use recruit_ai::error::AppError;
use recruit_ai::settings::SettingsStore;
use recruit_ai::storage::{FileStore, KeyValueStore, MemoryStore};
use recruit_ai::workflows::candidates::{
    CandidateStatus, CandidateStore, PipelineSummary, StatusFilter, UnknownStatus,
};
use recruit_ai::workflows::interviews::{
    InterviewAnalyzer, InterviewBook, InterviewReviewer, TranscriptAnalyzer,
};
use recruit_ai::workflows::screening::{
    AnalysisProvider, KeywordAnalysisProvider, LogMailer, Mailer, ScreeningService,
};
use serde::Serialize;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every store the binary hands out, all sharing one backend.
#[derive(Clone)]
pub(crate) struct Stores {
    pub(crate) candidates: Arc<CandidateStore>,
    pub(crate) settings: Arc<SettingsStore>,
    pub(crate) interviews: Arc<InterviewBook>,
    pub(crate) screening: Arc<ScreeningService>,
    pub(crate) reviewer: Arc<InterviewReviewer>,
}

impl Stores {
    pub(crate) fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let candidates = Arc::new(CandidateStore::open(backend.clone()));
        let settings = Arc::new(SettingsStore::open(backend.clone()));
        let interviews = Arc::new(InterviewBook::open(backend));

        let provider: Arc<dyn AnalysisProvider> = Arc::new(KeywordAnalysisProvider);
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
        let screening = Arc::new(ScreeningService::new(
            candidates.clone(),
            settings.clone(),
            provider,
            mailer,
        ));

        let analyzer: Arc<dyn InterviewAnalyzer> = Arc::new(TranscriptAnalyzer);
        let reviewer = Arc::new(InterviewReviewer::new(analyzer, settings.clone()));

        Self {
            candidates,
            settings,
            interviews,
            screening,
            reviewer,
        }
    }

    pub(crate) fn from_config(config: &StorageConfig) -> Result<Self, AppError> {
        Ok(Self::open(open_backend(config)?))
    }

    pub(crate) fn dashboard(&self) -> Dashboard {
        Dashboard {
            pipeline: self.candidates.summary(),
            interviews_scheduled: self.interviews.list(None).len(),
        }
    }
}

/// Headline numbers: pipeline stages, average score, and booked interviews.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Dashboard {
    pub(crate) pipeline: PipelineSummary,
    pub(crate) interviews_scheduled: usize,
}

pub(crate) fn open_backend(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, AppError> {
    match config.kind {
        StorageKind::File => {
            let store = FileStore::open(&config.data_dir)?;
            info!(data_dir = %store.root().display(), "using file storage");
            Ok(Arc::new(store))
        }
        StorageKind::Memory => {
            info!("using in-memory storage; nothing survives the process");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String, AppError> {
    Ok(std::fs::read_to_string(path)?)
}

pub(crate) fn parse_status(raw: &str) -> Result<CandidateStatus, String> {
    raw.parse().map_err(|err: UnknownStatus| err.to_string())
}

pub(crate) fn parse_status_filter(raw: &str) -> Result<StatusFilter, String> {
    raw.parse().map_err(|err: UnknownStatus| err.to_string())
}
