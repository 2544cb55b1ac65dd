use crate::config::ConfigError;
use crate::settings::SettingsError;
use crate::storage::StorageError;
use crate::telemetry::TelemetryError;
use crate::workflows::candidates::CandidateStoreError;
use crate::workflows::interviews::{InterviewAnalysisError, InterviewError};
use crate::workflows::screening::ScreeningError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Missing or out-of-range input rejected at a store boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {problem}")]
pub struct ValidationError {
    pub field: &'static str,
    pub problem: String,
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            problem: "is required".to_string(),
        }
    }

    pub fn invalid(field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            field,
            problem: problem.into(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Storage(StorageError),
    Candidates(CandidateStoreError),
    Settings(SettingsError),
    Screening(ScreeningError),
    Interviews(InterviewError),
    InterviewAnalysis(InterviewAnalysisError),
    Export(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Candidates(err) => write!(f, "candidate error: {}", err),
            AppError::Settings(err) => write!(f, "settings error: {}", err),
            AppError::Screening(err) => write!(f, "screening error: {}", err),
            AppError::Interviews(err) => write!(f, "interview error: {}", err),
            AppError::InterviewAnalysis(err) => write!(f, "interview analysis error: {}", err),
            AppError::Export(detail) => write!(f, "export error: {}", detail),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Candidates(err) => Some(err),
            AppError::Settings(err) => Some(err),
            AppError::Screening(err) => Some(err),
            AppError::Interviews(err) => Some(err),
            AppError::InterviewAnalysis(err) => Some(err),
            AppError::Export(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Candidates(CandidateStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Candidates(CandidateStoreError::Validation(_))
            | AppError::Settings(SettingsError::Validation(_))
            | AppError::Interviews(InterviewError::Validation(_))
            | AppError::InterviewAnalysis(
                InterviewAnalysisError::EmptyTranscript | InterviewAnalysisError::NoQuestions,
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InterviewAnalysis(InterviewAnalysisError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Storage(_)
            | AppError::Candidates(_)
            | AppError::Settings(_)
            | AppError::Screening(_)
            | AppError::Interviews(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CandidateStoreError> for AppError {
    fn from(value: CandidateStoreError) -> Self {
        Self::Candidates(value)
    }
}

impl From<SettingsError> for AppError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

impl From<ScreeningError> for AppError {
    fn from(value: ScreeningError) -> Self {
        Self::Screening(value)
    }
}

impl From<InterviewError> for AppError {
    fn from(value: InterviewError) -> Self {
        Self::Interviews(value)
    }
}

impl From<InterviewAnalysisError> for AppError {
    fn from(value: InterviewAnalysisError) -> Self {
        Self::InterviewAnalysis(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Export(value.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value.to_string())
    }
}
