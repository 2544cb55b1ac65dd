use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tracked candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Pipeline stage a candidate currently sits in. Serialized lowercase; decoded through
/// [`FromStr`], so `"Hired"` and `" hired "` are accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CandidateStatus {
    #[default]
    New,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 6] = [
        CandidateStatus::New,
        CandidateStatus::Screening,
        CandidateStatus::Interview,
        CandidateStatus::Offer,
        CandidateStatus::Hired,
        CandidateStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Screening => "screening",
            CandidateStatus::Interview => "interview",
            CandidateStatus::Offer => "offer",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown candidate status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for CandidateStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        CandidateStatus::ALL
            .into_iter()
            .find(|status| status.label() == wanted)
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

impl TryFrom<String> for CandidateStatus {
    type Error = UnknownStatus;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Persisted candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(alias = "role")]
    pub position: String,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    pub applied_date: DateTime<Utc>,
}

/// Intake form payload; validated by the store before a record exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "role")]
    pub position: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CandidateDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_resume_text(mut self, text: impl Into<String>) -> Self {
        self.resume_text = Some(text.into());
        self
    }
}

/// Outcome of an analysis run written back onto the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisUpdate {
    pub score: u8,
    pub skills: Vec<String>,
    pub status: CandidateStatus,
    pub resume_text: Option<String>,
}

/// Status restriction applied by [`CandidateFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CandidateStatus),
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        raw.parse().map(StatusFilter::Only)
    }
}

/// Search text (case-insensitive, any of name/email/position) ANDed with a status restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    pub search_text: Option<String>,
    pub status: StatusFilter,
}

impl CandidateFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn status(mut self, status: CandidateStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => candidate.status == status,
        };

        matches_status && self.matches_search(candidate)
    }

    fn matches_search(&self, candidate: &Candidate) -> bool {
        let Some(text) = &self.search_text else {
            return true;
        };
        let needle = text.to_lowercase();
        [&candidate.name, &candidate.email, &candidate.position]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Count of candidates sitting in one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub status: CandidateStatus,
    pub count: usize,
}

/// Pipeline overview in stage order, plus the mean of the stored scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub total: usize,
    pub stages: Vec<StageCount>,
    /// Candidates carrying a score.
    pub scored: usize,
    /// Rounded mean over `scored`; `None` until someone has been screened.
    pub average_score: Option<u8>,
}

impl PipelineSummary {
    pub(crate) fn from_candidates(candidates: &[Candidate]) -> Self {
        let stages = CandidateStatus::ALL
            .into_iter()
            .map(|status| StageCount {
                status,
                count: candidates
                    .iter()
                    .filter(|candidate| candidate.status == status)
                    .count(),
            })
            .collect();

        let scores: Vec<u32> = candidates
            .iter()
            .filter_map(|candidate| candidate.score.map(u32::from))
            .collect();
        let scored = scores.len();
        let average_score = match u32::try_from(scored) {
            Ok(count) if count > 0 => {
                let total: u32 = scores.iter().sum();
                u8::try_from((total + count / 2) / count).ok()
            }
            _ => None,
        };

        Self {
            total: candidates.len(),
            stages,
            scored,
            average_score,
        }
    }

    pub fn count(&self, status: CandidateStatus) -> usize {
        self.stages
            .iter()
            .find(|stage| stage.status == status)
            .map(|stage| stage.count)
            .unwrap_or(0)
    }
}
