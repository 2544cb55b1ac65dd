use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    #[default]
    Video,
    InPerson,
    Phone,
}

impl InterviewType {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewType::Video => "video",
            InterviewType::InPerson => "in-person",
            InterviewType::Phone => "phone",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interview type '{0}', expected video, in-person, or phone")]
pub struct UnknownInterviewType(pub String);

impl FromStr for InterviewType {
    type Err = UnknownInterviewType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "in-person" | "in_person" | "onsite" => Ok(Self::InPerson),
            "phone" => Ok(Self::Phone),
            _ => Err(UnknownInterviewType(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    #[default]
    Scheduled,
}

/// Form input for a new interview. Date and time arrive as text and are parsed on schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewRequest {
    pub candidate_name: String,
    pub candidate_email: String,
    /// `YYYY-MM-DD`
    pub interview_date: String,
    /// `HH:MM`, 24-hour clock
    pub interview_time: String,
    pub interview_type: InterviewType,
    pub location: Option<String>,
    pub interviewer_name: Option<String>,
    pub interviewer_email: Option<String>,
    pub position: Option<String>,
    pub notes: Option<String>,
}

impl InterviewRequest {
    pub fn new(
        candidate_name: impl Into<String>,
        candidate_email: impl Into<String>,
        interview_date: impl Into<String>,
        interview_time: impl Into<String>,
    ) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            candidate_email: candidate_email.into(),
            interview_date: interview_date.into(),
            interview_time: interview_time.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledInterview {
    pub id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub interview_date: NaiveDate,
    pub interview_time: String,
    #[serde(default)]
    pub interview_type: InterviewType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interviewer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
}
