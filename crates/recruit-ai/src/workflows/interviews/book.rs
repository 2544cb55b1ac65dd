use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};

use super::domain::{InterviewRequest, InterviewStatus, ScheduledInterview};
use crate::error::ValidationError;
use crate::storage::{read_json, write_json, KeyValueStore, StorageError, INTERVIEWS_KEY};

/// Append-only interview schedule persisted under [`INTERVIEWS_KEY`].
pub struct InterviewBook<B: ?Sized = dyn KeyValueStore> {
    backend: Arc<B>,
    write_lock: Mutex<()>,
}

impl<B> InterviewBook<B>
where
    B: KeyValueStore + ?Sized,
{
    pub fn open(backend: Arc<B>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn schedule(&self, request: InterviewRequest) -> Result<ScheduledInterview, InterviewError> {
        let interview = build_interview(request)?;

        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut interviews: Vec<ScheduledInterview> =
            read_json(self.backend.as_ref(), INTERVIEWS_KEY)?;
        interviews.push(interview.clone());
        write_json(self.backend.as_ref(), INTERVIEWS_KEY, &interviews)?;

        info!(
            interview_id = %interview.id,
            date = %interview.interview_date,
            time = %interview.interview_time,
            kind = %interview.interview_type,
            "interview scheduled"
        );
        Ok(interview)
    }

    /// Every scheduled interview in booking order, optionally narrowed to one candidate e-mail.
    pub fn list(&self, candidate_email: Option<&str>) -> Vec<ScheduledInterview> {
        let interviews: Vec<ScheduledInterview> =
            match read_json(self.backend.as_ref(), INTERVIEWS_KEY) {
                Ok(interviews) => interviews,
                Err(err) => {
                    warn!(error = %err, "interview listing fell back to an empty schedule");
                    return Vec::new();
                }
            };

        match candidate_email {
            Some(email) => interviews
                .into_iter()
                .filter(|interview| interview.candidate_email.eq_ignore_ascii_case(email.trim()))
                .collect(),
            None => interviews,
        }
    }
}

fn build_interview(request: InterviewRequest) -> Result<ScheduledInterview, ValidationError> {
    let candidate_name = required(request.candidate_name, "candidateName")?;
    let candidate_email = required(request.candidate_email, "candidateEmail")?;
    let raw_date = required(request.interview_date, "interviewDate")?;
    let raw_time = required(request.interview_time, "interviewTime")?;

    let interview_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|_| {
        ValidationError::invalid("interviewDate", format!("must be YYYY-MM-DD, got '{raw_date}'"))
    })?;
    let interview_time = NaiveTime::parse_from_str(&raw_time, "%H:%M").map_err(|_| {
        ValidationError::invalid("interviewTime", format!("must be HH:MM, got '{raw_time}'"))
    })?;

    Ok(ScheduledInterview {
        id: uuid::Uuid::new_v4().to_string(),
        candidate_name,
        candidate_email,
        interview_date,
        interview_time: interview_time.format("%H:%M").to_string(),
        interview_type: request.interview_type,
        location: optional(request.location),
        interviewer_name: optional(request.interviewer_name),
        interviewer_email: optional(request.interviewer_email),
        position: optional(request.position),
        notes: optional(request.notes),
        status: InterviewStatus::Scheduled,
        created_at: Utc::now(),
    })
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::workflows::interviews::InterviewType;

    fn book() -> (InterviewBook<MemoryStore>, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (InterviewBook::open(backend.clone()), backend)
    }

    #[test]
    fn schedule_assigns_id_status_and_normalised_time() {
        let (book, _) = book();
        let request = InterviewRequest {
            interview_type: InterviewType::InPerson,
            location: Some("  Room 4  ".to_string()),
            notes: Some("   ".to_string()),
            ..InterviewRequest::new("Ada Lovelace", "ada@x.com", "2025-03-14", "9:05")
        };

        let interview = book.schedule(request).expect("scheduled");

        assert!(!interview.id.is_empty());
        assert_eq!(interview.status, InterviewStatus::Scheduled);
        assert_eq!(
            interview.interview_date,
            NaiveDate::from_ymd_opt(2025, 3, 14).expect("date")
        );
        assert_eq!(interview.interview_time, "09:05");
        assert_eq!(interview.location.as_deref(), Some("Room 4"));
        assert_eq!(interview.notes, None);
    }

    #[test]
    fn interviews_append_in_booking_order() {
        let (book, backend) = book();
        for (name, date) in [("Ada", "2025-03-14"), ("Grace", "2025-03-10"), ("Alan", "2025-03-12")] {
            book.schedule(InterviewRequest::new(name, format!("{name}@x.com"), date, "10:00"))
                .expect("scheduled");
        }

        let names: Vec<_> = book
            .list(None)
            .into_iter()
            .map(|interview| interview.candidate_name)
            .collect();
        assert_eq!(names, ["Ada", "Grace", "Alan"]);

        let raw = backend.get(INTERVIEWS_KEY).expect("read").expect("persisted");
        assert!(raw.contains("\"interviewType\":\"video\""));
        assert!(raw.contains("\"status\":\"scheduled\""));
    }

    #[test]
    fn list_filters_by_candidate_email() {
        let (book, _) = book();
        book.schedule(InterviewRequest::new("Ada", "ada@x.com", "2025-03-14", "10:00"))
            .expect("scheduled");
        book.schedule(InterviewRequest::new("Grace", "grace@x.com", "2025-03-15", "11:00"))
            .expect("scheduled");

        let for_ada = book.list(Some("ADA@x.com"));
        assert_eq!(for_ada.len(), 1);
        assert_eq!(for_ada[0].candidate_name, "Ada");
    }

    #[test]
    fn missing_required_field_is_named() {
        let (book, backend) = book();
        let err = book
            .schedule(InterviewRequest::new("Ada", "ada@x.com", "", "10:00"))
            .expect_err("date missing");

        match err {
            InterviewError::Validation(err) => assert_eq!(err.to_string(), "interviewDate is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(backend.get(INTERVIEWS_KEY).expect("read").is_none());
    }

    #[test]
    fn malformed_date_and_time_are_rejected() {
        let (book, _) = book();
        let bad_date = book
            .schedule(InterviewRequest::new("Ada", "ada@x.com", "14/03/2025", "10:00"))
            .expect_err("bad date");
        assert!(bad_date.to_string().contains("must be YYYY-MM-DD"));

        let bad_time = book
            .schedule(InterviewRequest::new("Ada", "ada@x.com", "2025-03-14", "25:00"))
            .expect_err("bad time");
        assert!(bad_time.to_string().starts_with("interviewTime must be HH:MM"));
    }

    #[test]
    fn corrupt_schedule_reads_as_empty() {
        let (book, backend) = book();
        backend.put(INTERVIEWS_KEY, "[{oops").expect("seed corrupt value");

        assert!(book.list(None).is_empty());
        book.schedule(InterviewRequest::new("Ada", "ada@x.com", "2025-03-14", "10:00"))
            .expect("scheduled over corrupt value");
        assert_eq!(book.list(None).len(), 1);
    }
}
