use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    AnalysisUpdate, Candidate, CandidateDraft, CandidateFilter, CandidateId, CandidateStatus,
    PipelineSummary,
};
use super::export::write_csv;
use super::transitions::transition_allowed;
use crate::error::ValidationError;
use crate::storage::{read_json, write_json, KeyValueStore, StorageError, CANDIDATES_KEY};

/// Owns the candidate collection persisted under [`CANDIDATES_KEY`].
///
/// Each mutation reads the full collection, edits it in memory and writes the whole
/// collection back. The write lock keeps that cycle from interleaving when the store is
/// shared across request handlers.
pub struct CandidateStore<B: ?Sized = dyn KeyValueStore> {
    backend: Arc<B>,
    write_lock: Mutex<()>,
}

impl<B> CandidateStore<B>
where
    B: KeyValueStore + ?Sized,
{
    pub fn open(backend: Arc<B>) -> Self {
        let store = Self {
            backend,
            write_lock: Mutex::new(()),
        };
        match store.load() {
            Ok(candidates) => info!(count = candidates.len(), "candidate store opened"),
            Err(err) => warn!(error = %err, "candidate store opened without readable data"),
        }
        store
    }

    /// Flush the backend and release the store.
    pub fn close(self) -> Result<(), CandidateStoreError> {
        self.backend.flush()?;
        Ok(())
    }

    /// Register a new candidate in the `new` stage.
    pub fn create(&self, draft: CandidateDraft) -> Result<Candidate, CandidateStoreError> {
        let candidate = build_candidate(draft)?;

        let _guard = self.lock()?;
        let mut candidates = self.load()?;
        candidates.push(candidate.clone());
        self.persist(&candidates)?;

        info!(candidate_id = %candidate.id, position = %candidate.position, "candidate created");
        Ok(candidate)
    }

    pub fn get(&self, id: &CandidateId) -> Result<Candidate, CandidateStoreError> {
        self.load()?
            .into_iter()
            .find(|candidate| candidate.id == *id)
            .ok_or_else(|| CandidateStoreError::NotFound(id.clone()))
    }

    /// Move a candidate to `status`, leaving every other field and record untouched.
    pub fn update_status(
        &self,
        id: &CandidateId,
        status: CandidateStatus,
    ) -> Result<Candidate, CandidateStoreError> {
        self.modify(id, |candidate| {
            change_status(candidate, status)?;
            Ok(())
        })
    }

    /// Write an analysis outcome (score, ranked skills, derived stage) onto a candidate.
    pub fn record_analysis(
        &self,
        id: &CandidateId,
        update: AnalysisUpdate,
    ) -> Result<Candidate, CandidateStoreError> {
        if update.score > 100 {
            return Err(ValidationError::invalid("score", "must be between 0 and 100").into());
        }

        self.modify(id, |candidate| {
            change_status(candidate, update.status)?;
            candidate.score = Some(update.score);
            candidate.skills = Some(update.skills);
            if let Some(text) = update.resume_text {
                candidate.resume_text = Some(text);
            }
            Ok(())
        })
    }

    /// Candidates matching `filter`, in insertion order. Unreadable storage yields no rows.
    pub fn list(&self, filter: &CandidateFilter) -> Vec<Candidate> {
        let candidates = match self.load() {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "candidate listing fell back to an empty collection");
                return Vec::new();
            }
        };

        let matched: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| filter.matches(candidate))
            .collect();
        debug!(?filter, matched = matched.len(), "candidate listing");
        matched
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary::from_candidates(&self.list(&CandidateFilter::all()))
    }

    /// Write the candidates matching `filter` as CSV, returning the number of rows.
    pub fn export_csv<W: Write>(
        &self,
        filter: &CandidateFilter,
        writer: W,
    ) -> Result<usize, csv::Error> {
        let rows = self.list(filter);
        write_csv(&rows, writer)?;
        Ok(rows.len())
    }

    fn modify<F>(&self, id: &CandidateId, apply: F) -> Result<Candidate, CandidateStoreError>
    where
        F: FnOnce(&mut Candidate) -> Result<(), CandidateStoreError>,
    {
        let _guard = self.lock()?;
        let mut candidates = self.load()?;
        let candidate = candidates
            .iter_mut()
            .find(|candidate| candidate.id == *id)
            .ok_or_else(|| CandidateStoreError::NotFound(id.clone()))?;

        apply(candidate)?;
        let updated = candidate.clone();
        self.persist(&candidates)?;

        info!(candidate_id = %updated.id, status = %updated.status, "candidate updated");
        Ok(updated)
    }

    fn load(&self) -> Result<Vec<Candidate>, StorageError> {
        read_json(self.backend.as_ref(), CANDIDATES_KEY)
    }

    fn persist(&self, candidates: &[Candidate]) -> Result<(), StorageError> {
        write_json(self.backend.as_ref(), CANDIDATES_KEY, candidates)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.write_lock.lock().map_err(|_| StorageError::Poisoned)
    }
}

fn change_status(
    candidate: &mut Candidate,
    status: CandidateStatus,
) -> Result<(), CandidateStoreError> {
    if !transition_allowed(candidate.status, status) {
        return Err(CandidateStoreError::InvalidTransition {
            from: candidate.status,
            to: status,
        });
    }
    candidate.status = status;
    Ok(())
}

fn build_candidate(draft: CandidateDraft) -> Result<Candidate, ValidationError> {
    let name = required(draft.name, "name")?;
    let email = required(draft.email, "email")?;
    let position = required(draft.position, "position")?;

    Ok(Candidate {
        id: CandidateId::generate(),
        name,
        email,
        phone: optional(draft.phone),
        position,
        status: CandidateStatus::New,
        resume_text: optional(draft.resume_text),
        score: None,
        skills: if draft.skills.is_empty() {
            None
        } else {
            Some(draft.skills)
        },
        applied_date: Utc::now(),
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
    value.and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Error raised by candidate store operations.
#[derive(Debug, thiserror::Error)]
pub enum CandidateStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("candidate {0} not found")]
    NotFound(CandidateId),
    #[error("candidate cannot move from {from} to {to}")]
    InvalidTransition {
        from: CandidateStatus,
        to: CandidateStatus,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
