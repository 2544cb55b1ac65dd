//! Candidate intake, pipeline status tracking, and listing.
//!
//! [`CandidateStore`] is the only owner of the persisted collection; HTTP handlers and the CLI
//! receive a shared store instance rather than reaching for ambient state.

pub mod domain;
pub mod export;
pub mod router;
pub mod store;
mod transitions;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisUpdate, Candidate, CandidateDraft, CandidateFilter, CandidateId, CandidateStatus,
    PipelineSummary, StageCount, StatusFilter, UnknownStatus,
};
pub use export::write_csv;
pub use router::candidate_router;
pub use store::{CandidateStore, CandidateStoreError};
