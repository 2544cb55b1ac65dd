use super::domain::CandidateStatus;

/// Single gate every status change passes through.
///
/// Recruiters move candidates freely between stages (including back to `new` after `hired`),
/// so every pair is currently allowed. A directed transition table belongs here if that
/// ever tightens.
pub(crate) fn transition_allowed(from: CandidateStatus, to: CandidateStatus) -> bool {
    let _ = (from, to);
    true
}
