//! Resume screening: analysis, score classification, status updates, and result e-mails.
//!
//! The analysis engine and the mail transport sit behind [`AnalysisProvider`] and [`Mailer`].
//! The shipped implementations are deterministic so the whole flow runs offline.

pub mod analysis;
pub mod classifier;
pub mod notification;
pub mod report;
pub mod roles;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analysis::{
    AnalysisError, AnalysisProvider, AnalysisRequest, AnalysisResult, KeywordAnalysisProvider,
};
pub use classifier::{classify, decide_selection, describe_cutoff, ScoreCategory, ScoreVerdict};
pub use notification::{
    compose_result_email, EmailMessage, EmailReceipt, EmailResult, LogMailer, MailError, Mailer,
};
pub use report::AnalysisReport;
pub use roles::{known_roles, requirements_for};
pub use router::screening_router;
pub use service::{ScreeningError, ScreeningOutcome, ScreeningRequest, ScreeningService};
