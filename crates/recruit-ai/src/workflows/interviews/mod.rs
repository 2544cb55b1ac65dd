//! Interview scheduling backed by an append-only list, and transcript review of held
//! interviews behind [`InterviewAnalyzer`].

pub mod analysis;
pub mod book;
pub mod domain;
pub mod review;
pub mod router;

#[cfg(test)]
mod tests;

pub use analysis::{
    AnswerAccuracy, InterviewAnalysis, InterviewAnalysisError, InterviewAnalysisRequest,
    InterviewAnalyzer, InterviewQa, SentimentBreakdown, TimeBreakdown, TranscriptAnalyzer,
};
pub use book::{InterviewBook, InterviewError};
pub use domain::{
    InterviewRequest, InterviewStatus, InterviewType, ScheduledInterview, UnknownInterviewType,
};
pub use review::{InterviewReview, InterviewReviewer};
pub use router::{interview_review_router, interview_router};
