//! Eligibility assessment funnel: a multi-step wizard that profiles a
//! prospective applicant, reveals a preliminary eligibility score, and
//! forwards the completed lead to the evaluation backend.
//!
//! Validation never surfaces as an error to the user. Incomplete steps
//! simply refuse to advance, and a failed submission still lands the
//! session on the terminal confirmation step.

pub mod catalog;
pub mod countries;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod sink;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{
    budget_label, deep_dive_questions, pathway_label, AgeRange, EducationLevel, EnglishLevel,
    Goal, QuestionDescriptor, Timeline, BUDGET_TIERS,
};
pub use countries::match_countries;
pub use domain::{
    ContactAnswers, DeepDiveAnswers, LeadSession, PrimaryAnswers, Readiness, SessionId,
};
pub use repository::{
    LeadSink, LeadSubmission, RepositoryError, SessionRepository, SinkError,
};
pub use router::assessment_router;
pub use scoring::{band, reveal_sequence, score, score_components, Band, ScoreComponent};
pub use service::{AdvanceOutcome, AssessmentService, AssessmentServiceError, SessionSnapshot};
pub use sink::HttpLeadSink;
pub use wizard::WizardStep;
