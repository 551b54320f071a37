use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use super::catalog::budget_label;
use super::domain::{LeadSession, SessionId};
use super::wizard::WizardStep;

/// Storage abstraction so the funnel service can be exercised in
/// isolation. Implementations own their locking.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: LeadSession) -> Result<LeadSession, RepositoryError>;
    fn update(&self, session: LeadSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<LeadSession>, RepositoryError>;

    /// Atomically claim the session for submission: if it still sits
    /// on `from` and no submission is in flight, set `submitting` and
    /// return the claimed state. `None` means another caller got
    /// there first (or the session has already moved on).
    fn claim_submission(
        &self,
        id: &SessionId,
        from: WizardStep,
    ) -> Result<Option<LeadSession>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound delivery hook for completed leads. The HTTP implementation
/// posts to the evaluation backend; tests record in memory.
pub trait LeadSink: Send + Sync {
    fn submit(
        &self,
        lead: LeadSubmission,
    ) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Lead delivery error. The service logs it and completes the funnel
/// anyway; it never reaches the visitor.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("lead transport unavailable: {0}")]
    Transport(String),
    #[error("lead endpoint rejected submission: status {0}")]
    Rejected(u16),
}

/// Wire payload posted to `{base}/api/assess`. Field names and shapes
/// match what the evaluation backend expects; enum answers travel as
/// their display labels and the budget tier as its label string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub goal: String,
    pub age_range: String,
    pub nationality: String,
    pub education: String,
    pub english: String,
    pub budget: String,
    pub timeline: String,
    pub deep_dive: BTreeMap<String, String>,
    pub contact: BTreeMap<String, String>,
}

impl LeadSubmission {
    /// Flatten a completed session into the outbound payload. Unset
    /// fields become empty strings rather than being dropped, so the
    /// backend always sees the same shape.
    pub fn from_session(session: &LeadSession) -> Self {
        let primary = &session.primary;

        let mut contact = BTreeMap::new();
        contact.insert("name".to_string(), session.contact.name.clone());
        contact.insert("email".to_string(), session.contact.email.clone());
        contact.insert("whatsapp".to_string(), session.contact.whatsapp.clone());
        contact.insert(
            "seriousness".to_string(),
            session.contact.seriousness.to_string(),
        );
        contact.insert(
            "ready".to_string(),
            session
                .contact
                .ready
                .map(|ready| ready.label().to_string())
                .unwrap_or_default(),
        );

        Self {
            goal: primary.goal.map(|goal| goal.label().to_string()).unwrap_or_default(),
            age_range: primary
                .age_range
                .map(|range| range.label().to_string())
                .unwrap_or_default(),
            nationality: primary.nationality.clone(),
            education: primary
                .education
                .map(|level| level.label().to_string())
                .unwrap_or_default(),
            english: primary
                .english
                .map(|level| level.label().to_string())
                .unwrap_or_default(),
            budget: primary
                .budget_tier
                .and_then(budget_label)
                .unwrap_or_default()
                .to_string(),
            timeline: primary
                .timeline
                .map(|timeline| timeline.label().to_string())
                .unwrap_or_default(),
            deep_dive: session.deep_dive.clone(),
            contact,
        }
    }
}
