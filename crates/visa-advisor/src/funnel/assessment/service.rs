use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::pathway_label;
use super::countries::is_known_country;
use super::domain::{ContactAnswers, LeadSession, PrimaryAnswers, SessionId};
use super::repository::{
    LeadSink, LeadSubmission, RepositoryError, SessionRepository,
};
use super::scoring::{band, score, Band};
use super::wizard::{next_step, previous_step, WizardStep};

/// Service composing the session store, the wizard rules, and the
/// outbound lead sink.
pub struct AssessmentService<R, S> {
    repository: Arc<R>,
    sink: Arc<S>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("lead-{id:06}"))
}

/// Sanitized view of a session for API responses. Score, band, and
/// pathway appear once the Step-1 profile is complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub step: WizardStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway: Option<String>,
    pub submitting: bool,
}

impl SessionSnapshot {
    fn of(session: &LeadSession) -> Self {
        let (score, band_value, pathway) = if session.primary.is_complete() {
            let score = score(&session.primary);
            (
                Some(score),
                Some(band(score)),
                Some(pathway_label(session.primary.goal).to_string()),
            )
        } else {
            (None, None, None)
        };

        Self {
            session_id: session.id.clone(),
            step: session.step,
            score,
            band: band_value,
            pathway,
            submitting: session.submitting,
        }
    }
}

/// Result of a forward transition attempt. A blocked guard is a
/// normal outcome, not an error: the UI reacts by keeping the forward
/// control disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    pub moved: bool,
    pub session: SessionSnapshot,
}

impl<R, S> AssessmentService<R, S>
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    pub fn new(repository: Arc<R>, sink: Arc<S>) -> Self {
        Self { repository, sink }
    }

    /// Open a fresh session at Step 1 with empty answer records.
    pub fn create_session(&self) -> Result<SessionSnapshot, AssessmentServiceError> {
        let session = LeadSession::new(next_session_id());
        let stored = self.repository.insert(session)?;
        info!(session = %stored.id.0, "assessment session opened");
        Ok(SessionSnapshot::of(&stored))
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionSnapshot, AssessmentServiceError> {
        let session = self.fetch(id)?;
        Ok(SessionSnapshot::of(&session))
    }

    /// Replace the Step-1 profile. A nationality that is not on the
    /// country list is treated as a half-typed query and stored empty,
    /// which keeps Step 1 incomplete until a real selection is made.
    pub fn set_primary(
        &self,
        id: &SessionId,
        mut primary: PrimaryAnswers,
    ) -> Result<SessionSnapshot, AssessmentServiceError> {
        if !primary.nationality.trim().is_empty() && !is_known_country(&primary.nationality) {
            debug!(session = %id.0, value = %primary.nationality, "dropping unrecognized nationality");
            primary.nationality = String::new();
        }

        let mut session = self.fetch(id)?;
        session.primary = primary;
        self.repository.update(session.clone())?;
        Ok(SessionSnapshot::of(&session))
    }

    /// Record one deep-dive answer. Unknown question ids are stored as
    /// given; only the ids required for the current goal gate Step 2.
    pub fn answer_deep_dive(
        &self,
        id: &SessionId,
        question_id: &str,
        option: &str,
    ) -> Result<SessionSnapshot, AssessmentServiceError> {
        let mut session = self.fetch(id)?;
        session
            .deep_dive
            .insert(question_id.to_string(), option.to_string());
        self.repository.update(session.clone())?;
        Ok(SessionSnapshot::of(&session))
    }

    pub fn set_contact(
        &self,
        id: &SessionId,
        contact: ContactAnswers,
    ) -> Result<SessionSnapshot, AssessmentServiceError> {
        let mut session = self.fetch(id)?;
        session.contact = contact;
        self.repository.update(session.clone())?;
        Ok(SessionSnapshot::of(&session))
    }

    /// Attempt the forward transition for the current step. The
    /// Step3 → Done edge is the only one with a side effect: it posts
    /// the lead to the sink. Delivery failure is logged and swallowed;
    /// the visitor reaches the confirmation step either way.
    pub async fn advance(&self, id: &SessionId) -> Result<AdvanceOutcome, AssessmentServiceError> {
        let mut session = self.fetch(id)?;

        let Some(target) = next_step(&session) else {
            return Ok(AdvanceOutcome {
                moved: false,
                session: SessionSnapshot::of(&session),
            });
        };

        if session.step == WizardStep::Step3 && target == WizardStep::Done {
            // Claim the submission atomically so two concurrent final
            // advances cannot both deliver the lead.
            let Some(mut claimed) = self
                .repository
                .claim_submission(id, WizardStep::Step3)?
            else {
                let current = self.fetch(id)?;
                return Ok(AdvanceOutcome {
                    moved: false,
                    session: SessionSnapshot::of(&current),
                });
            };

            let lead = LeadSubmission::from_session(&claimed);
            match self.sink.submit(lead).await {
                Ok(()) => info!(session = %claimed.id.0, "lead delivered"),
                Err(err) => {
                    warn!(session = %claimed.id.0, error = %err, "lead delivery failed; completing funnel anyway");
                }
            }

            claimed.submitting = false;
            session = claimed;
        }

        session.step = target;
        self.repository.update(session.clone())?;
        Ok(AdvanceOutcome {
            moved: true,
            session: SessionSnapshot::of(&session),
        })
    }

    /// Step back one view. Answers are never cleared by going back.
    pub fn back(&self, id: &SessionId) -> Result<AdvanceOutcome, AssessmentServiceError> {
        let mut session = self.fetch(id)?;

        let Some(target) = previous_step(session.step) else {
            return Ok(AdvanceOutcome {
                moved: false,
                session: SessionSnapshot::of(&session),
            });
        };

        session.step = target;
        self.repository.update(session.clone())?;
        Ok(AdvanceOutcome {
            moved: true,
            session: SessionSnapshot::of(&session),
        })
    }

    fn fetch(&self, id: &SessionId) -> Result<LeadSession, AssessmentServiceError> {
        Ok(self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
