use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::funnel::assessment::catalog::{
    deep_dive_questions, AgeRange, EducationLevel, EnglishLevel, Goal, Timeline,
};
use crate::funnel::assessment::domain::{
    ContactAnswers, LeadSession, PrimaryAnswers, Readiness, SessionId,
};
use crate::funnel::assessment::repository::{
    LeadSink, LeadSubmission, RepositoryError, SessionRepository, SinkError,
};
use crate::funnel::assessment::router::assessment_router;
use crate::funnel::assessment::service::AssessmentService;
use crate::funnel::assessment::wizard::WizardStep;

pub(super) fn work_primary() -> PrimaryAnswers {
    PrimaryAnswers {
        goal: Some(Goal::Work),
        age_range: Some(AgeRange::TwentySixToThirtyFive),
        nationality: "Germany".to_string(),
        education: Some(EducationLevel::Master),
        english: Some(EnglishLevel::Advanced),
        budget_tier: Some(2),
        timeline: Some(Timeline::Asap),
    }
}

pub(super) fn full_deep_dive(goal: Goal) -> Vec<(String, String)> {
    deep_dive_questions(goal)
        .iter()
        .map(|question| (question.id.to_string(), question.options[0].to_string()))
        .collect()
}

pub(super) fn ready_contact() -> ContactAnswers {
    ContactAnswers {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        whatsapp: "+49 151 0000000".to_string(),
        seriousness: 9,
        ready: Some(Readiness::ReadyToStart),
    }
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<MemoryRepository, RecordingSink>>,
    Arc<MemoryRepository>,
    Arc<RecordingSink>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let sink = Arc::new(RecordingSink::default());
    let service = Arc::new(AssessmentService::new(repository.clone(), sink.clone()));
    (service, repository, sink)
}

pub(super) fn build_failing_service() -> (
    Arc<AssessmentService<MemoryRepository, FailingSink>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(AssessmentService::new(repository.clone(), Arc::new(FailingSink)));
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, LeadSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: LeadSession) -> Result<LeadSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: LeadSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<LeadSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn claim_submission(
        &self,
        id: &SessionId,
        from: WizardStep,
    ) -> Result<Option<LeadSession>, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if session.step != from || session.submitting {
            return Ok(None);
        }
        session.submitting = true;
        Ok(Some(session.clone()))
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingSink {
    leads: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl RecordingSink {
    pub(super) fn leads(&self) -> Vec<LeadSubmission> {
        self.leads.lock().expect("sink mutex poisoned").clone()
    }
}

impl LeadSink for RecordingSink {
    async fn submit(&self, lead: LeadSubmission) -> Result<(), SinkError> {
        self.leads.lock().expect("sink mutex poisoned").push(lead);
        Ok(())
    }
}

/// Sink that holds every submission open for a while before
/// recording it, standing in for a slow backend.
#[derive(Clone)]
pub(super) struct SlowRecordingSink {
    leads: Arc<Mutex<Vec<LeadSubmission>>>,
    delay: std::time::Duration,
}

impl SlowRecordingSink {
    pub(super) fn new(delay: std::time::Duration) -> Self {
        Self {
            leads: Arc::new(Mutex::new(Vec::new())),
            delay,
        }
    }

    pub(super) fn leads(&self) -> Vec<LeadSubmission> {
        self.leads.lock().expect("sink mutex poisoned").clone()
    }
}

impl LeadSink for SlowRecordingSink {
    async fn submit(&self, lead: LeadSubmission) -> Result<(), SinkError> {
        tokio::time::sleep(self.delay).await;
        self.leads.lock().expect("sink mutex poisoned").push(lead);
        Ok(())
    }
}

/// Sink that always fails, standing in for an unreachable backend.
pub(super) struct FailingSink;

impl LeadSink for FailingSink {
    async fn submit(&self, _lead: LeadSubmission) -> Result<(), SinkError> {
        Err(SinkError::Transport("connection refused".to_string()))
    }
}

pub(super) fn router_with_service(
    service: Arc<AssessmentService<MemoryRepository, RecordingSink>>,
) -> axum::Router {
    assessment_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
