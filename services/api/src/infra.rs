use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use visa_advisor::funnel::assessment::{
    LeadSession, LeadSink, LeadSubmission, RepositoryError, SessionId, SessionRepository,
    SinkError, WizardStep,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session store for a single process. Leads only need to survive one
/// wizard walkthrough; a page reload starts a fresh session.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, LeadSession>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: LeadSession) -> Result<LeadSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: LeadSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&session.id) {
            guard.insert(session.id.clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<LeadSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn claim_submission(
        &self,
        id: &SessionId,
        from: WizardStep,
    ) -> Result<Option<LeadSession>, RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if session.step != from || session.submitting {
            return Ok(None);
        }
        session.submitting = true;
        Ok(Some(session.clone()))
    }
}

/// Local sink used by the demo command and the route tests.
#[derive(Default, Clone)]
pub(crate) struct RecordingLeadSink {
    leads: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl RecordingLeadSink {
    pub(crate) fn leads(&self) -> Vec<LeadSubmission> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

impl LeadSink for RecordingLeadSink {
    async fn submit(&self, lead: LeadSubmission) -> Result<(), SinkError> {
        self.leads.lock().expect("lead mutex poisoned").push(lead);
        Ok(())
    }
}
