use tracing::debug;

use super::repository::{LeadSink, LeadSubmission, SinkError};

/// Delivers completed leads to the evaluation backend over HTTP. No
/// timeout and no retry: the funnel treats delivery as fire-and-forget
/// and the service swallows whatever this returns.
#[derive(Debug, Clone)]
pub struct HttpLeadSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLeadSink {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/assess", api_base.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl LeadSink for HttpLeadSink {
    async fn submit(&self, lead: LeadSubmission) -> Result<(), SinkError> {
        debug!(endpoint = %self.endpoint, goal = %lead.goal, "posting lead");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&lead)
            .send()
            .await
            .map_err(|err| SinkError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SinkError::Rejected(status.as_u16()))
        }
    }
}
