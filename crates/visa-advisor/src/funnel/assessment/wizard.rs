//! The wizard state machine. Five named views, forward transitions
//! gated by completeness predicates, back transitions unconditional.
//! A failed guard is not an error; the session simply stays where it
//! is and the caller renders the forward control disabled.

use serde::{Deserialize, Serialize};

use super::domain::{deep_dive_complete, LeadSession};

/// The five wizard views. Wire labels keep the short view tags the
/// front-end routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    #[serde(rename = "1")]
    Step1,
    #[serde(rename = "score")]
    ScoreReveal,
    #[serde(rename = "2")]
    Step2,
    #[serde(rename = "3")]
    Step3,
    #[serde(rename = "done")]
    Done,
}

impl WizardStep {
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Step1 => "1",
            WizardStep::ScoreReveal => "score",
            WizardStep::Step2 => "2",
            WizardStep::Step3 => "3",
            WizardStep::Done => "done",
        }
    }
}

/// The step a forward transition would land on, or `None` when the
/// guard blocks it (or the session is already terminal). Exactly one
/// step at a time; no view is skippable.
pub fn next_step(session: &LeadSession) -> Option<WizardStep> {
    match session.step {
        WizardStep::Step1 => session
            .primary
            .is_complete()
            .then_some(WizardStep::ScoreReveal),
        WizardStep::ScoreReveal => Some(WizardStep::Step2),
        WizardStep::Step2 => deep_dive_complete(session.primary.goal, &session.deep_dive)
            .then_some(WizardStep::Step3),
        WizardStep::Step3 => (session.contact.is_complete() && !session.submitting)
            .then_some(WizardStep::Done),
        WizardStep::Done => None,
    }
}

/// The step a back transition lands on. Only the two deep steps can
/// go back; the score reveal is a one-way gate and `Done` is terminal.
pub fn previous_step(step: WizardStep) -> Option<WizardStep> {
    match step {
        WizardStep::Step2 => Some(WizardStep::ScoreReveal),
        WizardStep::Step3 => Some(WizardStep::Step2),
        WizardStep::Step1 | WizardStep::ScoreReveal | WizardStep::Done => None,
    }
}
