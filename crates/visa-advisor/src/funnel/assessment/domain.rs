use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{deep_dive_questions, AgeRange, EducationLevel, EnglishLevel, Goal, Timeline};
use super::wizard::WizardStep;

/// Identifier wrapper for funnel sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Step-1 profile. Every field starts unset; the wizard refuses to
/// reveal a score until all seven are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryAnswers {
    pub goal: Option<Goal>,
    pub age_range: Option<AgeRange>,
    pub nationality: String,
    pub education: Option<EducationLevel>,
    pub english: Option<EnglishLevel>,
    pub budget_tier: Option<u8>,
    pub timeline: Option<Timeline>,
}

impl PrimaryAnswers {
    pub fn is_complete(&self) -> bool {
        self.goal.is_some()
            && self.age_range.is_some()
            && !self.nationality.trim().is_empty()
            && self.education.is_some()
            && self.english.is_some()
            && self.budget_tier.is_some()
            && self.timeline.is_some()
    }
}

/// Step-2 answers, keyed by question id. The required key set comes
/// from the catalog for the current goal.
pub type DeepDiveAnswers = BTreeMap<String, String>;

/// Whether every deep-dive question required for `goal` has an answer.
/// A session with no goal yet has no required questions, so an empty
/// map is vacuously complete.
pub fn deep_dive_complete(goal: Option<Goal>, answers: &DeepDiveAnswers) -> bool {
    let Some(goal) = goal else {
        return true;
    };

    deep_dive_questions(goal).iter().all(|question| {
        answers
            .get(question.id)
            .is_some_and(|option| !option.trim().is_empty())
    })
}

/// Two-state commitment selector on the contact step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    #[serde(rename = "Yes, ready to start")]
    ReadyToStart,
    #[serde(rename = "Just exploring")]
    JustExploring,
}

impl Readiness {
    pub fn label(self) -> &'static str {
        match self {
            Readiness::ReadyToStart => "Yes, ready to start",
            Readiness::JustExploring => "Just exploring",
        }
    }
}

/// Step-3 contact details. Seriousness is a 1–10 self-assessment the
/// advisors use for follow-up ordering; out-of-range wire values are
/// clamped into the selector range and it never gates submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAnswers {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default = "default_seriousness", deserialize_with = "clamped_seriousness")]
    pub seriousness: u8,
    #[serde(default)]
    pub ready: Option<Readiness>,
}

impl Default for ContactAnswers {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            whatsapp: String::new(),
            seriousness: default_seriousness(),
            ready: None,
        }
    }
}

fn default_seriousness() -> u8 {
    5
}

fn clamped_seriousness<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    Ok(value.clamp(1, 10))
}

impl ContactAnswers {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && self.ready.is_some()
    }
}

/// One wizard instance: the current step plus everything the visitor
/// has entered so far. Back-navigation keeps the answer records
/// untouched; nothing leaves the process until final submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSession {
    pub id: SessionId,
    pub step: WizardStep,
    pub primary: PrimaryAnswers,
    pub deep_dive: DeepDiveAnswers,
    pub contact: ContactAnswers,
    pub submitting: bool,
    pub created_at: DateTime<Utc>,
}

impl LeadSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            step: WizardStep::Step1,
            primary: PrimaryAnswers::default(),
            deep_dive: DeepDiveAnswers::new(),
            contact: ContactAnswers::default(),
            submitting: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_primary() -> PrimaryAnswers {
        PrimaryAnswers {
            goal: Some(Goal::Study),
            age_range: Some(AgeRange::EighteenToTwentyFive),
            nationality: "India".to_string(),
            education: Some(EducationLevel::Bachelor),
            english: Some(EnglishLevel::Intermediate),
            budget_tier: Some(1),
            timeline: Some(Timeline::SixToTwelveMonths),
        }
    }

    #[test]
    fn primary_completeness_requires_all_seven_fields() {
        let mut answers = complete_primary();
        assert!(answers.is_complete());

        answers.nationality = "   ".to_string();
        assert!(!answers.is_complete());

        let mut answers = complete_primary();
        answers.timeline = None;
        assert!(!answers.is_complete());
    }

    #[test]
    fn deep_dive_requires_every_question_for_the_goal() {
        let mut answers = DeepDiveAnswers::new();
        assert!(!deep_dive_complete(Some(Goal::Study), &answers));

        for question in deep_dive_questions(Goal::Study) {
            answers.insert(question.id.to_string(), question.options[0].to_string());
        }
        assert!(deep_dive_complete(Some(Goal::Study), &answers));

        answers.insert("study_funding".to_string(), "  ".to_string());
        assert!(!deep_dive_complete(Some(Goal::Study), &answers));
    }

    #[test]
    fn seriousness_is_clamped_into_the_selector_range() {
        let contact: ContactAnswers = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "seriousness": 99,
        }))
        .expect("deserializes");
        assert_eq!(contact.seriousness, 10);

        let contact: ContactAnswers = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "seriousness": 0,
        }))
        .expect("deserializes");
        assert_eq!(contact.seriousness, 1);

        let contact: ContactAnswers = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
        }))
        .expect("deserializes");
        assert_eq!(contact.seriousness, 5, "absent field takes the midpoint");
    }

    #[test]
    fn contact_completeness_requires_name_email_and_readiness() {
        let mut contact = ContactAnswers {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            whatsapp: String::new(),
            seriousness: 8,
            ready: Some(Readiness::ReadyToStart),
        };
        assert!(contact.is_complete());

        contact.ready = None;
        assert!(!contact.is_complete());
    }
}
