//! Static catalogs backing the wizard: enumerated answer choices for
//! the primary profile, the ordered budget tiers, the goal-specific
//! deep-dive question sets, and the pathway labels shown alongside the
//! revealed score.

use serde::{Deserialize, Serialize};

/// Top-level immigration objective. Selects which deep-dive question
/// set applies and which pathway label is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    Study,
    Startup,
    Work,
    Residency,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Study, Goal::Startup, Goal::Work, Goal::Residency];

    pub fn label(self) -> &'static str {
        match self {
            Goal::Study => "Study",
            Goal::Startup => "Startup",
            Goal::Work => "Work",
            Goal::Residency => "Residency",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|goal| goal.label().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "18–25")]
    EighteenToTwentyFive,
    #[serde(rename = "26–35")]
    TwentySixToThirtyFive,
    #[serde(rename = "36–45")]
    ThirtySixToFortyFive,
    #[serde(rename = "46+")]
    FortySixPlus,
}

impl AgeRange {
    pub fn label(self) -> &'static str {
        match self {
            AgeRange::EighteenToTwentyFive => "18–25",
            AgeRange::TwentySixToThirtyFive => "26–35",
            AgeRange::ThirtySixToFortyFive => "36–45",
            AgeRange::FortySixPlus => "46+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    Bachelor,
    Master,
    #[serde(rename = "PhD")]
    Phd,
}

impl EducationLevel {
    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelor => "Bachelor",
            EducationLevel::Master => "Master",
            EducationLevel::Phd => "PhD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnglishLevel {
    Basic,
    Intermediate,
    Advanced,
    #[serde(rename = "IELTS 6.5+")]
    Ielts,
}

impl EnglishLevel {
    pub fn label(self) -> &'static str {
        match self {
            EnglishLevel::Basic => "Basic",
            EnglishLevel::Intermediate => "Intermediate",
            EnglishLevel::Advanced => "Advanced",
            EnglishLevel::Ielts => "IELTS 6.5+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "ASAP")]
    Asap,
    #[serde(rename = "6–12 months")]
    SixToTwelveMonths,
    #[serde(rename = "1–2 years")]
    OneToTwoYears,
    Flexible,
}

impl Timeline {
    pub fn label(self) -> &'static str {
        match self {
            Timeline::Asap => "ASAP",
            Timeline::SixToTwelveMonths => "6–12 months",
            Timeline::OneToTwoYears => "1–2 years",
            Timeline::Flexible => "Flexible",
        }
    }
}

/// Ordered budget tiers: display label and score contribution, indexed
/// by the 0–3 tier the user selects.
pub const BUDGET_TIERS: [(&str, u8); 4] = [
    ("Under $10k", 5),
    ("$10k–$25k", 12),
    ("$25k–$50k", 20),
    ("$50k+", 25),
];

/// Display label for a budget tier; `None` when the index is out of
/// range (never produced by the selector, but the wire is free text).
pub fn budget_label(tier: u8) -> Option<&'static str> {
    BUDGET_TIERS.get(tier as usize).map(|(label, _)| *label)
}

/// A single deep-dive question: stable id, prompt, and its fixed
/// option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

const STUDY_QUESTIONS: [QuestionDescriptor; 6] = [
    QuestionDescriptor {
        id: "study_level",
        label: "What level do you want to study at?",
        options: &["Bachelor", "Master", "PhD"],
    },
    QuestionDescriptor {
        id: "study_field",
        label: "Which field interests you most?",
        options: &["Business", "Engineering", "IT & Data", "Other"],
    },
    QuestionDescriptor {
        id: "study_intake",
        label: "When would you like to start?",
        options: &["Next intake", "Within a year", "Flexible"],
    },
    QuestionDescriptor {
        id: "study_funding",
        label: "How will you fund your studies?",
        options: &["Self-funded", "Scholarship", "Family sponsor"],
    },
    QuestionDescriptor {
        id: "study_documents",
        label: "Are your transcripts and diplomas ready?",
        options: &["Yes", "Partially", "Not yet"],
    },
    QuestionDescriptor {
        id: "study_gap",
        label: "How long since you last studied?",
        options: &["Still studying", "1–2 years", "3+ years"],
    },
];

const STARTUP_QUESTIONS: [QuestionDescriptor; 6] = [
    QuestionDescriptor {
        id: "startup_stage",
        label: "What stage is your venture at?",
        options: &["Idea", "Prototype", "Paying customers"],
    },
    QuestionDescriptor {
        id: "startup_team",
        label: "How many founders are on the team?",
        options: &["Solo", "2–3", "4+"],
    },
    QuestionDescriptor {
        id: "startup_capital",
        label: "How much capital can you commit?",
        options: &["Under €20k", "€20k–€50k", "€50k+"],
    },
    QuestionDescriptor {
        id: "startup_experience",
        label: "Have you run a business before?",
        options: &["First venture", "One prior", "Serial founder"],
    },
    QuestionDescriptor {
        id: "startup_sector",
        label: "Which sector fits your venture?",
        options: &["Software", "E-commerce", "Services", "Other"],
    },
    QuestionDescriptor {
        id: "startup_incubator",
        label: "Would you join a recognized incubator?",
        options: &["Yes", "Maybe", "Prefer not"],
    },
];

const WORK_QUESTIONS: [QuestionDescriptor; 6] = [
    QuestionDescriptor {
        id: "work_profession",
        label: "Which area do you work in?",
        options: &["IT & Engineering", "Healthcare", "Trades", "Other"],
    },
    QuestionDescriptor {
        id: "work_experience",
        label: "Years of professional experience?",
        options: &["Under 2", "2–5", "5–10", "10+"],
    },
    QuestionDescriptor {
        id: "work_offer",
        label: "Do you have a job offer abroad?",
        options: &["Yes", "Interviewing", "Not yet"],
    },
    QuestionDescriptor {
        id: "work_degree_recognition",
        label: "Is your degree recognized abroad?",
        options: &["Yes", "In progress", "Not checked"],
    },
    QuestionDescriptor {
        id: "work_language",
        label: "Do you speak the destination language?",
        options: &["Fluent", "Conversational", "Beginner", "None"],
    },
    QuestionDescriptor {
        id: "work_relocation",
        label: "Would you relocate alone or with family?",
        options: &["Alone", "With partner", "Whole family"],
    },
];

const RESIDENCY_QUESTIONS: [QuestionDescriptor; 6] = [
    QuestionDescriptor {
        id: "residency_investment",
        label: "How much can you invest?",
        options: &["Under €250k", "€250k–€500k", "€500k+"],
    },
    QuestionDescriptor {
        id: "residency_vehicle",
        label: "Preferred investment vehicle?",
        options: &["Real estate", "Investment fund", "Business", "Undecided"],
    },
    QuestionDescriptor {
        id: "residency_funds_source",
        label: "Source of funds?",
        options: &["Business income", "Savings", "Asset sale", "Other"],
    },
    QuestionDescriptor {
        id: "residency_family",
        label: "Who would relocate with you?",
        options: &["Just me", "Partner", "Family with children"],
    },
    QuestionDescriptor {
        id: "residency_presence",
        label: "How much time can you spend in-country?",
        options: &["Full relocation", "Part of the year", "Minimal stays"],
    },
    QuestionDescriptor {
        id: "residency_citizenship",
        label: "Is eventual citizenship a priority?",
        options: &["Yes", "Nice to have", "No"],
    },
];

/// Deep-dive question set for a goal. Always exactly six questions.
pub fn deep_dive_questions(goal: Goal) -> &'static [QuestionDescriptor] {
    match goal {
        Goal::Study => &STUDY_QUESTIONS,
        Goal::Startup => &STARTUP_QUESTIONS,
        Goal::Work => &WORK_QUESTIONS,
        Goal::Residency => &RESIDENCY_QUESTIONS,
    }
}

/// Human-readable visa pathway implied by the goal. Display only.
pub fn pathway_label(goal: Option<Goal>) -> &'static str {
    match goal {
        Some(Goal::Study) => "Netherlands student visa",
        Some(Goal::Startup) => "Netherlands startup visa",
        Some(Goal::Work) => "Germany job-seeker visa",
        Some(Goal::Residency) => "Portugal investor residency visa",
        None => "personalized visa pathway",
    }
}
