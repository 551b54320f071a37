//! Preliminary eligibility scoring. A pure function of the Step-1
//! profile: deep-dive and contact answers never move the number. The
//! real evaluation happens in the backend; this score is the hook that
//! keeps the visitor moving through the funnel.

use serde::{Deserialize, Serialize};

use super::catalog::{EducationLevel, EnglishLevel, Timeline, BUDGET_TIERS};
use super::domain::PrimaryAnswers;

/// Maximum reachable score: 20 education + 25 budget + 15 timeline +
/// 20 english + 20 goal bonus.
pub const MAX_SCORE: u8 = 100;

const GOAL_BONUS: u8 = 20;

/// Factors contributing to the preliminary score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactor {
    Education,
    Budget,
    Timeline,
    English,
    GoalBonus,
}

/// Discrete contribution to the score, kept so the reveal view can
/// show where the number came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u8,
}

fn education_points(level: Option<EducationLevel>) -> u8 {
    match level {
        Some(EducationLevel::HighSchool) => 5,
        Some(EducationLevel::Bachelor) => 12,
        Some(EducationLevel::Master) => 17,
        Some(EducationLevel::Phd) => 20,
        None => 0,
    }
}

fn budget_points(tier: Option<u8>) -> u8 {
    tier.and_then(|tier| BUDGET_TIERS.get(tier as usize))
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

fn timeline_points(timeline: Option<Timeline>) -> u8 {
    match timeline {
        Some(Timeline::Asap) => 15,
        Some(Timeline::SixToTwelveMonths) => 12,
        Some(Timeline::OneToTwoYears) => 8,
        Some(Timeline::Flexible) => 5,
        None => 0,
    }
}

fn english_points(level: Option<EnglishLevel>) -> u8 {
    match level {
        Some(EnglishLevel::Basic) => 5,
        Some(EnglishLevel::Intermediate) => 12,
        Some(EnglishLevel::Advanced) => 17,
        Some(EnglishLevel::Ielts) => 20,
        None => 0,
    }
}

/// Per-factor breakdown of the score for `answers`.
pub fn score_components(answers: &PrimaryAnswers) -> Vec<ScoreComponent> {
    vec![
        ScoreComponent {
            factor: ScoreFactor::Education,
            points: education_points(answers.education),
        },
        ScoreComponent {
            factor: ScoreFactor::Budget,
            points: budget_points(answers.budget_tier),
        },
        ScoreComponent {
            factor: ScoreFactor::Timeline,
            points: timeline_points(answers.timeline),
        },
        ScoreComponent {
            factor: ScoreFactor::English,
            points: english_points(answers.english),
        },
        ScoreComponent {
            factor: ScoreFactor::GoalBonus,
            points: if answers.goal.is_some() { GOAL_BONUS } else { 0 },
        },
    ]
}

/// Total preliminary score in [0, 100]. Unset fields contribute zero.
pub fn score(answers: &PrimaryAnswers) -> u8 {
    score_components(answers)
        .iter()
        .map(|component| component.points)
        .sum()
}

/// Qualitative score tier selecting the framing copy and the ring
/// color on the reveal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub fn framing(self) -> &'static str {
        match self {
            Band::High => "highly aligned",
            Band::Medium => "moderately aligned",
            Band::Low => "partially aligned",
        }
    }
}

/// Band boundaries are inclusive-low: 70 is High, 50 is Medium.
pub fn band(score: u8) -> Band {
    if score >= 70 {
        Band::High
    } else if score >= 50 {
        Band::Medium
    } else {
        Band::Low
    }
}

/// Count-up sequence for the score reveal. Produces `ticks` values
/// that climb monotonically and end exactly at `final_score`; the
/// caller owns the display cadence. `ticks` of zero yields just the
/// final value so the reveal can never skip the real number.
pub fn reveal_sequence(final_score: u8, ticks: usize) -> Vec<u8> {
    if ticks <= 1 {
        return vec![final_score];
    }

    (1..=ticks)
        .map(|tick| ((final_score as usize * tick) / ticks) as u8)
        .collect()
}
