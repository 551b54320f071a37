use crate::infra::{InMemorySessionRepository, RecordingLeadSink};
use clap::Args;
use std::sync::Arc;
use visa_advisor::error::AppError;
use visa_advisor::funnel::assessment::{
    deep_dive_questions, pathway_label, reveal_sequence, AgeRange, AssessmentService,
    ContactAnswers, EducationLevel, EnglishLevel, Goal, PrimaryAnswers, Readiness, Timeline,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Goal to walk through (Study, Startup, Work, Residency)
    #[arg(long)]
    pub(crate) goal: Option<String>,
    /// Number of ticks in the score reveal count-up
    #[arg(long, default_value_t = 10)]
    pub(crate) reveal_ticks: usize,
}

fn sample_primary(goal: Goal) -> PrimaryAnswers {
    PrimaryAnswers {
        goal: Some(goal),
        age_range: Some(AgeRange::TwentySixToThirtyFive),
        nationality: "Germany".to_string(),
        education: Some(EducationLevel::Master),
        english: Some(EnglishLevel::Advanced),
        budget_tier: Some(2),
        timeline: Some(Timeline::Asap),
    }
}

fn sample_contact() -> ContactAnswers {
    ContactAnswers {
        name: "Demo Visitor".to_string(),
        email: "demo@example.com".to_string(),
        whatsapp: "+1 555 0100".to_string(),
        seriousness: 8,
        ready: Some(Readiness::ReadyToStart),
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let goal = args
        .goal
        .as_deref()
        .and_then(Goal::from_label)
        .unwrap_or(Goal::Work);

    let repository = Arc::new(InMemorySessionRepository::default());
    let sink = Arc::new(RecordingLeadSink::default());
    let service = AssessmentService::new(repository, sink.clone());

    println!("Assessment funnel demo ({} pathway)", goal.label());

    let snapshot = service.create_session()?;
    let id = snapshot.session_id.clone();
    println!("  Session {} opened at step {}", id.0, snapshot.step.label());

    let snapshot = service.set_primary(&id, sample_primary(goal))?;
    let score = snapshot.score.unwrap_or(0);
    println!("  Profile complete, preliminary score {score}");

    let outcome = service.advance(&id).await?;
    println!("  Revealing score at step '{}':", outcome.session.step.label());
    let ticks: Vec<String> = reveal_sequence(score, args.reveal_ticks)
        .into_iter()
        .map(|value| value.to_string())
        .collect();
    println!("    {}", ticks.join(" → "));
    if let Some(band) = outcome.session.band {
        println!(
            "  Band {:?}, suggested pathway: {}",
            band,
            pathway_label(Some(goal))
        );
    }

    service.advance(&id).await?;
    println!("  Deep dive ({} questions):", deep_dive_questions(goal).len());
    for question in deep_dive_questions(goal) {
        let choice = question.options[0];
        service.answer_deep_dive(&id, question.id, choice)?;
        println!("    {} → {}", question.label, choice);
    }

    service.advance(&id).await?;
    service.set_contact(&id, sample_contact())?;
    let outcome = service.advance(&id).await?;
    println!("  Funnel finished at step '{}'", outcome.session.step.label());

    for lead in sink.leads() {
        let payload = serde_json::to_string_pretty(&lead)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("\nRecorded submission payload:\n{payload}");
    }

    Ok(())
}
