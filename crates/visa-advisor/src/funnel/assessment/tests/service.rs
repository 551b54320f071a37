use std::sync::Arc;
use std::time::Duration;

use super::common::*;

use crate::funnel::assessment::catalog::Goal;
use crate::funnel::assessment::repository::SessionRepository;
use crate::funnel::assessment::service::AssessmentService;
use crate::funnel::assessment::wizard::WizardStep;

#[tokio::test]
async fn full_funnel_reaches_done_and_delivers_the_lead() {
    let (service, _, sink) = build_service();
    let snapshot = service.create_session().expect("session opens");
    let id = snapshot.session_id;
    assert_eq!(snapshot.step, WizardStep::Step1);
    assert!(snapshot.score.is_none(), "no score before the profile is in");

    let snapshot = service.set_primary(&id, work_primary()).expect("primary set");
    assert_eq!(snapshot.score, Some(89));
    assert_eq!(snapshot.pathway.as_deref(), Some("Germany job-seeker visa"));

    let outcome = service.advance(&id).await.expect("advance to reveal");
    assert!(outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::ScoreReveal);

    let outcome = service.advance(&id).await.expect("advance to deep dive");
    assert_eq!(outcome.session.step, WizardStep::Step2);

    for (question_id, option) in full_deep_dive(Goal::Work) {
        service
            .answer_deep_dive(&id, &question_id, &option)
            .expect("answer recorded");
    }
    let outcome = service.advance(&id).await.expect("advance to contact");
    assert_eq!(outcome.session.step, WizardStep::Step3);

    service.set_contact(&id, ready_contact()).expect("contact set");
    let outcome = service.advance(&id).await.expect("final advance");
    assert!(outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::Done);
    assert!(!outcome.session.submitting);

    let leads = sink.leads();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].goal, "Work");
    assert_eq!(leads[0].budget, "$25k–$50k");
    assert_eq!(leads[0].deep_dive.len(), 6);
    assert_eq!(leads[0].contact["email"], "ada@example.com");
}

/// Funnel policy, not a bug: a dead backend must never keep the
/// visitor from the confirmation step.
#[tokio::test]
async fn done_is_reached_even_when_the_sink_fails() {
    let (service, repository) = build_failing_service();
    let id = service.create_session().expect("session opens").session_id;

    service.set_primary(&id, work_primary()).expect("primary set");
    service.advance(&id).await.expect("to reveal");
    service.advance(&id).await.expect("to deep dive");
    for (question_id, option) in full_deep_dive(Goal::Work) {
        service
            .answer_deep_dive(&id, &question_id, &option)
            .expect("answer recorded");
    }
    service.advance(&id).await.expect("to contact");
    service.set_contact(&id, ready_contact()).expect("contact set");

    let outcome = service.advance(&id).await.expect("final advance must not error");
    assert!(outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::Done);

    let stored = repository
        .fetch(&id)
        .expect("fetch works")
        .expect("session exists");
    assert_eq!(stored.step, WizardStep::Done);
    assert!(!stored.submitting);
}

#[tokio::test]
async fn incomplete_primary_blocks_the_first_advance() {
    let (service, _, sink) = build_service();
    let id = service.create_session().expect("session opens").session_id;

    let mut primary = work_primary();
    primary.timeline = None;
    service.set_primary(&id, primary).expect("primary set");

    let outcome = service.advance(&id).await.expect("advance call succeeds");
    assert!(!outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::Step1);
    assert!(sink.leads().is_empty());
}

#[tokio::test]
async fn five_of_six_deep_dive_answers_stay_blocked() {
    let (service, _, _) = build_service();
    let id = service.create_session().expect("session opens").session_id;
    service.set_primary(&id, work_primary()).expect("primary set");
    service.advance(&id).await.expect("to reveal");
    service.advance(&id).await.expect("to deep dive");

    let answers = full_deep_dive(Goal::Work);
    for (question_id, option) in &answers[..5] {
        service
            .answer_deep_dive(&id, question_id, option)
            .expect("answer recorded");
    }
    let outcome = service.advance(&id).await.expect("advance call succeeds");
    assert!(!outcome.moved, "five of six must not unlock the final step");

    let (question_id, option) = &answers[5];
    service
        .answer_deep_dive(&id, question_id, option)
        .expect("answer recorded");
    let outcome = service.advance(&id).await.expect("advance call succeeds");
    assert!(outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::Step3);
}

#[tokio::test]
async fn back_navigation_preserves_deep_dive_answers() {
    let (service, repository, _) = build_service();
    let id = service.create_session().expect("session opens").session_id;
    service.set_primary(&id, work_primary()).expect("primary set");
    service.advance(&id).await.expect("to reveal");
    service.advance(&id).await.expect("to deep dive");
    for (question_id, option) in full_deep_dive(Goal::Work) {
        service
            .answer_deep_dive(&id, &question_id, &option)
            .expect("answer recorded");
    }
    service.advance(&id).await.expect("to contact");

    let before = repository
        .fetch(&id)
        .expect("fetch works")
        .expect("session exists")
        .deep_dive;

    let outcome = service.back(&id).expect("back to deep dive");
    assert!(outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::Step2);

    let outcome = service.advance(&id).await.expect("forward again");
    assert_eq!(outcome.session.step, WizardStep::Step3);

    let after = repository
        .fetch(&id)
        .expect("fetch works")
        .expect("session exists")
        .deep_dive;
    assert_eq!(before, after);
}

#[tokio::test]
async fn done_is_terminal_and_never_resubmits() {
    let (service, _, sink) = build_service();
    let id = service.create_session().expect("session opens").session_id;
    service.set_primary(&id, work_primary()).expect("primary set");
    service.advance(&id).await.expect("to reveal");
    service.advance(&id).await.expect("to deep dive");
    for (question_id, option) in full_deep_dive(Goal::Work) {
        service
            .answer_deep_dive(&id, &question_id, &option)
            .expect("answer recorded");
    }
    service.advance(&id).await.expect("to contact");
    service.set_contact(&id, ready_contact()).expect("contact set");
    service.advance(&id).await.expect("to done");

    let outcome = service.advance(&id).await.expect("advance call succeeds");
    assert!(!outcome.moved);
    assert_eq!(outcome.session.step, WizardStep::Done);
    assert_eq!(sink.leads().len(), 1, "exactly one delivery");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_final_advances_deliver_exactly_one_lead() {
    let repository = Arc::new(MemoryRepository::default());
    let sink = Arc::new(SlowRecordingSink::new(Duration::from_millis(50)));
    let service = Arc::new(AssessmentService::new(repository, sink.clone()));

    let id = service.create_session().expect("session opens").session_id;
    service.set_primary(&id, work_primary()).expect("primary set");
    service.advance(&id).await.expect("to reveal");
    service.advance(&id).await.expect("to deep dive");
    for (question_id, option) in full_deep_dive(Goal::Work) {
        service
            .answer_deep_dive(&id, &question_id, &option)
            .expect("answer recorded");
    }
    service.advance(&id).await.expect("to contact");
    service.set_contact(&id, ready_contact()).expect("contact set");

    let first = tokio::spawn({
        let service = service.clone();
        let id = id.clone();
        async move { service.advance(&id).await }
    });
    let second = tokio::spawn({
        let service = service.clone();
        let id = id.clone();
        async move { service.advance(&id).await }
    });

    let first = first.await.expect("task joins").expect("advance call succeeds");
    let second = second.await.expect("task joins").expect("advance call succeeds");

    assert_eq!(
        usize::from(first.moved) + usize::from(second.moved),
        1,
        "only one advance wins the final transition"
    );
    assert_eq!(sink.leads().len(), 1, "exactly one delivery");
    assert_eq!(service.get(&id).expect("snapshot").step, WizardStep::Done);
}

#[tokio::test]
async fn unrecognized_nationality_is_dropped_until_reselected() {
    let (service, _, _) = build_service();
    let id = service.create_session().expect("session opens").session_id;

    let mut primary = work_primary();
    primary.nationality = "Germ".to_string();
    let snapshot = service.set_primary(&id, primary).expect("primary set");
    assert!(snapshot.score.is_none(), "half-typed country keeps Step 1 open");

    let snapshot = service.set_primary(&id, work_primary()).expect("primary set");
    assert_eq!(snapshot.score, Some(89));
}
