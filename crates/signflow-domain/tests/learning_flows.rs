use signflow_core::{Answers, CollectingSink, FlowController, FlowError, NavigationIntent, Transition};
use signflow_domain::{DailyGoal, DomainError, FlowKind, FlowOutcome, LearningConfig};

fn controller(kind: &FlowKind) -> (FlowController, CollectingSink) {
    let sink = CollectingSink::new();
    let flow = FlowController::new(kind.registry().expect("catalog registry"), sink.clone());
    (flow, sink)
}

#[test]
fn onboarding_yields_profile() {
    let kind: FlowKind = "onboarding".parse().unwrap();
    let (mut flow, sink) = controller(&kind);
    flow.apply_all([NavigationIntent::next(),
                    NavigationIntent::next_with(Answers::new().with("goal", "15min")),
                    NavigationIntent::complete_with(Answers::new().with("email", "ana@example.org")
                                                                  .with("firstName", "Ana")
                                                                  .with("password", "hunter22"))])
        .unwrap();
    let answers = sink.last().expect("sink called");
    let out = kind.outcome(&answers, flow.history(), &LearningConfig::default()).unwrap();
    match out {
        FlowOutcome::Onboarding { profile } => {
            assert_eq!(profile.goal, DailyGoal::Serious);
            assert_eq!(profile.email, "ana@example.org");
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn onboarding_with_bad_email_completes_but_profile_fails() {
    let kind = FlowKind::Onboarding;
    let (mut flow, sink) = controller(&kind);
    flow.run_to_completion().unwrap_err();
    flow.apply(NavigationIntent::next_with(Answers::new().with("goal", "5min"))).unwrap();
    flow.apply(NavigationIntent::complete_with(Answers::new().with("email", "nope")
                                                             .with("firstName", "B")
                                                             .with("password", "123456")))
        .unwrap();
    let err = kind.outcome(&sink.last().unwrap(), flow.history(), &LearningConfig::default()).unwrap_err();
    assert!(matches!(err, DomainError::InvalidAnswer { .. }));
}

#[test]
fn lesson_walkthrough_and_grade() {
    let kind: FlowKind = "lesson:greetings".parse().unwrap();
    let (mut flow, sink) = controller(&kind);

    // intro + 4 slides
    for _ in 0..5 {
        flow.apply(NavigationIntent::next()).unwrap();
    }
    assert_eq!(flow.current_step_id(), "quiz-1");

    let err = flow.apply(NavigationIntent::next()).unwrap_err();
    assert!(err.is_user_facing());

    for (i, answer) in ["Hello", "Thank you", "Please"].iter().enumerate() {
        let field = format!("q{}", i + 1);
        flow.apply(NavigationIntent::next_with(Answers::new().with(field, *answer))).unwrap();
    }
    assert_eq!(flow.current_step_id(), "results");
    assert!(matches!(flow.apply(NavigationIntent::back()), Err(FlowError::IllegalTransition { .. })));
    assert_eq!(flow.apply(NavigationIntent::complete()).unwrap(), Transition::Completed);

    let cfg = LearningConfig::default();
    let out = kind.outcome(&sink.last().unwrap(), flow.history(), &cfg).unwrap();
    match out {
        FlowOutcome::Lesson { score, .. } => {
            assert_eq!((score.correct, score.total, score.percent), (2, 3, 67));
            assert!(!score.passed);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn quiz_can_be_revisited_from_results_by_jump() {
    let kind: FlowKind = "lesson:greetings".parse().unwrap();
    let (mut flow, sink) = controller(&kind);
    for _ in 0..5 {
        flow.apply(NavigationIntent::next()).unwrap();
    }
    for n in 1..=3 {
        flow.apply(NavigationIntent::next_with(Answers::new().with(format!("q{n}"), "Please"))).unwrap();
    }
    assert_eq!(flow.current_step_id(), "results");
    assert!(matches!(flow.apply(NavigationIntent::back()), Err(FlowError::IllegalTransition { .. })));

    // back está cerrado, pero quiz-1 está en el historial
    assert_eq!(flow.apply(NavigationIntent::jump_to("quiz-1")).unwrap(),
               Transition::Jumped { from: "results".into(),
                                    to: "quiz-1".into() });
    flow.apply(NavigationIntent::next_with(Answers::new().with("q1", "Hello"))).unwrap();
    flow.apply(NavigationIntent::jump_to("results")).unwrap();
    flow.apply(NavigationIntent::complete()).unwrap();

    let answers = sink.last().unwrap();
    assert_eq!(answers.text("q1"), Some("Hello"));
    match kind.outcome(&answers, flow.history(), &LearningConfig::default()).unwrap() {
        FlowOutcome::Lesson { score, .. } => assert_eq!((score.correct, score.total), (1, 3)),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn story_back_and_forth() {
    let kind: FlowKind = "story:sign-of-the-day".parse().unwrap();
    let (mut flow, sink) = controller(&kind);
    flow.apply_all([NavigationIntent::next(),
                    NavigationIntent::back(),
                    NavigationIntent::next(),
                    NavigationIntent::next(),
                    NavigationIntent::complete()])
        .unwrap();
    assert_eq!(sink.calls(), 1);
    let out = kind.outcome(&sink.last().unwrap(), flow.history(), &LearningConfig::default()).unwrap();
    assert_eq!(out.to_string(), "story sign-of-the-day viewed (3/3 slides)");
}
