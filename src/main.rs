//! Demo: recorre onboarding, una lección y una historia con intenciones
//! guionadas y registra cada transición.

use log::{info, warn};
use signflow::{Answers, AppError, CollectingSink, FlowController, FlowKind, LearningConfig, NavigationIntent};
use tracing_subscriber::EnvFilter;

fn walk(kind: &FlowKind, config: &LearningConfig, script: Vec<NavigationIntent>) -> Result<(), AppError> {
    let sink = CollectingSink::new();
    let mut flow = FlowController::new(kind.registry()?, sink.clone());
    info!("[{kind}] start at '{}'", flow.current_step_id());

    for intent in script {
        let name = intent.name();
        match flow.apply(intent) {
            Ok(t) => info!("[{kind}] {name}: {t:?}"),
            Err(e) if e.is_user_facing() => warn!("[{kind}] {name}: {e}"),
            Err(e) => return Err(e.into()),
        }
    }

    let Some(answers) = sink.last() else {
        warn!("[{kind}] not completed, stopped at '{}'", flow.current_step_id());
        return Ok(());
    };
    println!("[{kind}] answers: {}", serde_json::to_string(&answers)?);
    println!("[{kind}] {}", kind.outcome(&answers, flow.history(), config)?);
    println!("[{kind}] snapshot: {}", serde_json::to_string_pretty(&flow.snapshot())?);
    Ok(())
}

fn onboarding_script() -> Vec<NavigationIntent> {
    vec![NavigationIntent::next(),
         // sin objetivo: la UI muestra el aviso y se queda en `goal`
         NavigationIntent::next_with(Answers::new()),
         NavigationIntent::next_with(Answers::new().with("goal", "10min")),
         NavigationIntent::back(),
         NavigationIntent::next(),
         NavigationIntent::complete_with(Answers::new().with("email", "a@b.com")
                                                       .with("firstName", "A")
                                                       .with("password", "secret"))]
}

fn lesson_script() -> Vec<NavigationIntent> {
    // intro + cinco letras
    let mut script: Vec<NavigationIntent> = (0..6).map(|_| NavigationIntent::next()).collect();
    script.push(NavigationIntent::next_with(Answers::new().with("q1", "C")));
    script.push(NavigationIntent::next_with(Answers::new().with("q2", "B")));
    script.push(NavigationIntent::complete());
    script
}

fn main() -> Result<(), AppError> {
    signflow::signflow_domain::config::init_dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_env("SIGNFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
                             .with_target(false)
                             .init();

    let config = LearningConfig::from_env();
    info!("pass threshold {}%", config.pass_threshold);

    walk(&FlowKind::Onboarding, &config, onboarding_script())?;
    let lesson: FlowKind = "lesson:alphabet-a-e".parse()?;
    walk(&lesson, &config, lesson_script())?;
    let story: FlowKind = "story:sign-of-the-day".parse()?;
    walk(&story,
         &config,
         vec![NavigationIntent::next(),
              NavigationIntent::jump_to("slide-1"),
              NavigationIntent::jump_to("slide-2"),
              NavigationIntent::next(),
              NavigationIntent::complete()])?;
    Ok(())
}
