use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use signflow_cli::{parse, session, CliError, Command, USAGE};
use signflow_domain::{config, FlowKind, LearningConfig};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("SIGNFLOW_LOG").or_else(|_| EnvFilter::try_from_default_env())
                                                        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(false)
                             .with_writer(io::stderr)
                             .init();
}

fn dispatch(command: Command) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::List => session::list(&mut out),
        Command::Steps { flow } => session::steps(&flow, &mut out),
        Command::Run { flow, script, journal } => {
            let config = LearningConfig::from_env();
            let kind: FlowKind = flow.as_deref().unwrap_or(&config.default_flow).parse()?;
            let mut hints = io::stderr();
            let report = match script {
                Some(path) => {
                    let file = File::open(&path)?;
                    session::run(&kind, &config, BufReader::new(file), journal, &mut out, &mut hints)?
                }
                None => session::run(&kind, &config, io::stdin().lock(), journal, &mut out, &mut hints)?,
            };
            log::info!("{kind}: {} applied, {} rejected, completed={}",
                       report.applied,
                       report.rejected,
                       report.completed);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    config::init_dotenv();
    init_logging();

    let result = parse(std::env::args().skip(1)).and_then(dispatch);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
