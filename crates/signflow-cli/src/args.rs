//! Parseo manual de argumentos: `list`, `steps <flow>`,
//! `run [<flow>] [--script <file>] [--journal]`.

use std::path::PathBuf;

use crate::error::CliError;

pub const USAGE: &str = "usage:
  signflow list
  signflow steps <flow>
  signflow run [<flow>] [--script <file>] [--journal]

flows: onboarding | lesson:<id> | story:<id>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Steps { flow: String },
    Run { flow: Option<String>, script: Option<PathBuf>, journal: bool },
}

pub fn parse<I, S>(args: I) -> Result<Command, CliError>
    where I: IntoIterator<Item = S>,
          S: Into<String>
{
    let mut args = args.into_iter().map(Into::into);
    let Some(cmd) = args.next() else {
        return Ok(Command::Help);
    };
    match cmd.as_str() {
        "help" | "-h" | "--help" => Ok(Command::Help),
        "list" => {
            no_more(args)?;
            Ok(Command::List)
        }
        "steps" => {
            let flow = args.next().ok_or_else(|| usage("steps needs a flow"))?;
            no_more(args)?;
            Ok(Command::Steps { flow })
        }
        "run" => {
            let mut flow = None;
            let mut script = None;
            let mut journal = false;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--journal" => journal = true,
                    "--script" => {
                        let path = args.next().ok_or_else(|| usage("--script needs a file"))?;
                        script = Some(PathBuf::from(path));
                    }
                    other if other.starts_with("--") => return Err(usage(&format!("unknown option {other}"))),
                    _ if flow.is_none() => flow = Some(arg),
                    _ => return Err(usage(&format!("unexpected argument {arg}"))),
                }
            }
            Ok(Command::Run { flow,
                              script,
                              journal })
        }
        other => Err(usage(&format!("unknown command {other}"))),
    }
}

fn no_more(mut rest: impl Iterator<Item = String>) -> Result<(), CliError> {
    match rest.next() {
        Some(extra) => Err(usage(&format!("unexpected argument {extra}"))),
        None => Ok(()),
    }
}

fn usage(msg: &str) -> CliError {
    CliError::Usage(format!("{msg}\n{USAGE}"))
}
