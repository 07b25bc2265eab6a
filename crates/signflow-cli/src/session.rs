//! Ejecución de los subcomandos sobre lectores/escritores genéricos para
//! poder probarlos sin proceso.

use std::io::{BufRead, Write};

use signflow_core::{Answers, CollectingSink, FlowController, FlowEvent, FlowEventKind, FlowError, StepRegistry};
use signflow_domain::onboarding::SECRET_FIELDS;
use signflow_domain::{FlowKind, FlowOutcome, LearningConfig};

use crate::error::CliError;
use crate::script::parse_line;

/// Resumen de una ejecución de `run`.
#[derive(Debug, Default)]
pub struct RunReport {
    pub applied: usize,
    pub rejected: usize,
    pub completed: bool,
    pub outcome: Option<FlowOutcome>,
}

pub fn list<W: Write>(out: &mut W) -> Result<(), CliError> {
    for kind in FlowKind::all() {
        let registry = kind.registry()?;
        writeln!(out, "{:<24} {:<28} {} steps", kind.to_string(), kind.title()?, registry.len())?;
    }
    Ok(())
}

pub fn steps<W: Write>(flow: &str, out: &mut W) -> Result<(), CliError> {
    let kind: FlowKind = flow.parse()?;
    print_steps(&kind.registry()?, out)
}

fn print_steps<W: Write>(registry: &StepRegistry, out: &mut W) -> Result<(), CliError> {
    for (i, step) in registry.iter().enumerate() {
        let kind = serde_json::to_value(step.kind).ok()
                                                  .and_then(|v| v.as_str().map(str::to_string))
                                                  .unwrap_or_default();
        write!(out, "{i:>2}. {:<18} {:<9}", step.id, kind)?;
        if !step.required_fields.is_empty() {
            write!(out, " requires [{}]", step.required_fields.join(", "))?;
        }
        if !step.allow_back {
            write!(out, " no-back")?;
        }
        writeln!(out, "  {}", step.title)?;
    }
    Ok(())
}

/// Corre un flujo leyendo intenciones de `input`.
///
/// Cada intención aplicada imprime el snapshot como una línea JSON en `out`.
/// Los errores de validación se informan en `hints` y la lectura sigue;
/// cualquier otro error de flujo corta la ejecución. Los campos secretos
/// (`password`) se enmascaran en todo lo que se imprime.
pub fn run<R, W, H>(kind: &FlowKind,
                    config: &LearningConfig,
                    input: R,
                    journal: bool,
                    out: &mut W,
                    hints: &mut H)
                    -> Result<RunReport, CliError>
    where R: BufRead,
          W: Write,
          H: Write
{
    let sink = CollectingSink::new();
    let mut flow = FlowController::builder(kind.registry()?).on_complete(sink.clone())
                                                             .build();
    let mut report = RunReport::default();
    log::info!("running {kind} (flow {})", flow.flow_id());

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let Some(intent) = parse_line(i + 1, &line)? else {
            continue;
        };
        let intent_name = intent.name();
        match flow.apply(intent) {
            Ok(transition) => {
                report.applied += 1;
                match transition.target() {
                    Some(to) => log::debug!("{kind}: {intent_name} -> '{to}'"),
                    None => log::debug!("{kind}: {transition:?}"),
                }
                let mut snapshot = flow.snapshot();
                snapshot.answers = redact(&snapshot.answers);
                writeln!(out, "{}", serde_json::to_string(&snapshot).map_err(io_err)?)?;
            }
            Err(err @ FlowError::Validation { .. }) => {
                report.rejected += 1;
                writeln!(hints, "hint: {err}")?;
            }
            Err(err) => {
                log::error!("{kind}: {err}");
                if journal {
                    write_journal(&flow, out)?;
                }
                return Err(err.into());
            }
        }
    }

    report.completed = flow.is_completed();
    match sink.last() {
        Some(answers) => {
            log::debug!("{kind} collected [{}]", answers.keys().collect::<Vec<_>>().join(", "));
            writeln!(out, "answers: {}", serde_json::to_string(&redact(&answers)).map_err(io_err)?)?;
            match kind.outcome(&answers, flow.history(), config) {
                Ok(outcome) => {
                    writeln!(out, "summary: {outcome}")?;
                    report.outcome = Some(outcome);
                }
                Err(err) => {
                    log::warn!("{kind} completed but its summary is unavailable: {err}");
                    writeln!(hints, "hint: {err}")?;
                }
            }
        }
        None => {
            writeln!(hints,
                     "input ended at step '{}' before the flow was completed",
                     flow.current_step_id())?;
        }
    }
    if journal {
        write_journal(&flow, out)?;
    }
    Ok(report)
}

fn write_journal<W: Write>(flow: &FlowController, out: &mut W) -> Result<(), CliError> {
    for event in flow.events() {
        writeln!(out, "{}", serde_json::to_string(&redact_event(event)).map_err(io_err)?)?;
    }
    Ok(())
}

const MASK: &str = "******";

/// Copia de `answers` con los campos secretos enmascarados.
fn redact(answers: &Answers) -> Answers {
    let mut shown = answers.clone();
    for field in SECRET_FIELDS {
        if shown.contains_key(field) {
            shown.insert(*field, MASK);
        }
    }
    shown
}

fn redact_event(mut event: FlowEvent) -> FlowEvent {
    if let FlowEventKind::AnswersMerged { values, .. } = &mut event.kind {
        *values = redact(values);
    }
    event
}

fn io_err(e: serde_json::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e)
}
