//! Reconstrucción de `FlowState` a partir del journal.
//!
//! Replay lineal: consume los eventos en orden de `seq` y aplica cada uno
//! sobre un `FlowState`. Los rechazos no cambian el estado. El resultado
//! debe coincidir con el estado vivo del controlador que emitió el journal.

use crate::errors::FlowError;
use crate::event::{FlowEvent, FlowEventKind};
use crate::registry::StepRegistry;
use crate::state::FlowState;

pub fn rebuild(registry: &StepRegistry, events: &[FlowEvent]) -> Result<FlowState, FlowError> {
    let mut iter = events.iter();
    let mut state = match iter.next().map(|e| &e.kind) {
        Some(FlowEventKind::FlowInitialized { registry_hash, first_step, .. }) => {
            if registry_hash != registry.registry_hash() {
                return Err(FlowError::Configuration("journal was recorded with a different step registry".into()));
            }
            registry.step_by_id(first_step)?;
            FlowState::initial(first_step)
        }
        _ => return Err(FlowError::Configuration("journal must start with FlowInitialized".into())),
    };
    let first = registry.first().id.as_str();

    for ev in iter {
        match &ev.kind {
            FlowEventKind::FlowInitialized { .. } => {
                return Err(FlowError::Configuration(format!("duplicated FlowInitialized at seq {}", ev.seq)));
            }
            FlowEventKind::AnswersMerged { values, .. } => {
                state.merge(values);
            }
            FlowEventKind::StepEntered { step_id, .. } => {
                registry.step_by_id(step_id)?;
                state.enter(step_id);
            }
            FlowEventKind::StepReverted { to_step_id, .. } => {
                let to = state.pop();
                if to != Some(to_step_id.as_str()) {
                    return Err(FlowError::Configuration(format!("journal revert at seq {} does not match history",
                                                                ev.seq)));
                }
            }
            FlowEventKind::TransitionRejected { .. } => {}
            FlowEventKind::FlowReset => state.reset(first),
            FlowEventKind::FlowCompleted { .. } => state.mark_completed(),
        }
    }
    Ok(state)
}
