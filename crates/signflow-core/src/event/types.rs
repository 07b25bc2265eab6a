//! Tipos de evento del journal y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada mutación del `FlowController` emite un evento a un `EventStore`
//!   append-only.
//! - Con los eventos se puede reconstruir el `FlowState` (ver `replay`) sin
//!   tocar el controlador.
//! - Los rechazos (`TransitionRejected`) quedan registrados para diagnósticos
//!   de desarrollo; no cambian el estado.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FlowError;
use crate::state::Answers;

/// Cómo se entró a un paso hacia adelante o por salto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Next,
    Jump,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Primer evento de un `flow_id`: fija el registro usado.
    FlowInitialized {
        registry_hash: String,
        step_count: usize,
        first_step: String,
    },
    /// Payload mergeado sobre `answers` mientras `step_id` era el paso actual.
    AnswersMerged { step_id: String, values: Answers },
    StepEntered {
        step_index: usize,
        step_id: String,
        via: EntryKind,
    },
    /// `back`: se quitó `from_step_id` del historial.
    StepReverted { from_step_id: String, to_step_id: String },
    TransitionRejected { step_id: String, error: FlowError },
    FlowReset,
    /// Cierre; fingerprint del JSON canónico de las respuestas finales.
    FlowCompleted { answers_fingerprint: String },
}

impl FlowEventKind {
    /// Nombre compacto, útil en logs.
    pub fn variant_name(&self) -> &'static str {
        match self {
            FlowEventKind::FlowInitialized { .. } => "FlowInitialized",
            FlowEventKind::AnswersMerged { .. } => "AnswersMerged",
            FlowEventKind::StepEntered { .. } => "StepEntered",
            FlowEventKind::StepReverted { .. } => "StepReverted",
            FlowEventKind::TransitionRejected { .. } => "TransitionRejected",
            FlowEventKind::FlowReset => "FlowReset",
            FlowEventKind::FlowCompleted { .. } => "FlowCompleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
