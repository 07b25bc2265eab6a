//! Completion sink: el callback externo que recibe las respuestas finales.
//!
//! Se invoca como mucho una vez por flujo, de forma síncrona. El controlador
//! no reintenta ni oculta sus errores: los devuelve como `FlowError::Sink`.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::state::Answers;

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

pub trait CompletionSink {
    fn on_complete(&mut self, answers: Answers) -> Result<(), SinkError>;
}

impl<F> CompletionSink for F where F: FnMut(Answers) -> Result<(), SinkError>
{
    fn on_complete(&mut self, answers: Answers) -> Result<(), SinkError> {
        self(answers)
    }
}

/// Sink que descarta las respuestas.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl CompletionSink for NoopSink {
    fn on_complete(&mut self, _answers: Answers) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink que guarda cada invocación; los clones comparten el mismo buffer,
/// así el caller conserva un handle después de entregar el sink al builder.
#[derive(Clone, Default)]
pub struct CollectingSink {
    received: Arc<Mutex<Vec<Answers>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de invocaciones recibidas.
    pub fn calls(&self) -> usize {
        self.buffer().len()
    }

    /// Respuestas de la última invocación.
    pub fn last(&self) -> Option<Answers> {
        self.buffer().last().cloned()
    }

    // Un pánico de otro handle no invalida lo ya recibido: se lee igual.
    fn buffer(&self) -> MutexGuard<'_, Vec<Answers>> {
        self.received.lock().unwrap_or_else(|poisoned| {
                                 log::warn!("collecting sink lock poisoned, reading recovered buffer");
                                 PoisonError::into_inner(poisoned)
                             })
    }
}

impl fmt::Debug for CollectingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectingSink").field("calls", &self.calls()).finish()
    }
}

impl CompletionSink for CollectingSink {
    fn on_complete(&mut self, answers: Answers) -> Result<(), SinkError> {
        self.received
            .lock()
            .map_err(|e| -> SinkError { format!("collecting sink poisoned: {e}").into() })?
            .push(answers);
        Ok(())
    }
}
