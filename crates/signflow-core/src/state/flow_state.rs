use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Answers;

/// Progreso de una instancia de flujo.
///
/// Invariante: `current_step_id` es siempre el último elemento de `history`.
/// Sólo el controlador (y el replay del journal) lo mutan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    current_step_id: String,
    answers: Answers,
    history: Vec<String>,
    completed: bool,
}

impl FlowState {
    /// Estado inicial: primer paso, sin respuestas, historial = [primer paso].
    pub fn initial(first_step_id: &str) -> Self {
        Self { current_step_id: first_step_id.to_string(),
               answers: Answers::new(),
               history: vec![first_step_id.to_string()],
               completed: false }
    }

    pub fn current_step_id(&self) -> &str {
        &self.current_step_id
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn merge(&mut self, payload: &Answers) -> Vec<String> {
        self.answers.merge(payload)
    }

    pub(crate) fn enter(&mut self, step_id: &str) {
        self.current_step_id = step_id.to_string();
        self.history.push(step_id.to_string());
    }

    /// Quita la cola del historial. Devuelve el nuevo paso actual, o `None`
    /// (sin cambios) si sólo queda un elemento.
    pub(crate) fn pop(&mut self) -> Option<&str> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let tail = self.history.last()?;
        self.current_step_id.clone_from(tail);
        Some(&self.current_step_id)
    }

    pub(crate) fn reset(&mut self, first_step_id: &str) {
        *self = Self::initial(first_step_id);
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// Lo que el caller lee después de cada `apply` para decidir qué renderizar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub flow_id: Uuid,
    pub current_step_id: String,
    pub current_index: usize,
    pub answers: Answers,
    pub history: Vec<String>,
    pub completed: bool,
}
