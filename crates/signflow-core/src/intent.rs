//! Intenciones de navegación que la UI envía al controlador.
//!
//! Forma JSON (tag `type`, camelCase):
//! `{"type":"next","payload":{...}}`, `{"type":"back"}`,
//! `{"type":"jumpTo","stepId":"goal"}`, `{"type":"complete","payload":{...}}`.

use serde::{Deserialize, Serialize};

use crate::state::Answers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavigationIntent {
    Next {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<Answers>,
    },
    Back,
    #[serde(rename_all = "camelCase")]
    JumpTo { step_id: String },
    Complete {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<Answers>,
    },
}

impl NavigationIntent {
    pub fn next() -> Self {
        NavigationIntent::Next { payload: None }
    }

    pub fn next_with(payload: Answers) -> Self {
        NavigationIntent::Next { payload: Some(payload) }
    }

    pub fn back() -> Self {
        NavigationIntent::Back
    }

    pub fn jump_to(step_id: impl Into<String>) -> Self {
        NavigationIntent::JumpTo { step_id: step_id.into() }
    }

    pub fn complete() -> Self {
        NavigationIntent::Complete { payload: None }
    }

    pub fn complete_with(payload: Answers) -> Self {
        NavigationIntent::Complete { payload: Some(payload) }
    }

    pub fn payload(&self) -> Option<&Answers> {
        match self {
            NavigationIntent::Next { payload } | NavigationIntent::Complete { payload } => payload.as_ref(),
            NavigationIntent::Back | NavigationIntent::JumpTo { .. } => None,
        }
    }

    /// Nombre corto usado en logs y mensajes de error.
    pub fn name(&self) -> &'static str {
        match self {
            NavigationIntent::Next { .. } => "next",
            NavigationIntent::Back => "back",
            NavigationIntent::JumpTo { .. } => "jumpTo",
            NavigationIntent::Complete { .. } => "complete",
        }
    }
}
