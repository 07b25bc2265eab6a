//! Errores del controlador de flujos.
//!
//! Todas las operaciones devuelven `Result<_, FlowError>` de forma síncrona;
//! nada se reintenta. Sólo `Validation` está pensada para mostrarse al
//! usuario final; el resto indica un bug en el caller o en la configuración
//! del registro y va a diagnósticos de desarrollo.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum FlowError {
    /// Registro de pasos mal formado. Fatal, se detecta al registrar.
    #[error("invalid step registry: {0}")]
    Configuration(String),
    /// Falta un campo requerido al avanzar. Recuperable (re-prompt).
    #[error("step '{step_id}' requires field '{field}'")]
    Validation { step_id: String, field: String },
    /// Back/jump/complete no permitido desde el paso actual.
    #[error("cannot {intent} from step '{from}': {reason}")]
    IllegalTransition { from: String, intent: String, reason: String },
    #[error("step not found: {0}")]
    NotFound(String),
    #[error("flow already completed")]
    FlowCompleted,
    /// El sink de completado devolvió error. El flujo ya quedó completado.
    #[error("completion sink failed: {0}")]
    Sink(String),
}

impl FlowError {
    pub(crate) fn illegal(from: &str, intent: &str, reason: impl Into<String>) -> Self {
        FlowError::IllegalTransition { from: from.to_string(),
                                       intent: intent.to_string(),
                                       reason: reason.into() }
    }

    /// `true` sólo para errores que la UI debe mostrar ("completa este campo").
    pub fn is_user_facing(&self) -> bool {
        matches!(self, FlowError::Validation { .. })
    }

    /// Campo faltante si el error es de validación.
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            FlowError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
