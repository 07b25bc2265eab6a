use serde::{Deserialize, Serialize};

/// Resultado de un `apply` exitoso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "camelCase")]
pub enum Transition {
    Advanced { from: String, to: String },
    Jumped { from: String, to: String },
    Reverted { from: String, to: String },
    /// `jumpTo` al paso actual: sin cambios.
    Stayed { step_id: String },
    Completed,
}

impl Transition {
    /// Paso destino, si la transición cambió de paso.
    pub fn target(&self) -> Option<&str> {
        match self {
            Transition::Advanced { to, .. } | Transition::Jumped { to, .. } | Transition::Reverted { to, .. } => Some(to),
            Transition::Stayed { .. } | Transition::Completed => None,
        }
    }
}
