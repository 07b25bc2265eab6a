//! Estado acumulado de un flujo: respuestas + puntero de paso + historial.

mod answers;
mod flow_state;

pub use answers::{AnswerValue, Answers};
pub use flow_state::{FlowSnapshot, FlowState};
