use signflow_core::FlowError;
use thiserror::Error;

/// Errores del dominio de aprendizaje (catálogo, respuestas, configuración).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown lesson: {0}")]
    UnknownLesson(String),
    #[error("unknown story: {0}")]
    UnknownStory(String),
    #[error("unknown flow '{0}' (expected onboarding, lesson:<id> or story:<id>)")]
    UnknownFlow(String),
    #[error("missing answer: {0}")]
    MissingAnswer(String),
    #[error("invalid answer for '{field}': {reason}")]
    InvalidAnswer { field: String, reason: String },
    #[error(transparent)]
    Flow(#[from] FlowError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(DomainError::UnknownLesson("x".into()).to_string(), "unknown lesson: x");
        let e = DomainError::InvalidAnswer { field: "email".into(),
                                             reason: "must contain '@'".into() };
        assert_eq!(e.to_string(), "invalid answer for 'email': must contain '@'");
    }

    #[test]
    fn flow_errors_convert() {
        let e: DomainError = FlowError::FlowCompleted.into();
        assert_eq!(e.to_string(), "flow already completed");
    }
}
