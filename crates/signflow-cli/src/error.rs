use signflow_core::FlowError;
use signflow_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl CliError {
    /// Código de salida del proceso: 2 para entrada mal formada, 4 para
    /// fallos del flujo.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) | CliError::Script { .. } | CliError::Io(_) => 2,
            CliError::Domain(DomainError::UnknownFlow(_) | DomainError::UnknownLesson(_) | DomainError::UnknownStory(_)) => 2,
            CliError::Domain(_) | CliError::Flow(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), 2);
        assert_eq!(CliError::Script { line: 3,
                                      message: "bad".into() }.exit_code(),
                   2);
        assert_eq!(CliError::from(DomainError::UnknownFlow("q".into())).exit_code(), 2);
        assert_eq!(CliError::from(FlowError::FlowCompleted).exit_code(), 4);
        assert_eq!(CliError::from(FlowError::NotFound("x".into())).exit_code(), 4);
    }
}
