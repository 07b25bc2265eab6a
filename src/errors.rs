use signflow_core::FlowError;
use signflow_domain::DomainError;
use thiserror::Error;

/// Error de nivel aplicación para binarios y demos.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de flujo: {0}")]
    Flow(#[from] FlowError),
    #[error("Error de dominio: {0}")]
    Domain(#[from] DomainError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
}
