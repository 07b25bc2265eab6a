//! SignFlow: controlador de flujos por pasos y los flujos de la app de
//! aprendizaje de lengua de señas.
//!
//! Re-exporta `signflow-core` (controlador genérico) y `signflow-domain`
//! (onboarding, lecciones, historias).
pub mod errors;

pub use errors::AppError;
pub use signflow_core;
pub use signflow_core::{build_registry, Answers, CollectingSink, CompletionSink, FlowController, FlowError,
                        FlowSnapshot, NavigationIntent, StepKind, StepRegistry, StepSpec, Transition};
pub use signflow_domain;
pub use signflow_domain::{FlowKind, FlowOutcome, LearningConfig};
