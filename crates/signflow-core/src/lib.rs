//! signflow-core: controlador de flujos por pasos (wizards, lecciones,
//! visores de historias).
//!
//! Un flujo se declara como un `StepRegistry` y se recorre con un
//! `FlowController`, que recibe `NavigationIntent`s de la UI, valida los
//! campos requeridos, acumula `Answers` y entrega el resultado final a un
//! `CompletionSink`. Cada mutación queda en un journal append-only que
//! permite reconstruir el estado (`replay::rebuild`).
pub mod constants;
pub mod controller;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod intent;
pub mod registry;
pub mod replay;
pub mod sink;
pub mod state;
pub mod step;

pub use controller::{FlowBuilder, FlowController, Transition};
pub use errors::FlowError;
pub use event::{EntryKind, EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use intent::NavigationIntent;
pub use registry::{build_registry, StepRegistry};
pub use sink::{CollectingSink, CompletionSink, NoopSink, SinkError};
pub use state::{AnswerValue, Answers, FlowSnapshot, FlowState};
pub use step::{StepKind, StepSpec};
