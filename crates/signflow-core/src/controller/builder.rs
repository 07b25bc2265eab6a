//! Builder para `FlowController`.
//!
//! ```
//! use signflow_core::{build_registry, CollectingSink, FlowController, StepSpec};
//!
//! let registry = build_registry([StepSpec::new("intro"), StepSpec::new("outro")]).unwrap();
//! let sink = CollectingSink::new();
//! let flow = FlowController::builder(registry).on_complete(sink.clone()).build();
//! assert_eq!(flow.current_step_id(), "intro");
//! ```

use uuid::Uuid;

use super::FlowController;
use crate::event::{EventStore, InMemoryEventStore};
use crate::registry::StepRegistry;
use crate::sink::CompletionSink;

pub struct FlowBuilder<E: EventStore = InMemoryEventStore> {
    registry: StepRegistry,
    sink: Option<Box<dyn CompletionSink>>,
    event_store: E,
    flow_id: Option<Uuid>,
}

impl FlowBuilder<InMemoryEventStore> {
    pub fn new(registry: StepRegistry) -> Self {
        Self { registry,
               sink: None,
               event_store: InMemoryEventStore::default(),
               flow_id: None }
    }
}

impl<E: EventStore> FlowBuilder<E> {
    /// Sink invocado una vez al completar. Sin sink, las respuestas finales
    /// sólo quedan disponibles en el controlador.
    pub fn on_complete<S>(mut self, sink: S) -> Self
        where S: CompletionSink + 'static
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Reemplaza el journal en memoria por otro `EventStore`.
    pub fn with_event_store<E2: EventStore>(self, event_store: E2) -> FlowBuilder<E2> {
        FlowBuilder { registry: self.registry,
                      sink: self.sink,
                      event_store,
                      flow_id: self.flow_id }
    }

    /// Fija el id de la instancia (por defecto uno v4 nuevo).
    pub fn with_flow_id(mut self, flow_id: Uuid) -> Self {
        self.flow_id = Some(flow_id);
        self
    }

    pub fn build(self) -> FlowController<E> {
        let flow_id = self.flow_id.unwrap_or_else(Uuid::new_v4);
        FlowController::from_parts(flow_id, self.registry, self.sink, self.event_store)
    }
}
