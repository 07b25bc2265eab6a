//! Journal de navegación: tipos de evento y trait EventStore.

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{EntryKind, FlowEvent, FlowEventKind};
