pub mod types;
pub use types::{build_registry, StepRegistry};
