//! Controlador de flujos: el único que muta `FlowState`.
//!
//! Provee el controlador, su builder y helpers para aplicar secuencias de
//! intenciones.

pub mod builder;
pub mod core;
pub mod script;
mod transition;

pub use self::core::FlowController;
pub use builder::FlowBuilder;
pub use transition::Transition;
