//! Definiciones relacionadas a Steps.
//!
//! Un Step es una pantalla con nombre dentro de un flujo. Declara qué campos
//! de `answers` produce su pantalla, cuáles son obligatorios antes de avanzar
//! y si permite volver atrás. El índice no se guarda aquí: lo deriva el
//! `StepRegistry` a partir del orden de registro.

pub mod definition;

pub use definition::{StepKind, StepSpec};
