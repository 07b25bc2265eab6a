//! Constantes del controlador.
//!
//! `CONTROLLER_VERSION` forma parte del input de `registry_hash`: un cambio
//! incompatible en la semántica de navegación debe cambiar el hash aunque los
//! pasos declarados sean los mismos.

/// Versión lógica de la semántica de navegación.
pub const CONTROLLER_VERSION: &str = "N1.0";
