//! Configuración del dominio desde variables de entorno.
//! `SIGNFLOW_PASS_THRESHOLD` (porcentaje, 0..=100) y `SIGNFLOW_DEFAULT_FLOW`.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub const DEFAULT_PASS_THRESHOLD: u8 = 70;
pub const DEFAULT_FLOW: &str = "onboarding";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // sin .env no es un error
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningConfig {
    /// Porcentaje mínimo para aprobar un quiz.
    pub pass_threshold: u8,
    /// Flujo que arranca `signflow run` sin argumento.
    pub default_flow: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self { pass_threshold: DEFAULT_PASS_THRESHOLD,
               default_flow: DEFAULT_FLOW.to_string() }
    }
}

impl LearningConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente arbitraria de variables.
    /// Valores no numéricos caen al default; los numéricos se recortan a 100.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let pass_threshold = match lookup("SIGNFLOW_PASS_THRESHOLD").map(|v| v.trim().parse::<i64>()) {
            Some(Ok(v)) => v.clamp(0, 100) as u8,
            Some(Err(_)) => {
                log::warn!("SIGNFLOW_PASS_THRESHOLD is not a number, using {DEFAULT_PASS_THRESHOLD}");
                DEFAULT_PASS_THRESHOLD
            }
            None => DEFAULT_PASS_THRESHOLD,
        };
        let default_flow = lookup("SIGNFLOW_DEFAULT_FLOW").map(|v| v.trim().to_string())
                                                           .filter(|v| !v.is_empty())
                                                           .unwrap_or_else(|| DEFAULT_FLOW.to_string());
        Self { pass_threshold,
               default_flow }
    }
}

/// Forzar carga temprana de .env desde los binarios.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
