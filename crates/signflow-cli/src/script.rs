//! Formato de script: una `NavigationIntent` JSON por línea.
//! Las líneas vacías y las que empiezan con `#` se ignoran.

use signflow_core::NavigationIntent;

use crate::error::CliError;

/// Interpreta una línea (`line_no` es 1-based, sólo para el mensaje de error).
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<NavigationIntent>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
                                 .map_err(|e| CliError::Script { line: line_no,
                                                                 message: e.to_string() })
}
