//! Front-end de línea de comandos para recorrer los flujos del catálogo con
//! scripts JSON-lines.
pub mod args;
pub mod error;
pub mod script;
pub mod session;

pub use args::{parse, Command, USAGE};
pub use error::CliError;
pub use session::RunReport;
