//! CLI error type

use thiserror::Error;

/// Errors raised by the command implementations
#[derive(Debug, Error)]
pub enum CliError {
    /// The programmer name is not known or not compiled in
    #[error("Unknown programmer: {0}")]
    UnknownProgrammer(String),

    /// Framing or device error from the core
    #[error("{0}")]
    Mpsse(#[from] mpsse_core::Error),

    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
