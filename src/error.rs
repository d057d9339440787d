use thiserror::Error;

use crate::ai::provider::AiError;

/// Startup and server errors for sql-autocomplete
///
/// The suggestion path never surfaces these; they only come from loading
/// configuration, building providers, or running the relay.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid config {path}: {message}")]
    Config { path: String, message: String },

    #[error("Schema file {path} could not be read: {message}")]
    Schema { path: String, message: String },

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
