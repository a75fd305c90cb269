//! Error types for the cadence_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cadence_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Program failed shape validation; a session cannot be built from it
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    /// No built-in program with the requested id
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    /// Tick driver could not be set up
    #[error("Driver error: {0}")]
    Driver(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
