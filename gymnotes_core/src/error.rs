//! Error types for the gymnotes_core library.

use crate::types::FieldKind;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gymnotes_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backing table store rejected an operation or could not be reached
    #[error("Table store error: {0}")]
    Gateway(String),

    /// The terminal input stream ended before the session finished
    #[error("Input closed before the session finished")]
    InputClosed,
}

/// Why a raw record was rejected by the record validator.
///
/// Positions are 1-based so they can be shown to the operator as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Exactly {expected} values required, you provided {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("Value {position} ({value:?}) is not a valid {kind}")]
    InvalidField {
        position: usize,
        kind: FieldKind,
        value: String,
    },
}
