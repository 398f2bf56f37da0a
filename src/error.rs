//! Error types for mbtool
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MbError
pub type Result<T> = std::result::Result<T, MbError>;

/// Unified error type for mbtool operations
#[derive(Debug, Error)]
pub enum MbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error(
        "unknown operation '{0}' - known operations: writeSingleCoil, \
         writeMultipleRegisters, writeMultipleCoils, writeSingleRegister, readCoils"
    )]
    UnknownOperation(String),

    // -------------------------------------------------------------------------
    // Modbus Errors
    // -------------------------------------------------------------------------
    /// Exception response or broken frame, as reported by rmodbus
    #[error("Modbus error: {0}")]
    Modbus(rmodbus::ErrorKind),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<rmodbus::ErrorKind> for MbError {
    fn from(kind: rmodbus::ErrorKind) -> Self {
        MbError::Modbus(kind)
    }
}

impl MbError {
    /// Shorthand for a token that failed to parse
    pub(crate) fn invalid(value: &str, reason: impl ToString) -> Self {
        MbError::InvalidValue {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
