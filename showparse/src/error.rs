//! Error types for showparse.
//!
//! Extraction itself never fails: unmatched lines are skipped and failed
//! coercions keep the raw text. Errors only come from the edges, the device
//! that runs the command, parser lookup, and schema validation.

use thiserror::Error;

/// Main error type for showparse operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command execution errors
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Parser lookup and delegation errors
    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    /// Result record does not match the declared schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Errors raised by a [`Device`](crate::device::Device) while running a command.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The device could not produce output for a command
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The device has no REST interface
    #[error("REST request to '{path}' is not supported by this device")]
    RestUnsupported { path: String },

    /// The REST request failed
    #[error("REST request to '{path}' failed: {message}")]
    RestFailed { path: String, message: String },
}

/// Parser registry and delegation errors.
#[derive(Error, Debug)]
pub enum ParserError {
    /// No parser registered for the command
    #[error("No parser for '{command}' on platform '{os}'")]
    UnknownCommand { os: String, command: String },

    /// No parsers registered for the platform at all
    #[error("Unknown platform: '{os}'")]
    UnknownPlatform { os: String },

    /// A parser for the command is already registered
    #[error("Parser for '{command}' on platform '{os}' is already registered")]
    AlreadyRegistered { os: String, command: String },

    /// Invalid regex pattern in a rule
    #[error("Invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Delegated parsing requested without an abstract parser configured
    #[error("No abstract parser configured for delegated command '{command}'")]
    NoAbstractParser { command: String },

    /// The abstract parser rejected the output. Returned by
    /// [`AbstractParser`](crate::parser::AbstractParser) implementations;
    /// the session passes it through unchanged.
    #[error("Abstract parser failed on '{command}': {message}")]
    Delegation { command: String, message: String },

    /// Invalid session configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Schema violations found after extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required key is absent
    #[error("Missing required key '{key}' at '{path}'")]
    MissingKey { path: String, key: String },

    /// A key is present that the schema does not declare
    #[error("Unexpected key '{key}' at '{path}'")]
    UnexpectedKey { path: String, key: String },

    /// A value has the wrong type
    #[error("Expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },
}

/// Result type alias using showparse's Error.
pub type Result<T> = std::result::Result<T, Error>;
