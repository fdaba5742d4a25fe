//! Error types for schema analysis.
//!
//! Analysis itself never fails: rules and the association analyzer report
//! "nothing found" instead of erroring. The errors here cover the edges of
//! the engine: constructing the facade, validating configuration, and
//! reading or writing schema snapshots.

use thiserror::Error;

/// Main error type for SchemaLens operations.
#[derive(Debug, Error)]
pub enum SchemaLensError {
    /// The analyzed database was constructed without a schema graph
    #[error("No database provided for analysis")]
    MissingDatabase,

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A configuration referenced a lint rule that is not registered
    #[error("Unknown lint rule: {id}")]
    UnknownRule { id: String },

    /// An info level string could not be parsed
    #[error("Invalid info level '{value}' (expected none, basic, lint or maximum)")]
    InvalidInfoLevel { value: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with SchemaLensError
pub type Result<T> = std::result::Result<T, SchemaLensError>;

impl SchemaLensError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an unknown rule error
    pub fn unknown_rule(id: impl Into<String>) -> Self {
        Self::UnknownRule { id: id.into() }
    }

    /// Creates an invalid info level error
    pub fn invalid_info_level(value: impl Into<String>) -> Self {
        Self::InvalidInfoLevel {
            value: value.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}
