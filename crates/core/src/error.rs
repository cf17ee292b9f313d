//! Error types shared across the choiceparam crates

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for choiceparam operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    #[diagnostic(code(choiceparam::config::invalid))]
    Configuration {
        /// The error message describing the configuration issue
        message: String,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(choiceparam::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<std::path::Path>>,
        /// Description of the operation that failed
        operation: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(code(choiceparam::serialization))]
    Serialization {
        /// The error message describing the serialization issue
        message: String,
    },

    /// A value was requested that is not in the choice list of a
    /// non-editable parameter
    #[error("Illegal choice '{value}' in parameter '{parameter}'")]
    #[diagnostic(code(choiceparam::parameter::illegal_choice))]
    IllegalChoice {
        /// The rejected value
        value: String,
        /// The parameter the value was supplied for
        parameter: String,
    },

    /// Two store entries were configured with the same name
    #[error("Duplicate choice list name '{name}'")]
    #[diagnostic(code(choiceparam::store::duplicate_name))]
    DuplicateName {
        /// The conflicting entry name
        name: String,
    },

    /// Database query failed
    #[error("Database error: {message}")]
    #[diagnostic(code(choiceparam::database))]
    Database {
        /// The error message from the database driver
        message: String,
    },

    /// Script evaluation failed
    #[error("Script error: {message}")]
    #[diagnostic(code(choiceparam::script))]
    Script {
        /// The error message from the script engine
        message: String,
    },
}

impl Error {
    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(|p| p.into_boxed_path()),
            operation: operation.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an illegal-choice error
    pub fn illegal_choice(value: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::IllegalChoice {
            value: value.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a duplicate-name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a script error
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }
}

/// Result type for choiceparam operations
pub type Result<T> = std::result::Result<T, Error>;
