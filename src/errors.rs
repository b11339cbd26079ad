//! Error types for the dday application.
//!
//! This module defines the error enum shared by date arithmetic, the event
//! store, persistence and the command-line front end.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the dday application.
#[derive(Error, Debug)]
pub enum DdayError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A date string could not be read as a calendar date.
    #[error("Invalid date '{input}': {source}")]
    DateParse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Event was not found when performing an operation.
    #[error("Event not found: {id}")]
    EventNotFound { id: String },

    /// User input rejected by validation.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    EditorError { message: String },
}
