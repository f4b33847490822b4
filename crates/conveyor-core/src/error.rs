//! Errors of the layers around the plan model.
//!
//! Structural lookups inside a plan never fail; an absent plan or resource is
//! a normal answer there. [`ConveyorError`] covers persistence, form
//! extraction, the backend and the repository handlers.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConveyorError {
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: String },
    #[error("Resource {resource_type} with ID {id} not found")]
    ResourceNotFound { resource_type: String, id: String },
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The XDG data directory could not be resolved or created
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// A form field or parameter was rejected
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// The backend refused or failed a request
    #[error("Backend error: {message}")]
    Backend { message: String },
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Names the field of an [`ConveyorError::InvalidInput`] before its reason.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn with_reason(self, reason: impl Into<String>) -> ConveyorError {
        ConveyorError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ConveyorError {
    /// Starts an input validation error for `field`.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder {
            field: field.into(),
        }
    }

    pub fn backend(message: impl fmt::Display) -> Self {
        Self::Backend {
            message: message.to_string(),
        }
    }

    pub fn plan_not_found(id: impl Into<String>) -> Self {
        Self::PlanNotFound { id: id.into() }
    }

    pub fn resource_not_found(resource_type: impl fmt::Display, id: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            id: id.into(),
        }
    }

    /// A blocking database task panicked or was cancelled.
    pub(crate) fn join(err: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {err}"),
        }
    }
}

/// Attaches a message to SQLite failures.
pub trait DatabaseResultExt<T> {
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|source| ConveyorError::Database {
            message: message.to_string(),
            source,
        })
    }
}

pub type Result<T> = std::result::Result<T, ConveyorError>;
