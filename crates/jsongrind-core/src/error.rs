//! Error types for the jsongrind core library
//!
//! Copyright (c) 2025 jsongrind Team
//! Licensed under the Apache-2.0 license
//!
//! This module defines the error handling system for jsongrind, using
//! thiserror for ergonomic error definitions and anyhow for flexible error
//! contexts. Errors split into two families: per-run failures, which record a
//! defect in the subject under test and leave the session free to continue,
//! and fatal errors, which mean the session itself cannot proceed.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Main error type for jsongrind operations
#[derive(Error, Debug)]
pub enum Error {
    /// Subject executable failed pre-flight validation
    #[error("subject setup failed: {} - {message}", path.display())]
    Setup {
        path: PathBuf,
        message: String,
    },

    /// Generator emitted a document the reference parser rejects
    #[error("generated document rejected by reference parser: {message}")]
    Generation {
        message: String,
        document: String,
        #[source]
        source: serde_json::Error,
    },

    /// Subject exited nonzero for a grammar-valid document
    #[error("subject rejected document ({status})")]
    SubjectRejected {
        status: ExitStatus,
        document: String,
    },

    /// Subject closed stdin before the whole document was delivered
    #[error("subject stopped reading before end of document")]
    InputNotConsumed {
        document: String,
        #[source]
        source: std::io::Error,
    },

    /// Subject exceeded the configured wall-clock limit
    #[error("subject did not exit within {:.1}s", limit.as_secs_f64())]
    SubjectTimeout {
        document: String,
        limit: Duration,
    },

    /// Statistics requested over an empty run log
    #[error("no runs recorded; statistics are undefined")]
    EmptySession,

    /// A zero-length document entered the run log
    #[error("run {index} recorded an empty document; normalized runtime is undefined")]
    EmptyDocument {
        index: usize,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config {
        message: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds a configuration error from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// True for failures scoped to a single document run.
    ///
    /// Per-run failures are evidence about the subject under test; the
    /// session records them and keeps going. Everything else is fatal.
    pub fn is_per_run(&self) -> bool {
        matches!(
            self,
            Error::SubjectRejected { .. }
                | Error::InputNotConsumed { .. }
                | Error::SubjectTimeout { .. }
        )
    }

    /// The document that triggered this error, when one is attached.
    pub fn document(&self) -> Option<&str> {
        match self {
            Error::Generation { document, .. }
            | Error::SubjectRejected { document, .. }
            | Error::InputNotConsumed { document, .. }
            | Error::SubjectTimeout { document, .. } => Some(document),
            _ => None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
