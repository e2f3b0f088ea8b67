//! Error types for unixprint streams.
//!
//! This module provides:
//! - `StreamError`: Construction-time failures, surfaced immediately
//! - `Stage`: Indicates which stream operation a write failure came from
//! - `DeferredWriteError`: A recorded write failure with context

use std::fmt;
use std::io;

use thiserror::Error;

/// Errors raised while constructing a stream or resolving its options.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The destination could not be opened for writing.
    #[error("cannot open '{target}' for writing: {source}")]
    ResourceNotFound {
        /// Identifier of the destination (file path, "-" for stdout, etc.)
        target: String,
        #[source]
        source: io::Error,
    },

    /// The destination already exists and the policy forbids replacing it.
    #[error("'{target}' already exists")]
    ResourceExists { target: String },

    /// The requested character encoding is not known.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The requested line terminator cannot be used.
    #[error("invalid terminator: {0}")]
    InvalidTerminator(String),

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StreamError {
    pub(crate) fn open(target: impl Into<String>, source: io::Error) -> Self {
        StreamError::ResourceNotFound {
            target: target.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while writing a value
    Print,
    /// Error while writing the line terminator
    Terminate,
    Flush,
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Print => write!(f, "Print"),
            Stage::Terminate => write!(f, "Terminate"),
            Stage::Flush => write!(f, "Flush"),
            Stage::Close => write!(f, "Close"),
        }
    }
}

/// A write failure recorded on a stream instead of being raised.
///
/// Print operations never return errors; the first failure is kept here
/// until the caller inspects it with `check_error`, `error` or `take_error`.
#[derive(Debug)]
pub struct DeferredWriteError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the target (file path, "-" for stdout, etc.)
    pub target: String,
    /// The underlying error
    pub error: io::Error,
}

impl DeferredWriteError {
    pub(crate) fn new(stage: Stage, target: &str, error: io::Error) -> Self {
        Self {
            stage,
            target: target.to_string(),
            error,
        }
    }

    /// The kind of the underlying I/O error.
    pub fn kind(&self) -> io::ErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for DeferredWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for DeferredWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<DeferredWriteError> for io::Error {
    fn from(e: DeferredWriteError) -> Self {
        let kind = e.error.kind();
        io::Error::new(kind, e)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
