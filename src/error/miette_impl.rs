//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{DeferredWriteError, StreamError};

/// A diagnostic wrapper for stream errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct StreamDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<StreamError> for StreamDiagnostic {
    fn from(e: StreamError) -> Self {
        let help = match &e {
            StreamError::ResourceNotFound { .. } => {
                Some("Check that the parent directory exists and is writable".into())
            }
            StreamError::ResourceExists { .. } => {
                Some("Use the 'overwrite' or 'append' file exists policy".into())
            }
            StreamError::UnsupportedEncoding(_) => {
                Some("Use a WHATWG encoding label such as 'utf-8' or 'iso-8859-1'".into())
            }
            StreamError::InvalidTerminator(_) | StreamError::Config(_) => None,
        };
        StreamDiagnostic {
            message: e.to_string(),
            source: Some(Box::new(e)),
            help,
            severity: Severity::Error,
        }
    }
}

impl From<DeferredWriteError> for StreamDiagnostic {
    fn from(e: DeferredWriteError) -> Self {
        StreamDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            source: Some(Box::new(e.error)),
            help: Some("The destination stopped accepting output".into()),
            severity: Severity::Error,
        }
    }
}

impl From<StreamError> for miette::Report {
    fn from(e: StreamError) -> Self {
        miette::Report::new(StreamDiagnostic::from(e))
    }
}
