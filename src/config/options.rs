//! Stream construction options.

use std::str::FromStr;

use crate::encoding::TextEncoding;
use crate::error::StreamError;
use crate::terminator::Terminator;

/// Auto-flush setting used when a caller does not choose one.
///
/// Applies to every construction path, including wrapping an already-open
/// sink without an explicit flag.
pub const DEFAULT_AUTO_FLUSH: bool = true;

/// Policy for handling existing output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileExistsPolicy {
    /// Truncate existing files
    #[default]
    Overwrite,
    /// Append to existing files
    Append,
    /// Return an error if the file exists
    Error,
}

impl FromStr for FileExistsPolicy {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(FileExistsPolicy::Overwrite),
            "append" => Ok(FileExistsPolicy::Append),
            "error" => Ok(FileExistsPolicy::Error),
            other => Err(StreamError::Config(format!(
                "unknown file exists policy: {other}"
            ))),
        }
    }
}

/// Options applied when a stream is constructed.
///
/// Encoding names are kept verbatim and resolved by `resolve_encoding`, so
/// an unknown name fails before any destination is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    pub terminator: Terminator,
    pub auto_flush: bool,
    /// Named character encoding; `None` means UTF-8
    pub encoding: Option<String>,
    pub file_exists_policy: FileExistsPolicy,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            terminator: Terminator::Lf,
            auto_flush: DEFAULT_AUTO_FLUSH,
            encoding: None,
            file_exists_policy: FileExistsPolicy::default(),
        }
    }
}

impl StreamOptions {
    /// LF terminator, default auto-flush, UTF-8, overwrite existing files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line terminator.
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Flush after every terminated line.
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    /// Set the encoding by name. The name is checked when a stream is
    /// built, or earlier with [`resolve_encoding`](Self::resolve_encoding).
    pub fn with_encoding(mut self, name: impl Into<String>) -> Self {
        self.encoding = Some(name.into());
        self
    }

    /// Choose what opening an existing file does.
    pub fn with_file_exists_policy(mut self, policy: FileExistsPolicy) -> Self {
        self.file_exists_policy = policy;
        self
    }

    /// Resolve the configured encoding name.
    pub fn resolve_encoding(&self) -> Result<TextEncoding, StreamError> {
        match self.encoding.as_deref() {
            Some(name) => TextEncoding::for_label(name),
            None => Ok(TextEncoding::default()),
        }
    }
}
