//! CLI integration helpers for unixprint.
//!
//! Command-line tokens are turned into input providers and an output target.
//! Enable the `sarge` feature to parse them with `sarge` directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use unixprint::cli::{InputArgs, OutputArgs};
//! use unixprint::UnixPrintBuilder;
//!
//! let inputs = InputArgs::from_tokens(["in.txt"]);
//! let output = OutputArgs::new("fast-import.txt");
//!
//! let mut stream = UnixPrintBuilder::new().open_target(output.target().as_ref())?;
//! for provider in inputs.providers() {
//!     stream.relay_lines(std::io::BufReader::new(provider.open()?))?;
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::resolve_output_token;
use crate::io::{FileInput, InputProvider, OutputTarget, StdinInput};

#[cfg(feature = "sarge")]
mod sarge;

/// Input tokens. `-` is stdin, anything else a file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs(pub Vec<String>);

impl InputArgs {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputArgs(tokens.into_iter().map(Into::into).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if reading from stdin.
    pub fn is_stdin(&self) -> bool {
        self.0.iter().any(|s| s == "-")
    }

    /// One provider per token, stdin when there are none.
    pub fn providers(&self) -> Vec<Arc<dyn InputProvider>> {
        if self.0.is_empty() {
            return vec![Arc::new(StdinInput::new())];
        }
        self.0
            .iter()
            .map(|token| -> Arc<dyn InputProvider> {
                if token == "-" {
                    Arc::new(StdinInput::new())
                } else {
                    let path = token.strip_prefix('@').unwrap_or(token);
                    Arc::new(FileInput::new(PathBuf::from(path)))
                }
            })
            .collect()
    }
}

/// The output token. Defaults to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArgs(pub String);

impl OutputArgs {
    pub fn new(token: impl Into<String>) -> Self {
        OutputArgs(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if writing to stdout.
    pub fn is_stdout(&self) -> bool {
        self.0 == "-"
    }

    pub fn target(&self) -> Arc<dyn OutputTarget> {
        resolve_output_token(&self.0)
    }
}

impl Default for OutputArgs {
    fn default() -> Self {
        OutputArgs("-".into())
    }
}
