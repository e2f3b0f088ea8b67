//! Stream configuration loaded from JSON or YAML documents.

use std::sync::Arc;

use serde::Deserialize;

use super::{FileExistsPolicy, StreamOptions};
use crate::builder::resolve_output_token;
use crate::error::StreamError;
use crate::io::OutputTarget;
use crate::terminator::Terminator;

/// Serializable description of a stream.
///
/// ```yaml
/// target: fast-import.txt
/// auto_flush: false
/// encoding: utf-8
/// file_exists_policy: overwrite
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamConfig {
    /// Output token: a file path, "-"/"stdout", "stderr" or "@path"
    #[serde(default)]
    pub target: Option<String>,
    /// Terminator: "lf" or an escaped sequence such as "\\n"
    #[serde(default)]
    pub terminator: Option<String>,
    #[serde(default)]
    pub auto_flush: Option<bool>,
    #[serde(default)]
    pub encoding: Option<String>,
    /// File exists policy: "overwrite", "append", "error"
    #[serde(default)]
    pub file_exists_policy: Option<String>,
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, StreamError> {
        serde_json::from_str(s).map_err(|e| StreamError::Config(e.to_string()))
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, StreamError> {
        serde_yaml::from_str(s).map_err(|e| StreamError::Config(e.to_string()))
    }

    /// Validate the configuration and turn it into stream options.
    ///
    /// The encoding name is checked here as well, so a bad configuration
    /// is rejected before anything is opened.
    pub fn to_options(&self) -> Result<StreamOptions, StreamError> {
        let mut options = StreamOptions::default();

        if let Some(raw) = self.terminator.as_deref() {
            options.terminator = raw.parse::<Terminator>()?;
        }
        if let Some(auto_flush) = self.auto_flush {
            options.auto_flush = auto_flush;
        }
        if let Some(name) = self.encoding.as_deref() {
            options = options.with_encoding(name);
            options.resolve_encoding()?;
        }
        if let Some(raw) = self.file_exists_policy.as_deref() {
            options.file_exists_policy = raw.parse::<FileExistsPolicy>()?;
        }

        Ok(options)
    }

    /// The configured output target, stdout when none is given.
    pub fn output_target(&self) -> Arc<dyn OutputTarget> {
        resolve_output_token(self.target.as_deref().unwrap_or("-"))
    }
}
