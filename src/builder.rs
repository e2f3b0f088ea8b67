//! Builder for creating UnixPrintStream instances.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{FileExistsPolicy, StreamConfig, StreamOptions};
use crate::error::StreamError;
use crate::io::{FileOutput, OutputTarget, StderrOutput, StdoutOutput};
use crate::stream::{FileStream, TargetStream, UnixPrintStream};
use crate::terminator::Terminator;

/// Collects stream options and opens a stream on a path, a target or an
/// already-open sink.
///
/// ```rust,no_run
/// use unixprint::UnixPrintBuilder;
///
/// let mut stream = UnixPrintBuilder::new()
///     .auto_flush(false)
///     .open_path("fast-import.txt")?;
/// stream.print_line("commit refs/heads/master");
/// stream.close()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixPrintBuilder {
    options: StreamOptions,
    id: Option<String>,
}

impl UnixPrintBuilder {
    /// A builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a parsed configuration.
    pub fn from_config(config: &StreamConfig) -> Result<Self, StreamError> {
        Ok(Self {
            options: config.to_options()?,
            id: None,
        })
    }

    /// Replace all options at once.
    pub fn with_options(mut self, options: StreamOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the line terminator.
    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.options.terminator = terminator;
        self
    }

    /// Flush after every terminated line.
    pub fn auto_flush(mut self, auto_flush: bool) -> Self {
        self.options.auto_flush = auto_flush;
        self
    }

    /// Encode text with the named encoding.
    pub fn encoding(mut self, name: impl Into<String>) -> Self {
        self.options.encoding = Some(name.into());
        self
    }

    /// Choose what opening an existing file does.
    pub fn file_exists_policy(mut self, policy: FileExistsPolicy) -> Self {
        self.options.file_exists_policy = policy;
        self
    }

    /// Name the sink in recorded errors (used by `wrap`).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The options collected so far.
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Create or open the file at `path`, owning it.
    pub fn open_path(&self, path: impl AsRef<Path>) -> Result<FileStream, StreamError> {
        UnixPrintStream::create_with_options(path, &self.options)
    }

    /// Open `target` according to the file exists policy and buffer it.
    pub fn open_target(&self, target: &dyn OutputTarget) -> Result<TargetStream, StreamError> {
        // Resolve first so a bad encoding never touches the target.
        self.options.resolve_encoding()?;

        let opened = match self.options.file_exists_policy {
            FileExistsPolicy::Overwrite => target.open_overwrite(),
            FileExistsPolicy::Append => target.open_append(),
            FileExistsPolicy::Error => target.open_new(),
        };
        let sink = opened.map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => StreamError::ResourceExists {
                target: target.id().to_string(),
            },
            _ => StreamError::open(target.id(), e),
        })?;

        UnixPrintStream::from_options(BufWriter::new(sink), target.id(), &self.options)
    }

    /// Wrap an already-open sink. Pass `&mut sink` to keep ownership.
    ///
    /// The file exists policy does not apply here.
    pub fn wrap<W: Write>(&self, sink: W) -> Result<UnixPrintStream<W>, StreamError> {
        let id = self.id.as_deref().unwrap_or("<sink>");
        UnixPrintStream::from_options(sink, id, &self.options)
    }
}

/// Turn an output token into a target.
///
/// `-`/`stdout` is stdout, `stderr` is stderr, `@path` forces a file path
/// and anything else is a file path.
pub fn resolve_output_token(token: &str) -> Arc<dyn OutputTarget> {
    if token == "-" || token.eq_ignore_ascii_case("stdout") {
        return Arc::new(StdoutOutput::new());
    }
    if token.eq_ignore_ascii_case("stderr") {
        return Arc::new(StderrOutput::new());
    }
    let path = token.strip_prefix('@').unwrap_or(token);
    Arc::new(FileOutput::new(PathBuf::from(path)))
}
