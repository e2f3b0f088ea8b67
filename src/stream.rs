//! The LF-terminating print stream.
//!
//! `UnixPrintStream` wraps any byte sink and offers "print a value" and
//! "print a value, then end the line" operations. Values are formatted with
//! `Display` and encoded with the stream's encoding; the line terminator is
//! fixed at construction (LF by default) and never depends on the host
//! platform.
//!
//! Print operations do not return errors. The first write or flush failure
//! is recorded on the stream and stays there until the caller looks at it
//! with [`UnixPrintStream::check_error`] or takes it with
//! [`UnixPrintStream::take_error`].
//!
//! ```rust
//! use unixprint::UnixPrintStream;
//!
//! let mut out = Vec::new();
//! {
//!     let mut stream = UnixPrintStream::new(&mut out);
//!     stream.print_line("commit refs/heads/master");
//!     stream.print_line(&42);
//!     assert!(!stream.check_error());
//! }
//! assert_eq!(out, b"commit refs/heads/master\n42\n");
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use crate::config::{DEFAULT_AUTO_FLUSH, StreamOptions};
use crate::encoding::TextEncoding;
use crate::error::{DeferredWriteError, Stage, StreamError};
use crate::io::{FileOutput, OpenMode};
use crate::terminator::Terminator;
use crate::trace;

/// A stream that owns a buffered file.
pub type FileStream = UnixPrintStream<BufWriter<File>>;

/// A stream opened on an `OutputTarget`.
pub type TargetStream = UnixPrintStream<BufWriter<Box<dyn Write + Send>>>;

/// Identifier used for sinks supplied directly by the caller.
const WRAPPED_SINK_ID: &str = "<sink>";

pub struct UnixPrintStream<W: Write> {
    sink: W,
    target: String,
    terminator: Terminator,
    /// The terminator in the stream's encoding
    line_end: Vec<u8>,
    auto_flush: bool,
    encoding: TextEncoding,
    error: Option<DeferredWriteError>,
}

impl UnixPrintStream<BufWriter<File>> {
    /// Create or truncate the file at `path` and print to it.
    ///
    /// # Errors
    ///
    /// `StreamError::ResourceNotFound` if the file cannot be opened, for
    /// example because its parent directory does not exist.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        Self::create_with_options(path, &StreamOptions::default())
    }

    /// Like [`create`](Self::create), encoding text with the named encoding.
    ///
    /// The encoding is checked before the file is opened, so an unknown
    /// name leaves the file system untouched.
    pub fn create_with_encoding(path: impl AsRef<Path>, encoding: &str) -> Result<Self, StreamError> {
        Self::create_with_options(path, &StreamOptions::default().with_encoding(encoding))
    }

    /// Open the file at `path` according to `options`.
    pub fn create_with_options(
        path: impl AsRef<Path>,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        use crate::config::FileExistsPolicy;

        let encoding = options.resolve_encoding()?;
        let output = FileOutput::new(path.as_ref());
        let mode = match options.file_exists_policy {
            FileExistsPolicy::Overwrite => OpenMode::Truncate,
            FileExistsPolicy::Append => OpenMode::Append,
            FileExistsPolicy::Error => OpenMode::CreateNew,
        };
        let file = output.open_file(mode).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StreamError::ResourceExists {
                target: output.path().to_string_lossy().into_owned(),
            },
            _ => StreamError::open(output.path().to_string_lossy(), e),
        })?;

        Ok(Self::assemble(
            BufWriter::new(file),
            output.path().to_string_lossy().into_owned(),
            options.terminator.clone(),
            options.auto_flush,
            encoding,
        ))
    }
}

impl<W: Write> UnixPrintStream<W> {
    /// Wrap an already-open sink with the default auto-flush setting.
    ///
    /// Pass `&mut sink` to keep ownership of the sink with the caller.
    pub fn new(sink: W) -> Self {
        Self::with_auto_flush(sink, DEFAULT_AUTO_FLUSH)
    }

    /// Wrap a sink, flushing after every terminated line when `auto_flush`
    /// is set. Text is written as UTF-8.
    pub fn with_auto_flush(sink: W, auto_flush: bool) -> Self {
        Self::assemble(
            sink,
            WRAPPED_SINK_ID.to_string(),
            Terminator::Lf,
            auto_flush,
            TextEncoding::default(),
        )
    }

    /// Wrap a sink, encoding text with the named encoding.
    ///
    /// # Errors
    ///
    /// `StreamError::UnsupportedEncoding` if the name is unknown or names an
    /// encoding that cannot be written.
    pub fn with_auto_flush_and_encoding(
        sink: W,
        auto_flush: bool,
        encoding: &str,
    ) -> Result<Self, StreamError> {
        let encoding = TextEncoding::for_label(encoding)?;
        Ok(Self::assemble(
            sink,
            WRAPPED_SINK_ID.to_string(),
            Terminator::Lf,
            auto_flush,
            encoding,
        ))
    }

    /// Wrap a sink, naming it `id` in recorded errors.
    pub fn from_options(
        sink: W,
        id: impl Into<String>,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let encoding = options.resolve_encoding()?;
        Ok(Self::assemble(
            sink,
            id.into(),
            options.terminator.clone(),
            options.auto_flush,
            encoding,
        ))
    }

    fn assemble(
        sink: W,
        target: String,
        terminator: Terminator,
        auto_flush: bool,
        encoding: TextEncoding,
    ) -> Self {
        trace::stream_opened(&target, encoding.name(), auto_flush);
        let line_end = encoding.encode(terminator.as_str()).into_owned();
        Self {
            sink,
            target,
            terminator,
            line_end,
            auto_flush,
            encoding,
            error: None,
        }
    }

    /// The terminator written at the end of every line.
    pub fn terminator(&self) -> &Terminator {
        &self.terminator
    }

    /// Whether the sink is flushed after every terminated line.
    pub fn auto_flush(&self) -> bool {
        self.auto_flush
    }

    /// The encoding used for printed text.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Identifier of the destination, as used in recorded errors.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Shared access to the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutable access to the sink. Bytes written here bypass the stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Print the `Display` form of a value without ending the line.
    pub fn print<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        self.print_fmt(format_args!("{value}"));
    }

    /// Print a sequence of characters without ending the line.
    pub fn print_chars(&mut self, chars: &[char]) {
        let text: String = chars.iter().collect();
        self.write_text(Stage::Print, &text);
    }

    /// Print preformatted arguments, as produced by `format_args!`.
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(s) => self.write_text(Stage::Print, s),
            None => self.write_text(Stage::Print, &fmt::format(args)),
        }
    }

    /// Print a value followed by the terminator.
    pub fn print_line<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        self.print(value);
        self.terminate_line();
    }

    /// Print a sequence of characters followed by the terminator.
    pub fn print_line_chars(&mut self, chars: &[char]) {
        self.print_chars(chars);
        self.terminate_line();
    }

    /// Print preformatted arguments followed by the terminator.
    pub fn print_line_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.print_fmt(args);
        self.terminate_line();
    }

    /// End the current line.
    ///
    /// Writes exactly the terminator, then flushes the sink when auto-flush
    /// is enabled.
    pub fn terminate_line(&mut self) {
        if let Err(e) = self.sink.write_all(&self.line_end) {
            self.record(Stage::Terminate, e);
        }
        if self.auto_flush {
            self.flush_sink(true);
        }
    }

    /// Write raw bytes, bypassing encoding and line handling.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_raw(Stage::Print, bytes);
    }

    /// Flush the sink. A failure is recorded, not returned.
    pub fn flush(&mut self) {
        self.flush_sink(false);
    }

    /// Flush, then report whether any failure has been recorded.
    pub fn check_error(&mut self) -> bool {
        self.flush_sink(false);
        self.error.is_some()
    }

    /// The first recorded failure, if any.
    pub fn error(&self) -> Option<&DeferredWriteError> {
        self.error.as_ref()
    }

    /// Remove and return the recorded failure.
    pub fn take_error(&mut self) -> Option<DeferredWriteError> {
        self.error.take()
    }

    /// Forget the recorded failure so later ones can be recorded.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Copy every line of `reader` to the sink, replacing its ending with
    /// the stream's terminator.
    ///
    /// Lines may end in LF or CR-LF. A final line without an ending is
    /// copied and terminated as well. Line content is passed through as raw
    /// bytes, so input in any ASCII-compatible encoding keeps its bytes.
    /// Use [`relay_lines_from`](Self::relay_lines_from) to re-encode text.
    ///
    /// Returns the number of lines copied. Read errors are returned; sink
    /// errors are recorded as usual.
    pub fn relay_lines<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        self.relay_with(reader, |stream, line| stream.write_raw(Stage::Print, line))
    }

    /// Like [`relay_lines`](Self::relay_lines), but decodes each line from
    /// `input` and prints it in the stream's own encoding.
    pub fn relay_lines_from<R: BufRead>(
        &mut self,
        reader: R,
        input: TextEncoding,
    ) -> io::Result<usize> {
        self.relay_with(reader, |stream, line| {
            stream.write_text(Stage::Print, &input.decode(line))
        })
    }

    fn relay_with<R, F>(&mut self, mut reader: R, mut emit: F) -> io::Result<usize>
    where
        R: BufRead,
        F: FnMut(&mut Self, &[u8]),
    {
        let mut buf = Vec::new();
        let mut count = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(count);
            }
            emit(self, strip_line_ending(&buf));
            self.terminate_line();
            count += 1;
        }
    }

    /// Flush and hand back the sink.
    ///
    /// # Errors
    ///
    /// Returns the first recorded failure, including one from this final
    /// flush.
    pub fn close(mut self) -> io::Result<W> {
        if let Err(e) = self.sink.flush() {
            self.record(Stage::Close, e);
        }
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(self.sink),
        }
    }

    /// Split the stream into its sink and recorded failure without flushing.
    pub fn into_parts(self) -> (W, Option<DeferredWriteError>) {
        (self.sink, self.error)
    }

    fn write_text(&mut self, stage: Stage, text: &str) {
        let bytes = self.encoding.encode(text);
        self.write_raw(stage, &bytes);
    }

    fn write_raw(&mut self, stage: Stage, bytes: &[u8]) {
        if let Err(e) = self.sink.write_all(bytes) {
            self.record(stage, e);
        }
    }

    fn flush_sink(&mut self, auto: bool) {
        match self.sink.flush() {
            Ok(()) => trace::flushed(&self.target, auto),
            Err(e) => self.record(Stage::Flush, e),
        }
    }

    fn record(&mut self, stage: Stage, error: io::Error) {
        if self.error.is_none() {
            trace::error_recorded(&self.target, stage, &error);
            self.error = Some(DeferredWriteError::new(stage, &self.target, error));
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl<W: Write> fmt::Debug for UnixPrintStream<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnixPrintStream")
            .field("target", &self.target)
            .field("terminator", &self.terminator)
            .field("auto_flush", &self.auto_flush)
            .field("encoding", &self.encoding)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Raw byte access. Errors are returned directly, as `Write` requires, and
/// are not recorded on the stream.
impl<W: Write> Write for UnixPrintStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Text access for `write!`. Text is encoded with the stream's encoding; a
/// failure is recorded and reported as `fmt::Error`.
impl<W: Write> fmt::Write for UnixPrintStream<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = self.encoding.encode(s);
        match self.sink.write_all(&bytes) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.record(Stage::Print, e);
                Err(fmt::Error)
            }
        }
    }
}
