//! Async counterpart of `UnixPrintStream` over `tokio::io::AsyncWrite`.
//!
//! The terminator is fixed at construction, auto-flush flushes after every
//! terminated line, and write failures are recorded rather than returned,
//! as in the blocking stream.
//!
//! Unlike the blocking stream, dropping this one does not flush. Tokio's
//! `BufWriter` discards buffered bytes on drop, so call
//! [`AsyncUnixPrintStream::close`] before letting the stream go.

use std::fmt;
use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::config::{DEFAULT_AUTO_FLUSH, FileExistsPolicy, StreamOptions};
use crate::encoding::TextEncoding;
use crate::error::{DeferredWriteError, Stage, StreamError};
use crate::io::AsyncOutputTarget;
use crate::terminator::Terminator;
use crate::trace;

/// An async stream opened on an `AsyncOutputTarget`.
pub type AsyncTargetStream = AsyncUnixPrintStream<BufWriter<Box<dyn AsyncWrite + Unpin + Send>>>;

/// Must be finished with [`close`](Self::close); dropping it loses
/// anything still buffered in the sink.
pub struct AsyncUnixPrintStream<W: AsyncWrite + Unpin> {
    sink: W,
    target: String,
    terminator: Terminator,
    line_end: Vec<u8>,
    auto_flush: bool,
    encoding: TextEncoding,
    error: Option<DeferredWriteError>,
}

impl AsyncUnixPrintStream<BufWriter<Box<dyn AsyncWrite + Unpin + Send>>> {
    /// Open `target` according to `options` and buffer it.
    pub async fn open(
        target: &dyn AsyncOutputTarget,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let encoding = options.resolve_encoding()?;
        let opened = match options.file_exists_policy {
            FileExistsPolicy::Overwrite => target.open_overwrite().await,
            FileExistsPolicy::Append => target.open_append().await,
            FileExistsPolicy::Error => target.open_new().await,
        };
        let sink = opened.map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StreamError::ResourceExists {
                target: target.id().to_string(),
            },
            _ => StreamError::open(target.id(), e),
        })?;

        Ok(Self::assemble(
            BufWriter::new(sink),
            target.id().to_string(),
            options.terminator.clone(),
            options.auto_flush,
            encoding,
        ))
    }
}

impl<W: AsyncWrite + Unpin> AsyncUnixPrintStream<W> {
    /// Wrap a sink with the default auto-flush setting.
    pub fn new(sink: W) -> Self {
        Self::with_auto_flush(sink, DEFAULT_AUTO_FLUSH)
    }

    pub fn with_auto_flush(sink: W, auto_flush: bool) -> Self {
        Self::assemble(
            sink,
            "<sink>".to_string(),
            Terminator::Lf,
            auto_flush,
            TextEncoding::default(),
        )
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

    pub fn terminator(&self) -> &Terminator {
        &self.terminator
    }

    pub fn auto_flush(&self) -> bool {
        self.auto_flush
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub async fn print<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        let text = value.to_string();
        let bytes = self.encoding.encode(&text);
        if let Err(e) = self.sink.write_all(&bytes).await {
            self.record(Stage::Print, e);
        }
    }

    pub async fn print_line<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        self.print(value).await;
        self.terminate_line().await;
    }

    /// End the current line, flushing when auto-flush is enabled.
    pub async fn terminate_line(&mut self) {
        if let Err(e) = self.sink.write_all(&self.line_end).await {
            self.record(Stage::Terminate, e);
        }
        if self.auto_flush {
            self.flush_sink(true).await;
        }
    }

    pub async fn flush(&mut self) {
        self.flush_sink(false).await;
    }

    /// Flush, then report whether any failure has been recorded.
    pub async fn check_error(&mut self) -> bool {
        self.flush_sink(false).await;
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&DeferredWriteError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<DeferredWriteError> {
        self.error.take()
    }

    /// Flush, shut the sink down and hand it back.
    ///
    /// This is the only way buffered bytes are guaranteed to reach the
    /// destination; there is no flush on drop.
    ///
    /// # Errors
    ///
    /// Returns the first recorded failure, including one from shutdown.
    pub async fn close(mut self) -> io::Result<W> {
        if let Err(e) = self.sink.shutdown().await {
            self.record(Stage::Close, e);
        }
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(self.sink),
        }
    }

    async fn flush_sink(&mut self, auto: bool) {
        match self.sink.flush().await {
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

impl<W: AsyncWrite + Unpin> fmt::Debug for AsyncUnixPrintStream<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncUnixPrintStream")
            .field("target", &self.target)
            .field("terminator", &self.terminator)
            .field("auto_flush", &self.auto_flush)
            .field("encoding", &self.encoding)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
