//! # unixprint
//!
//! A print stream that always ends lines with LF, whatever the host platform.
//!
//! ## Overview
//!
//! Some consumers of text output, `git fast-import` among them, reject
//! carriage returns in their input. unixprint provides:
//! - **Fixed terminator**: every line ends with `\n` (or another sequence
//!   fixed at construction), never the platform-native separator
//! - **Auto-flush**: optionally flush after every terminated line
//! - **Deferred errors**: print operations never fail; the first write
//!   failure is recorded and checked with `check_error`
//! - **Encodings**: text is encoded with any WHATWG encoding via `encoding_rs`
//! - **Targets**: files, stdout/stderr, in-memory sinks, or any `Write`
//! - **Sync and Async**: a tokio-based stream behind the `async` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unixprint::UnixPrintStream;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut out = UnixPrintStream::create("fast-import.txt")?;
//!     out.print_line("commit refs/heads/master");
//!     out.print_line(&42);
//!     if out.check_error() {
//!         return Err("writing fast-import stream failed".into());
//!     }
//!     out.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `json` - Load `StreamConfig` from JSON
//! - `yaml` - Load `StreamConfig` from YAML
//! - `async` - Async streams with Tokio
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - CLI argument parsing and the `unixprint` binary
//! - `tracing` - Debug/trace events for stream lifecycle

// Core modules
pub mod builder;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod io;
pub mod stream;
pub mod terminator;

mod trace;

// Async modules (feature-gated)
#[cfg(feature = "async")]
pub mod stream_async;

// Re-exports for convenience
pub use builder::{UnixPrintBuilder, resolve_output_token};
pub use config::{DEFAULT_AUTO_FLUSH, FileExistsPolicy, StreamConfig, StreamOptions};
pub use encoding::TextEncoding;
pub use error::{DeferredWriteError, Stage, StreamError};
pub use io::{
    FileInput, FileOutput, InMemorySink, InMemorySource, InputProvider, OutputTarget, StderrOutput,
    StdinInput, StdoutOutput,
};
pub use stream::{FileStream, TargetStream, UnixPrintStream};
pub use terminator::Terminator;

// Async re-exports
#[cfg(feature = "async")]
pub use io::{AsyncFileOutput, AsyncOutputTarget, AsyncStdoutOutput};
#[cfg(feature = "async")]
pub use stream_async::{AsyncTargetStream, AsyncUnixPrintStream};

/// Open a stream from a parsed configuration.
pub fn open_from_config(config: &StreamConfig) -> Result<TargetStream, StreamError> {
    let target = config.output_target();
    UnixPrintBuilder::from_config(config)?.open_target(target.as_ref())
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::StreamDiagnostic;
