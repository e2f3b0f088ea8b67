//! Sources and destinations for unixprint streams.
//!
//! This module provides:
//! - `OutputTarget`: Trait for destinations a stream can be opened on
//! - `InputProvider`: Trait for line sources relayed through a stream
//! - Standard implementations for files, stdin/stdout/stderr
//! - In-memory implementations for testing

mod input;
mod memory;
mod output;
mod std_io;

pub use input::InputProvider;
pub use memory::{InMemorySink, InMemorySource};
pub use output::OutputTarget;
pub(crate) use std_io::OpenMode;
pub use std_io::{FileInput, FileOutput, StderrOutput, StdinInput, StdoutOutput};

// Async I/O support
#[cfg(feature = "async")]
mod async_output;
#[cfg(feature = "async")]
mod async_std_io;

#[cfg(feature = "async")]
pub use async_output::AsyncOutputTarget;
#[cfg(feature = "async")]
pub use async_std_io::{AsyncFileOutput, AsyncStdoutOutput};
