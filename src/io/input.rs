//! Input provider trait definition.

use std::fmt::Debug;
use std::io::Read;

/// Trait for sources whose lines are relayed through a stream.
///
/// Used by `UnixPrintStream::relay_lines` callers such as the `unixprint`
/// binary to read text with arbitrary line endings.
pub trait InputProvider: Send + Sync + Debug {
    /// Returns a unique identifier for this input source.
    ///
    /// Convention: "-" for stdin, file path for files.
    fn id(&self) -> &str;

    /// Open and return a new readable stream positioned at the beginning.
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}
