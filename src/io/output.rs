//! Output target trait definition.

use std::fmt::Debug;
use std::io::Write;

/// Trait for destinations a stream can be opened on.
///
/// Implementors hand out raw byte sinks; line termination, encoding and
/// buffering are applied by the stream wrapping them.
pub trait OutputTarget: Send + Sync + Debug {
    /// Returns a unique identifier for this output target.
    ///
    /// This is used for error messages and logging.
    /// Convention: "-" for stdout, file path for files.
    fn id(&self) -> &str;

    /// Open the target for writing, truncating any existing content.
    fn open_overwrite(&self) -> std::io::Result<Box<dyn Write + Send>>;

    /// Open the target for appending to existing content.
    fn open_append(&self) -> std::io::Result<Box<dyn Write + Send>>;

    /// Open the target only if it does not exist yet.
    ///
    /// Fails with `ErrorKind::AlreadyExists` otherwise. Targets without a
    /// notion of existence (stdout, memory) behave like `open_overwrite`.
    fn open_new(&self) -> std::io::Result<Box<dyn Write + Send>> {
        self.open_overwrite()
    }
}
