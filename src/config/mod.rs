//! Configuration types for unixprint streams.
//!
//! This module provides:
//! - `StreamOptions`: Terminator, auto-flush, encoding and open policy
//! - `FileExistsPolicy`: Policy for handling existing output files
//! - `StreamConfig`: Serializable stream configuration (JSON/YAML)

mod options;
mod stream_config;

pub use options::{DEFAULT_AUTO_FLUSH, FileExistsPolicy, StreamOptions};
pub use stream_config::StreamConfig;
