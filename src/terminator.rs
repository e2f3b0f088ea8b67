//! Line terminator selection.

use std::fmt;
use std::str::FromStr;

use crate::error::StreamError;

/// The byte sequence written at the end of every line.
///
/// Fixed when a stream is constructed and never changed afterwards. The
/// platform-native separator is never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Terminator {
    /// A single line feed (0x0A).
    #[default]
    Lf,
    /// Any other fixed, non-empty sequence of CR and LF characters.
    Custom(Box<str>),
}

impl Terminator {
    /// Create a custom terminator. A `"\n"` sequence collapses to `Lf`.
    ///
    /// # Errors
    ///
    /// `StreamError::InvalidTerminator` if `seq` is empty or contains
    /// anything other than `\r` and `\n`.
    pub fn custom(seq: impl Into<String>) -> Result<Self, StreamError> {
        let seq = seq.into();
        match seq.as_str() {
            "" => Err(StreamError::InvalidTerminator(
                "terminator must not be empty".into(),
            )),
            "\n" => Ok(Terminator::Lf),
            s if s.chars().any(|c| c != '\r' && c != '\n') => Err(
                StreamError::InvalidTerminator(format!("only CR and LF are allowed: {s:?}")),
            ),
            _ => Ok(Terminator::Custom(seq.into_boxed_str())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Terminator::Lf => "\n",
            Terminator::Custom(s) => s,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Lf => write!(f, "LF"),
            Terminator::Custom(s) => write!(f, "{:?}", s),
        }
    }
}

impl FromStr for Terminator {
    type Err = StreamError;

    /// Accepts `lf` (any case) or the escaped forms `\n`, `\r`, `\r\n`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("lf") {
            return Ok(Terminator::Lf);
        }
        let unescaped = s.replace("\\r", "\r").replace("\\n", "\n");
        Terminator::custom(unescaped).map_err(|_| StreamError::InvalidTerminator(s.to_string()))
    }
}
