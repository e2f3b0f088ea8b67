//! Character encoding for text written through a stream.
//!
//! Encoding names are resolved as WHATWG labels through `encoding_rs`, so
//! `utf-8`, `utf8`, `windows-1252`, `shift_jis` and the rest of the standard
//! set are accepted. Names are matched ASCII case-insensitively after
//! trimming.
//!
//! Two families are handled outside `encoding_rs`, because WHATWG folds them
//! into `windows-1252`: the ISO-8859-1 labels (`iso-8859-1`, `latin1`, ...)
//! and the US-ASCII labels (`us-ascii`, `ascii`, ...). These map each code
//! point below their limit to the byte of the same value.
//!
//! Characters an encoding cannot represent are written as `?`.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{EncoderResult, Encoding};

use crate::error::StreamError;
use crate::trace;

/// Written in place of a character the encoding cannot represent.
const REPLACEMENT: char = '?';

const ISO_8859_1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
];

const US_ASCII_LABELS: &[&str] = &[
    "us-ascii",
    "ascii",
    "ansi_x3.4-1968",
    "iso646-us",
    "cp367",
    "ibm367",
    "csascii",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Codec {
    Whatwg(&'static Encoding),
    /// Code points up to `max` are written as the byte of the same value.
    Direct { name: &'static str, max: u8 },
}

/// A resolved output encoding.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    codec: Codec,
}

impl TextEncoding {
    /// The UTF-8 encoding, used when no name is given.
    pub fn utf8() -> Self {
        TextEncoding {
            codec: Codec::Whatwg(encoding_rs::UTF_8),
        }
    }

    /// Resolve an encoding by name.
    ///
    /// An empty or blank name means UTF-8. `iso-8859-1` and its aliases are
    /// true ISO-8859-1, not `windows-1252`: `€` has no byte there and is
    /// written as `?`. Ask for `windows-1252` to get byte `0x80` for it.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::UnsupportedEncoding` if the name is not a known
    /// label, or if it names an encoding that can only be decoded. UTF-16
    /// labels and labels of the WHATWG "replacement" encoding (such as
    /// `iso-2022-kr`) fall in the second group.
    pub fn for_label(name: &str) -> Result<Self, StreamError> {
        let label = normalize_label(name);
        if let Some(codec) = direct_codec(label) {
            return Ok(TextEncoding { codec });
        }
        match Encoding::for_label(label.as_bytes()) {
            Some(inner) if inner.output_encoding() == inner => Ok(TextEncoding {
                codec: Codec::Whatwg(inner),
            }),
            _ => Err(StreamError::UnsupportedEncoding(name.to_string())),
        }
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self.codec {
            Codec::Whatwg(inner) => inner.name(),
            Codec::Direct { name, .. } => name,
        }
    }

    pub fn is_utf8(&self) -> bool {
        self.codec == Codec::Whatwg(encoding_rs::UTF_8)
    }

    /// Encode text for the sink.
    ///
    /// Characters the encoding cannot represent are written as `?`.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self.codec {
            _ if self.is_utf8() => Cow::Borrowed(text.as_bytes()),
            _ if text.is_ascii() && self.is_ascii_compatible() => Cow::Borrowed(text.as_bytes()),
            Codec::Direct { max, .. } => {
                let mut unmappable = false;
                let bytes = text
                    .chars()
                    .map(|c| match u8::try_from(c) {
                        Ok(b) if b <= max => b,
                        _ => {
                            unmappable = true;
                            REPLACEMENT as u8
                        }
                    })
                    .collect();
                if unmappable {
                    trace::unmappable_text(self.name(), text);
                }
                Cow::Owned(bytes)
            }
            Codec::Whatwg(inner) => Cow::Owned(encode_substituting(inner, self.name(), text)),
        }
    }

    /// Decode bytes read in this encoding.
    ///
    /// Malformed sequences become U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self.codec {
            Codec::Whatwg(inner) => inner.decode_without_bom_handling(bytes).0,
            Codec::Direct { max, .. } => bytes
                .iter()
                .map(|&b| if b <= max { char::from(b) } else { char::REPLACEMENT_CHARACTER })
                .collect::<String>()
                .into(),
        }
    }

    fn is_ascii_compatible(&self) -> bool {
        match self.codec {
            Codec::Whatwg(inner) => inner.is_ascii_compatible(),
            Codec::Direct { .. } => true,
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize_label(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "utf-8";
    }
    trimmed
}

fn direct_codec(label: &str) -> Option<Codec> {
    let matches = |labels: &[&str]| labels.iter().any(|l| l.eq_ignore_ascii_case(label));
    if matches(ISO_8859_1_LABELS) {
        Some(Codec::Direct {
            name: "ISO-8859-1",
            max: 0xFF,
        })
    } else if matches(US_ASCII_LABELS) {
        Some(Codec::Direct {
            name: "US-ASCII",
            max: 0x7F,
        })
    } else {
        None
    }
}

/// Encode with `encoding`, writing [`REPLACEMENT`] through the encoder for
/// each unmappable character so stateful encodings stay consistent.
fn encode_substituting(encoding: &'static Encoding, name: &str, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::new();
    let mut rest = text;
    let mut substitute = [0u8; 4];
    let mut unmappable = false;

    loop {
        reserve_for(&encoder, &mut out, rest.len());
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                unmappable = true;
                let marker: &str = REPLACEMENT.encode_utf8(&mut substitute);
                reserve_for(&encoder, &mut out, marker.len());
                let _ = encoder.encode_from_utf8_to_vec_without_replacement(marker, &mut out, false);
            }
        }
    }

    if unmappable {
        trace::unmappable_text(name, text);
    }
    out
}

fn reserve_for(encoder: &encoding_rs::Encoder, out: &mut Vec<u8>, len: usize) {
    let needed = encoder
        .max_buffer_length_from_utf8_without_replacement(len)
        .unwrap_or(len.saturating_mul(4));
    out.reserve(needed.max(16));
}
