//! Structured tracing for stream lifecycle events.
//!
//! All events are conditionally compiled behind the `tracing` feature flag
//! and turn into no-op inline functions when it is disabled.

#[cfg(feature = "tracing")]
const TARGET: &str = "unixprint";

/// Traces a stream being attached to its sink.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn stream_opened(target: &str, encoding: &str, auto_flush: bool) {
    tracing::debug!(
        target: TARGET,
        target_id = %target,
        encoding = %encoding,
        auto_flush = auto_flush,
        "stream: opened"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn stream_opened(_target: &str, _encoding: &str, _auto_flush: bool) {}

/// Traces the first write failure recorded on a stream.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn error_recorded(target: &str, stage: crate::Stage, error: &std::io::Error) {
    tracing::warn!(
        target: TARGET,
        target_id = %target,
        stage = %stage,
        error = %error,
        "stream: write failed, error recorded"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn error_recorded(_target: &str, _stage: crate::Stage, _error: &std::io::Error) {}

/// Traces an explicit or automatic flush.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn flushed(target: &str, auto: bool) {
    tracing::trace!(target: TARGET, target_id = %target, auto = auto, "stream: flushed");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn flushed(_target: &str, _auto: bool) {}

/// Traces text that the output encoding could not represent.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn unmappable_text(encoding: &str, text: &str) {
    tracing::debug!(
        target: TARGET,
        encoding = %encoding,
        len = text.len(),
        "encoding: unmappable characters replaced with '?'"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn unmappable_text(_encoding: &str, _text: &str) {}
