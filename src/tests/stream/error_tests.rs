//! Deferred write error tests.

use std::io::{self, Write};

use crate::{Stage, UnixPrintStream};

/// Accepts `budget` bytes, then fails every write. Flushes fail when
/// `fail_flush` is set.
#[derive(Debug, Default)]
struct FlakySink {
    written: Vec<u8>,
    budget: usize,
    fail_flush: bool,
}

impl FlakySink {
    fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    fn failing_flush() -> Self {
        Self {
            budget: usize::MAX,
            fail_flush: true,
            ..Self::default()
        }
    }
}

impl Write for FlakySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.fail_flush {
            return Err(io::Error::other("flush refused"));
        }
        Ok(())
    }
}

#[test]
fn write_failure_is_recorded_not_raised() {
    let mut stream = UnixPrintStream::with_auto_flush(FlakySink::with_budget(4), false);

    stream.print_line("data 5");
    stream.print_line("never written");

    assert!(stream.check_error());
    let err = stream.error().expect("error recorded");
    assert_eq!(err.stage, Stage::Print);
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(stream.get_ref().written, b"data");
}

#[test]
fn terminator_failure_is_reported_with_its_stage() {
    let mut stream = UnixPrintStream::with_auto_flush(FlakySink::with_budget(3), false);
    stream.print_line("abc");

    let err = stream.take_error().expect("error recorded");
    assert_eq!(err.stage, Stage::Terminate);
    assert!(err.to_string().starts_with("[Terminate] <sink>:"));
    assert!(!stream.check_error());
}

#[test]
fn only_the_first_failure_is_kept() {
    let mut stream = UnixPrintStream::new(FlakySink {
        budget: 0,
        fail_flush: true,
        ..FlakySink::default()
    });
    stream.print_line(&1);
    stream.flush();

    assert_eq!(stream.error().map(|e| e.stage), Some(Stage::Print));
}

#[test]
fn auto_flush_failure_is_recorded_as_flush_stage() {
    let mut stream = UnixPrintStream::new(FlakySink::failing_flush());
    stream.print_line("line");

    assert_eq!(stream.error().map(|e| e.stage), Some(Stage::Flush));
    assert_eq!(stream.get_ref().written, b"line\n");
}

#[test]
fn clear_error_resets_sticky_state() {
    let mut stream = UnixPrintStream::with_auto_flush(FlakySink::with_budget(0), false);
    stream.terminate_line();
    assert!(stream.check_error());

    stream.clear_error();
    assert!(stream.error().is_none());
}

#[test]
fn close_surfaces_the_recorded_failure() {
    let mut stream = UnixPrintStream::with_auto_flush(FlakySink::with_budget(2), false);
    stream.print_line("abc");

    let err = stream.close().expect_err("close must report the failure");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn close_reports_final_flush_failure() {
    let mut stream = UnixPrintStream::with_auto_flush(FlakySink::failing_flush(), false);
    stream.print_line("abc");
    assert!(stream.error().is_none());

    let err = stream.close().expect_err("flush on close fails");
    assert_eq!(err.kind(), io::ErrorKind::Other);
}

#[test]
fn into_parts_returns_sink_and_error_without_flushing() {
    let mut stream = UnixPrintStream::with_auto_flush(FlakySink::failing_flush(), false);
    stream.print("x");

    let (sink, error) = stream.into_parts();
    assert_eq!(sink.written, b"x");
    assert!(error.is_none());
}
