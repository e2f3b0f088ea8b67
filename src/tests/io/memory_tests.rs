//! Tests for in-memory IO implementations.

use crate::{InMemorySink, InMemorySource, InputProvider, OutputTarget, UnixPrintStream};
use std::io::{Read, Write};

#[test]
fn in_memory_source_reads_data() {
    let src = InMemorySource::from_string("id", "hello\r\n");

    let mut reader = src.open().expect("open in-memory source");
    let mut buf = String::new();
    reader.read_to_string(&mut buf).unwrap();

    assert_eq!(buf, "hello\r\n");
    assert_eq!(src.id(), "id");
}

#[test]
fn in_memory_sink_overwrite_and_append() {
    let sink = InMemorySink::new("out");

    {
        let mut w = sink.open_overwrite().unwrap();
        w.write_all(b"abc").unwrap();
    }
    assert_eq!(sink.contents(), b"abc".to_vec());

    {
        let mut w = sink.open_append().unwrap();
        w.write_all(b"def").unwrap();
        w.flush().unwrap();
    }
    assert_eq!(sink.contents(), b"abcdef".to_vec());
    assert_eq!(sink.flush_count(), 1);

    let _ = sink.open_overwrite().unwrap();
    assert!(sink.contents().is_empty());
}

#[test]
fn in_memory_sink_clones_share_contents() {
    let sink = InMemorySink::new("shared");
    let mut stream = UnixPrintStream::new(sink.clone());
    stream.print_line("feature done");

    assert_eq!(sink.contents_string(), "feature done\n");
    sink.clear();
    assert_eq!(sink.contents_string(), "");
}
