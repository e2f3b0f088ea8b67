//! Tests for UnixPrintBuilder.

use std::fs;

use crate::{
    FileExistsPolicy, FileOutput, InMemorySink, StreamConfig, StreamError, Terminator,
    UnixPrintBuilder, open_from_config, resolve_output_token,
};

#[test]
fn open_target_buffers_until_flush_when_auto_flush_is_off() {
    let sink = InMemorySink::new("mem");
    let mut stream = UnixPrintBuilder::new()
        .auto_flush(false)
        .open_target(&sink)
        .unwrap();

    stream.print_line("blob");
    assert_eq!(sink.contents_string(), "");
    assert_eq!(stream.target(), "mem");

    stream.flush();
    assert_eq!(sink.contents_string(), "blob\n");
}

#[test]
fn open_target_with_auto_flush_is_visible_per_line() {
    let sink = InMemorySink::new("mem");
    let mut stream = UnixPrintBuilder::new().open_target(&sink).unwrap();

    stream.print_line("mark :1");
    assert_eq!(sink.contents_string(), "mark :1\n");
}

#[test]
fn open_target_respects_file_exists_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "old\n").unwrap();
    let target = FileOutput::new(path.clone());

    let err = UnixPrintBuilder::new()
        .file_exists_policy(FileExistsPolicy::Error)
        .open_target(&target)
        .unwrap_err();
    assert!(matches!(err, StreamError::ResourceExists { ref target } if target.ends_with("out.txt")));

    let mut stream = UnixPrintBuilder::new()
        .file_exists_policy(FileExistsPolicy::Append)
        .open_target(&target)
        .unwrap();
    stream.print_line("new");
    stream.close().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
}

#[test]
fn open_target_checks_encoding_before_opening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("untouched.txt");
    let target = FileOutput::new(path.clone());

    let err = UnixPrintBuilder::new()
        .encoding("no-such-charset")
        .open_target(&target)
        .unwrap_err();
    assert!(matches!(err, StreamError::UnsupportedEncoding(_)));
    assert!(!path.exists());
}

#[test]
fn open_path_and_wrap_apply_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crlf.txt");

    let builder = UnixPrintBuilder::new()
        .terminator(Terminator::custom("\r\n").unwrap())
        .auto_flush(false)
        .id("buffer");

    let mut stream = builder.open_path(&path).unwrap();
    stream.print_line(&1);
    stream.close().unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"1\r\n");

    let mut out = Vec::new();
    {
        let mut stream = builder.wrap(&mut out).unwrap();
        assert_eq!(stream.target(), "buffer");
        stream.print_line(&2);
    }
    assert_eq!(out, b"2\r\n");
}

#[test]
fn open_from_config_writes_to_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.txt");
    let config = StreamConfig::new().with_target(path.to_string_lossy());

    let mut stream = open_from_config(&config).unwrap();
    stream.print_line("done");
    stream.close().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"done\n");
}

#[test]
fn output_tokens_resolve_to_targets() {
    assert_eq!(resolve_output_token("-").id(), "-");
    assert_eq!(resolve_output_token("STDOUT").id(), "-");
    assert_eq!(resolve_output_token("stderr").id(), "stderr");
    assert_eq!(resolve_output_token("@stderr").id(), "stderr");
    assert_eq!(resolve_output_token("dir/out.txt").id(), "dir/out.txt");
}
