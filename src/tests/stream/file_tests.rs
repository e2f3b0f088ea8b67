//! File-backed stream tests.

use std::fs;

use crate::{FileExistsPolicy, StreamError, StreamOptions, UnixPrintStream};

#[test]
fn fast_import_lines_land_with_lf_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.txt");

    let mut stream = UnixPrintStream::create(&path).unwrap();
    stream.print_line("commit refs/heads/master");
    stream.print_line(&42);
    stream.close().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes, b"commit refs/heads/master\n42\n");
    assert_eq!(bytes.len(), 28);
}

#[test]
fn create_accepts_a_string_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("by-name.txt");
    let name = path.to_string_lossy().into_owned();

    let mut stream = UnixPrintStream::create(name.as_str()).unwrap();
    stream.print_line("reset refs/heads/topic");
    drop(stream);

    assert_eq!(fs::read(&path).unwrap(), b"reset refs/heads/topic\n");
}

#[test]
fn buffered_output_appears_only_after_flush_when_auto_flush_is_off() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("buffered.txt");

    let options = StreamOptions::new().with_auto_flush(false);
    let mut stream = UnixPrintStream::create_with_options(&path, &options).unwrap();
    stream.print_line("progress 1");

    assert_eq!(fs::read(&path).unwrap(), b"");

    stream.close().unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"progress 1\n");
}

#[test]
fn auto_flush_makes_each_line_visible_to_other_readers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flushed.txt");

    let mut stream = UnixPrintStream::create(&path).unwrap();
    stream.print_line("checkpoint");
    assert_eq!(fs::read(&path).unwrap(), b"checkpoint\n");

    stream.print_line(&false);
    assert_eq!(fs::read(&path).unwrap(), b"checkpoint\nfalse\n");
}

#[test]
fn missing_parent_directory_fails_without_creating_anything() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("missing");
    let path = parent.join("out.txt");

    let err = UnixPrintStream::create(&path).unwrap_err();
    assert!(matches!(err, StreamError::ResourceNotFound { .. }), "{err:?}");
    assert!(!parent.exists());
    assert!(!path.exists());
}

#[test]
fn unknown_encoding_fails_before_the_file_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.txt");

    let err = UnixPrintStream::create_with_encoding(&path, "klingon-8").unwrap_err();
    match err {
        StreamError::UnsupportedEncoding(name) => assert_eq!(name, "klingon-8"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn named_encoding_is_applied_to_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");

    let mut stream = UnixPrintStream::create_with_encoding(&path, "ISO-8859-1").unwrap();
    stream.print_line("author Ren\u{e9}");
    stream.close().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"author Ren\xe9\n");
}

#[test]
fn create_truncates_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.txt");
    fs::write(&path, b"stale\r\ncontent\r\n").unwrap();

    let stream = UnixPrintStream::create(&path).unwrap();
    stream.close().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"");
}

#[test]
fn file_exists_policies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    fs::write(&path, b"first\n").unwrap();

    let append = StreamOptions::new().with_file_exists_policy(FileExistsPolicy::Append);
    let mut stream = UnixPrintStream::create_with_options(&path, &append).unwrap();
    stream.print_line("second");
    stream.close().unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"first\nsecond\n");

    let strict = StreamOptions::new().with_file_exists_policy(FileExistsPolicy::Error);
    let err = UnixPrintStream::create_with_options(&path, &strict).unwrap_err();
    assert!(matches!(err, StreamError::ResourceExists { .. }), "{err:?}");
    assert_eq!(fs::read(&path).unwrap(), b"first\nsecond\n");

    let fresh = dir.path().join("fresh.txt");
    let stream = UnixPrintStream::create_with_options(&fresh, &strict).unwrap();
    stream.close().unwrap();
    assert!(fresh.exists());
}
