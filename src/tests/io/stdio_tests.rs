//! Tests for standard IO providers and targets.

use crate::{
    FileInput, FileOutput, InputProvider, OutputTarget, StderrOutput, StdinInput, StdoutOutput,
};
use std::fs;
use std::io::{ErrorKind, Read, Write};

#[test]
fn file_input_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, b"hello world").unwrap();

    let inp = FileInput::new(path.clone());
    let mut reader = inp.open().unwrap();
    let mut buf = String::new();
    reader.read_to_string(&mut buf).unwrap();

    assert_eq!(buf, "hello world");
    assert_eq!(inp.path(), path.as_path());
}

#[test]
fn file_output_overwrite_append_and_new() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let out = FileOutput::new(path.clone());
    assert_eq!(out.id(), path.to_string_lossy());

    {
        let mut w = out.open_new().unwrap();
        w.write_all(b"abc").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"abc".to_vec());

    {
        let mut w = out.open_append().unwrap();
        w.write_all(b"def").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"abcdef".to_vec());

    let err = out.open_new().err().expect("second open_new must fail");
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    {
        let mut w = out.open_overwrite().unwrap();
        w.write_all(b"x").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"x".to_vec());
}

#[test]
fn std_stream_ids() {
    assert_eq!(StdinInput::new().id(), "-");
    assert_eq!(StdoutOutput::new().id(), "-");
    assert_eq!(StderrOutput::new().id(), "stderr");
}
