//! Tests for StreamConfig validation.

use crate::{FileExistsPolicy, StreamConfig, StreamError, Terminator};

#[test]
fn empty_config_yields_default_options() {
    let options = StreamConfig::new().to_options().unwrap();
    assert_eq!(options, crate::StreamOptions::default());
    assert_eq!(StreamConfig::new().output_target().id(), "-");
}

#[test]
fn config_fields_map_onto_options() {
    let config = StreamConfig {
        target: Some("stderr".into()),
        terminator: Some("lf".into()),
        auto_flush: Some(false),
        encoding: Some("latin1".into()),
        file_exists_policy: Some("append".into()),
    };
    let options = config.to_options().unwrap();
    assert_eq!(options.terminator, Terminator::Lf);
    assert!(!options.auto_flush);
    assert_eq!(options.encoding.as_deref(), Some("latin1"));
    assert_eq!(options.file_exists_policy, FileExistsPolicy::Append);
    assert_eq!(config.output_target().id(), "stderr");
}

#[test]
fn config_rejects_bad_values() {
    let bad_encoding = StreamConfig {
        encoding: Some("nope".into()),
        ..StreamConfig::default()
    };
    assert!(matches!(
        bad_encoding.to_options(),
        Err(StreamError::UnsupportedEncoding(_))
    ));

    let bad_policy = StreamConfig {
        file_exists_policy: Some("sometimes".into()),
        ..StreamConfig::default()
    };
    assert!(matches!(bad_policy.to_options(), Err(StreamError::Config(_))));

    let bad_terminator = StreamConfig {
        terminator: Some("crlf-ish".into()),
        ..StreamConfig::default()
    };
    assert!(matches!(
        bad_terminator.to_options(),
        Err(StreamError::InvalidTerminator(_))
    ));
}

#[test]
fn config_deserializes_from_yaml_and_json() {
    let yaml = r#"
target: out.txt
auto_flush: false
encoding: utf-8
"#;
    let cfg: StreamConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.target.as_deref(), Some("out.txt"));
    assert_eq!(cfg.auto_flush, Some(false));

    let json = r#"{"terminator": "\\n", "file_exists_policy": "error"}"#;
    let cfg: StreamConfig = serde_json::from_str(json).unwrap();
    let options = cfg.to_options().unwrap();
    assert_eq!(options.terminator, Terminator::Lf);
    assert_eq!(options.file_exists_policy, FileExistsPolicy::Error);
}

#[cfg(feature = "json")]
#[test]
fn from_json_str_reports_config_errors() {
    assert!(StreamConfig::from_json_str(r#"{"auto_flush": true}"#).is_ok());
    assert!(matches!(
        StreamConfig::from_json_str("{not json"),
        Err(StreamError::Config(_))
    ));
}

#[cfg(feature = "yaml")]
#[test]
fn from_yaml_str_parses() {
    let cfg = StreamConfig::from_yaml_str("target: '-'\n").unwrap();
    assert_eq!(cfg.output_target().id(), "-");
}
