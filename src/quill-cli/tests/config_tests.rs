//! Configuration resolution against real files.

use std::fs;

use clap::Parser;
use pretty_assertions::assert_eq;
use quill_cli::config::{ConfigError, resolve_with};
use quill_cli::{Cli, LogLevel};
use tempfile::TempDir;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["quill"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid arguments")
}

fn write_config(dir: &TempDir, text: &str) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, text).expect("write config");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("quill").join("config.toml");
    let config = resolve_with(&cli(&[]), None, Some(missing)).unwrap();
    assert_eq!(config.prompt, "quill> ");
    assert_eq!(config.line_width, 80);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert!(config.source.is_none());
}

#[test]
fn test_default_location_is_used_when_present() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "prompt = \"% \"\n");
    let config = resolve_with(&cli(&[]), None, Some(path.clone().into())).unwrap();
    assert_eq!(config.prompt, "% ");
    assert_eq!(config.source, Some(path.into()));
}

#[test]
fn test_layers_apply_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "prompt = \"file> \"\nline_width = 60\nlog_level = \"info\"\n",
    );

    let config = resolve_with(&cli(&["--config", path.as_str()]), None, None).unwrap();
    assert_eq!(config.prompt, "file> ");
    assert_eq!(config.line_width, 60);
    assert_eq!(config.log_level, LogLevel::Info);

    let config = resolve_with(&cli(&["--config", path.as_str()]), Some("trace"), None).unwrap();
    assert_eq!(config.log_level, LogLevel::Trace);

    let config = resolve_with(
        &cli(&["--config", path.as_str(), "--width", "30", "--prompt", "cli> ", "-L", "error"]),
        Some("trace"),
        None,
    )
    .unwrap();
    assert_eq!(config.prompt, "cli> ");
    assert_eq!(config.line_width, 30);
    assert_eq!(config.log_level, LogLevel::Error);
}

#[test]
fn test_explicit_file_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml").to_string_lossy().into_owned();
    let err = resolve_with(&cli(&["--config", missing.as_str()]), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_unknown_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "promt = \"typo> \"\n");
    let err = resolve_with(&cli(&["--config", path.as_str()]), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_prompt_must_fit_width() {
    let err = resolve_with(&cli(&["--width", "5"]), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "prompt", .. }));
}

#[test]
fn test_oversized_width_is_rejected() {
    let err = resolve_with(&cli(&["--width", "18446744073709551615"]), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "line_width", .. }));

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "line_width = 100000\n");
    let err = resolve_with(&cli(&["--config", path.as_str()]), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "line_width", .. }));
}
