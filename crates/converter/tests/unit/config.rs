//! # Configuration Tests
//!
//! Defaults, JSON deserialization, and validation.

use ihex2spi_core::common::error::Error;
use ihex2spi_core::config::*;
use rstest::rstest;

use crate::common::temp_file;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.input, "Blink.ino.hex");
    assert_eq!(config.mode, Mode::Sequenced);
    assert!(config.validate().is_ok());
}

#[test]
fn test_chunk_config_defaults() {
    let chunk = ChunkConfig::default();
    assert_eq!(chunk.chunk_len, 128);
    assert_eq!(chunk.addr_stride, 64);
}

#[test]
fn test_timing_config_defaults() {
    let timing = TimingConfig::default();
    assert_eq!(timing.start_cycle, 2_000_000);
    assert_eq!(timing.txn_interval, 2_000);
    assert_eq!(timing.interbyte_interval, 1_000);
    assert_eq!(timing.interwrite_interval, 80_000);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_json_overrides() {
    let json = r#"{
        "mode": "Timed",
        "timing": { "start_cycle": 0, "txn_interval": 5 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.mode, Mode::Timed);
    assert_eq!(config.timing.start_cycle, 0);
    assert_eq!(config.timing.txn_interval, 5);
    assert_eq!(config.timing.interbyte_interval, 1_000);
    assert_eq!(config.input, "Blink.ino.hex");
    assert_eq!(config.chunk, ChunkConfig::default());
}

#[test]
fn test_unknown_mode_rejected() {
    let err = Config::from_json(r#"{ "mode": "Burst" }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[rstest]
#[case::chunk_geometry(r#"{ "chunk": { "chunk_len": 64 } }"#)]
#[case::input_path(r#"{ "input": "fw.hex" }"#)]
#[case::unknown_timing_key(r#"{ "timing": { "burst": 1 } }"#)]
fn test_fixed_settings_not_read_from_json(#[case] json: &str) {
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_zero_chunk_len_rejected() {
    let config = Config {
        chunk: ChunkConfig {
            chunk_len: 0,
            ..ChunkConfig::default()
        },
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, Error::Config(msg) if msg.contains("chunk_len")));
}

#[test]
fn test_oversized_chunk_len_rejected() {
    let config = Config {
        chunk: ChunkConfig {
            chunk_len: 512,
            ..ChunkConfig::default()
        },
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_zero_stride_rejected() {
    let config = Config {
        chunk: ChunkConfig {
            addr_stride: 0,
            ..ChunkConfig::default()
        },
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, Error::Config(msg) if msg.contains("addr_stride")));
}

#[test]
fn test_empty_input_rejected() {
    let config = Config {
        input: String::new(),
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_from_file() {
    let file = temp_file(r#"{ "mode": "Timed" }"#);
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.mode, Mode::Timed);
}

#[test]
fn test_from_missing_file() {
    let err = Config::from_file("/nonexistent/ihex2spi.json").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
