//! # Stimulus Reader Tests
//!
//! Parsing, comment handling, and time ordering of stimulus files.

use ihex2spi_core::common::error::Error;
use ihex2spi_core::stimulus::{parse_stimulus, read_stimulus};

use crate::common::temp_file;

#[test]
fn test_trailing_comments_and_blank_lines() {
    let text = "\n# header\n\n100 55 00 00 00 1 # set address\n200 64 00 80 00 1\n";
    let txns = parse_stimulus(text).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].line, 4);
    assert_eq!(txns[1].bytes, [0x64, 0x00, 0x80, 0x00]);
}

#[test]
fn test_equal_cycles_allowed() {
    let txns = parse_stimulus("5 00 00 00 00 0\n5 00 00 00 00 1\n").unwrap();
    assert_eq!(txns.len(), 2);
}

#[test]
fn test_backwards_cycle_rejected() {
    let err = parse_stimulus("500 00 00 00 00 1\n400 00 00 00 00 1\n").unwrap_err();
    assert!(matches!(
        err,
        Error::TimeTravel {
            line: 2,
            cycle: 400,
            previous: 500
        }
    ));
}

#[test]
fn test_repeat_marker() {
    let txns = parse_stimulus("10 00 00 00 00 1 REPEAT\n").unwrap();
    assert!(txns[0].repeat);
    assert!(txns[0].raise_cs);
}

#[test]
fn test_short_line_rejected() {
    let err = parse_stimulus("10 00 00 00 1\n10 00 00\n").unwrap_err();
    assert!(matches!(err, Error::Stimulus { line: 1, .. }));
}

#[test]
fn test_bad_byte_rejected() {
    let err = parse_stimulus("10 zz 00 00 00 1\n").unwrap_err();
    assert!(matches!(err, Error::Stimulus { line: 1, ref reason } if reason.contains("zz")));
}

#[test]
fn test_wide_byte_rejected() {
    let err = parse_stimulus("10 100 00 00 00 1\n").unwrap_err();
    assert!(matches!(err, Error::Stimulus { .. }));
}

#[test]
fn test_read_from_file() {
    let file = temp_file("2000000 30 00 00 00 0\n2002000 00 00 00 00 1\n");
    let txns = read_stimulus(file.path()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[1].cycle, 2_002_000);
}

#[test]
fn test_read_missing_file() {
    let err = read_stimulus("/nonexistent/stimulus.txt").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_signed_byte_token_rejected() {
    let err = parse_stimulus("100 00 00 00 00 1\n200 +f 00 00 00 1\n").unwrap_err();
    match err {
        Error::Stimulus { line, reason } => {
            assert_eq!(line, 2);
            assert_eq!(reason, "bad byte '+f'");
        }
        other => panic!("unexpected error: {other}"),
    }
}
