//! # Statistics Tests
//!
//! Counter totals and the printed summary.

use ihex2spi_core::config::{Config, Mode};
use ihex2spi_core::stats::ConversionStats;
use ihex2spi_core::stimulus::convert;

use crate::common::{image_with, ramp};

#[test]
fn test_sequenced_counters() {
    let stimulus = convert(&image_with(&[(0, ramp(130))]), &Config::default());
    let stats = stimulus.stats;
    assert_eq!(stats.segments, 1);
    assert_eq!(stats.chunks, 2);
    assert_eq!(stats.payload_bytes, 130);
    assert_eq!(stats.padding_bytes, 2);
    assert_eq!(stats.final_cycle, None);
    assert_eq!(stats.total_lines(), stimulus.txns().count() as u64);
}

#[test]
fn test_timed_counters() {
    let config = Config {
        mode: Mode::Timed,
        ..Config::default()
    };
    let stimulus = convert(&image_with(&[(0, ramp(64))]), &config);
    assert_eq!(stimulus.stats.sync_lines, 1);
    assert!(stimulus.stats.final_cycle.is_some());
    assert_eq!(stimulus.stats.total_lines(), stimulus.txns().count() as u64);
}

#[test]
fn test_summary_lists_counters() {
    let stats = ConversionStats {
        segments: 2,
        chunks: 5,
        final_cycle: Some(42),
        ..ConversionStats::default()
    };
    let mut out = Vec::new();
    stats.write_summary(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("segments                 2"));
    assert!(text.contains("chunks                   5"));
    assert!(text.contains("final_cycle              42"));
}

#[test]
fn test_summary_omits_cycle_when_untimed() {
    let mut out = Vec::new();
    ConversionStats::default().write_summary(&mut out).unwrap();
    assert!(!String::from_utf8(out).unwrap().contains("final_cycle"));
}
