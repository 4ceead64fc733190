//! Output tests: end-to-end runs from files to a statistics file.

use std::fs;

use cachesim_core::common::SimError;
use cachesim_core::sim::output::{render, write_report};
use cachesim_core::sim::{OutputFormat, TraceMode, run_files};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn full_run_writes_statistics_file() {
    let dir = tempdir().unwrap();
    let params = dir.path().join("parameters.txt");
    let trace = dir.path().join("accesses.txt");
    let out = dir.path().join("statistics.txt");
    fs::write(&params, "1\n2\n1\nwa\nwb\n").unwrap();
    fs::write(&trace, "r 0\nr 4\nw 0\nr 8\n").unwrap();
    fs::write(&out, "stale contents that must disappear\n").unwrap();

    let report = run_files(&params, &trace, TraceMode::Strict).unwrap();
    write_report(&out, &report, OutputFormat::Text, 6).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "rhits: 0\nwhits: 1\nrmisses: 3\nwmisses: 0\nhrate: .25\nwb: 1\nwt: 0\n"
    );
}

#[test]
fn configuration_failure_names_stage() {
    let dir = tempdir().unwrap();
    let params = dir.path().join("parameters.txt");
    fs::write(&params, "1\n2\n1\nwa\nsometimes\n").unwrap();

    let err = run_files(&params, &dir.path().join("accesses.txt"), TraceMode::Skip).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
    assert!(err.to_string().starts_with("configuration error:"));
}

#[test]
fn trace_failure_names_stage() {
    let dir = tempdir().unwrap();
    let params = dir.path().join("parameters.txt");
    fs::write(&params, "1\n2\n1\nwa\nwb\n").unwrap();

    let err = run_files(&params, &dir.path().join("missing.txt"), TraceMode::Skip).unwrap_err();
    assert!(matches!(err, SimError::Trace(_)));
    assert!(err.to_string().starts_with("trace error:"));
}

#[test]
fn output_failure_leaves_no_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("statistics.txt");
    let report = cachesim_core::stats::CacheStats::default().report(0);

    let err = write_report(&out, &report, OutputFormat::Text, 6).unwrap_err();
    assert!(matches!(err, SimError::Output { .. }));
    assert!(err.to_string().starts_with("output error:"));
    assert!(!out.exists());
}

#[test]
fn json_format_round_trips_through_serde() {
    let report = cachesim_core::stats::CacheStats {
        read_hits: 3,
        read_misses: 1,
        ..Default::default()
    }
    .report(4);

    let json = render(&report, OutputFormat::Json, 6).unwrap();
    assert!(json.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["hit_rate"], 0.75);
}

#[test]
fn format_names_parse() {
    assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert!("yaml".parse::<OutputFormat>().is_err());
}
