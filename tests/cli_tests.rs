//! CLI Tests
//!
//! Tests for flag normalization, parsing and result rendering.

use std::ffi::OsString;

use clap::Parser;
use mbtool::cli::{normalize_args, report, Args};
use mbtool::protocol::{Operation, Request, Response};
use mbtool::MbError;

// =============================================================================
// Helper Functions
// =============================================================================

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(normalize_args(args.iter().copied())).unwrap()
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[test]
fn test_normalize_single_dash_flags() {
    let normalized = normalize_args([
        "mbtool",
        "-host",
        "10.0.0.5",
        "-port=1502",
        "--operation",
        "readCoils",
        "-v",
    ]);
    let expected: Vec<OsString> = [
        "mbtool",
        "--host",
        "10.0.0.5",
        "--port=1502",
        "--operation",
        "readCoils",
        "-v",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    assert_eq!(normalized, expected);
}

#[test]
fn test_normalize_leaves_program_name_and_values() {
    let normalized = normalize_args(["-host", "-size", "--", "-address"]);
    let expected: Vec<OsString> = ["-host", "--size", "--", "-address"]
        .iter()
        .map(OsString::from)
        .collect();
    assert_eq!(normalized, expected);
}

#[test]
fn test_normalize_unknown_flags_untouched() {
    let normalized = normalize_args(["mbtool", "-vv", "-hostname", "-"]);
    let expected: Vec<OsString> = ["mbtool", "-vv", "-hostname", "-"]
        .iter()
        .map(OsString::from)
        .collect();
    assert_eq!(normalized, expected);
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_defaults() {
    let args = parse(&["mbtool"]);
    let config = args.config();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 502);
    assert_eq!(config.unit_id, 0);
    assert_eq!(config.timeout_ms, 10_000);
    assert_eq!(args.log_filter(), "warn");
    assert!(matches!(
        args.request(),
        Err(MbError::MissingArgument("-operation"))
    ));
}

#[test]
fn test_parse_go_style_invocation() {
    let args = parse(&[
        "mbtool",
        "-host",
        "plc.local",
        "-port",
        "1502",
        "-unit",
        "3",
        "-operation",
        "writeMultipleRegisters",
        "-address",
        "100",
        "1",
        "2",
    ]);

    let config = args.config();
    assert_eq!(config.host, "plc.local");
    assert_eq!(config.port, 1502);
    assert_eq!(config.unit_id, 3);
    assert_eq!(config.target(), "plc.local:1502");

    assert_eq!(
        args.request().unwrap(),
        Request::WriteMultipleRegisters {
            address: 100,
            quantity: 2,
            payload: vec![0x00, 0x01, 0x00, 0x02],
        }
    );
}

#[test]
fn test_parse_read_coils() {
    let args = parse(&[
        "mbtool",
        "-operation=readCoils",
        "-address=8",
        "-size=16",
        "-vv",
    ]);

    assert_eq!(args.log_filter(), "debug");
    assert_eq!(
        args.request().unwrap(),
        Request::ReadCoils {
            address: 8,
            quantity: 16
        }
    );
}

#[test]
fn test_parse_unknown_operation() {
    let args = parse(&["mbtool", "-operation", "readInputs", "-address", "1"]);
    assert!(matches!(args.request(), Err(MbError::UnknownOperation(_))));
}

#[test]
fn test_parse_empty_host_falls_back() {
    let args = parse(&["mbtool", "-host", ""]);
    assert_eq!(args.config().host, "127.0.0.1");
}

#[test]
fn test_parse_rejects_out_of_range_address() {
    let result = Args::try_parse_from(normalize_args(["mbtool", "-address", "70000"]));
    assert!(result.is_err());
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_report_success_and_error() {
    let ok = Ok(Response::write(Operation::WriteSingleCoil, vec![0xFF, 0x00]));
    assert_eq!(report(&ok), "response [255 0]");

    let err = Err(MbError::MissingArgument("-address"));
    assert_eq!(
        report(&err),
        "response []\nerr missing argument: -address"
    );
}
