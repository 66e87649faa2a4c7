//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations, and that library calls run under an
//! installed subscriber.

use sketchwright::core::logging::{init_logging, LogFormat};
use sketchwright::{build_from_json, decode, encode_document};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_init_logging_with_levels() {
    // Other tests in this binary may install the global subscriber first, so
    // the first call here can go either way; every later call must fail
    let results = [
        init_logging(Some("trace"), Some("compact")),
        init_logging(Some("debug"), Some("compact")),
        init_logging(Some("warn"), Some("compact")),
        init_logging(Some("off"), Some("compact")),
    ];
    assert!(results.iter().filter(|result| result.is_ok()).count() <= 1);
    for result in &results[1..] {
        let err = result.as_ref().unwrap_err();
        assert!(!err.to_string().contains("Invalid log format"));
    }
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_pipeline_under_subscriber() {
    let _ = init_logging(Some("trace"), Some("json"));

    let output =
        build_from_json(r#"{"elements":[{"type":"rectangle","label":"A"},{"type":"blob"}]}"#)
            .unwrap();
    assert_eq!(output.diagnostics.len(), 1);

    let markdown = encode_document(&output.document).unwrap();
    assert_eq!(decode(&markdown).unwrap(), output.document);
}
