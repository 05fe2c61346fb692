//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading, and validation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;
use tomasim_core::common::ConfigError;
use tomasim_core::config::*;
use tomasim_core::isa::OpClass;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.record_trace);
    assert_eq!(config.general.debug_log, None);
    assert_eq!(config.core.result_buses, 8);
    assert_eq!(config.core.k0_units, 1);
    assert_eq!(config.core.k1_units, 2);
    assert_eq!(config.core.k2_units, 3);
    assert_eq!(config.core.fetch_width, 4);
    assert_eq!(config.core.latency, LatencyConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_rs_capacity_is_two_per_unit() {
    let config = CoreConfig::default();
    assert_eq!(config.total_units(), 6);
    assert_eq!(config.rs_capacity(), 12);
    assert_eq!(config.units(OpClass::K2), 3);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = Config::from_json(r#"{ "core": { "result_buses": 2, "latency": { "k1": 4 } } }"#)
        .unwrap();
    assert_eq!(config.core.result_buses, 2);
    assert_eq!(config.core.k0_units, 1);
    assert_eq!(config.core.latency.of(OpClass::K1), 4);
    assert_eq!(config.core.latency.of(OpClass::K0), 1);
}

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.core.rs_capacity(), CoreConfig::default().rs_capacity());
}

#[test]
fn test_malformed_json_rejected() {
    let err = Config::from_json(r#"{ "core": { "k0_units": "many" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[rstest]
#[case(r#"{ "core": { "result_buses": 0 } }"#, "core.result_buses")]
#[case(r#"{ "core": { "k0_units": 0 } }"#, "core.k0_units")]
#[case(r#"{ "core": { "k1_units": 0 } }"#, "core.k1_units")]
#[case(r#"{ "core": { "k2_units": 0 } }"#, "core.k2_units")]
#[case(r#"{ "core": { "fetch_width": 0 } }"#, "core.fetch_width")]
#[case(r#"{ "core": { "latency": { "k2": 0 } } }"#, "core.latency.k2")]
fn test_zero_parameter_named(#[case] json: &str, #[case] expected: &str) {
    let config = Config::from_json(json).unwrap();
    match config.validate() {
        Err(ConfigError::ZeroParameter { name }) => assert_eq!(name, expected),
        other => panic!("expected ZeroParameter, got {other:?}"),
    }
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "record_trace": true }}, "core": {{ "fetch_width": 8 }} }}"#)
        .unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert!(config.general.record_trace);
    assert_eq!(config.core.fetch_width, 8);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}
