//! Tests for the configuration system: validation, presets, environment
//! parsing and file persistence.

use super::*;
use crate::error::WordzipError;
use crate::string::TrailingWord;
use std::env;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_default_is_valid() {
    let config = CodingConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.trailing_word, TrailingWord::Drop);
    assert!(config.fixed_capacity.is_none());
}

#[test]
fn test_all_presets_valid() {
    assert!(CodingConfig::performance_preset().validate().is_ok());
    assert!(CodingConfig::memory_preset().validate().is_ok());
    assert!(CodingConfig::realtime_preset().validate().is_ok());
    assert!(CodingConfig::balanced_preset().validate().is_ok());
    assert_eq!(CodingConfig::balanced_preset(), CodingConfig::default());
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = CodingConfig::default();
    config.capacity_factor = 1;
    assert!(matches!(
        config.validate(),
        Err(WordzipError::Configuration { .. })
    ));

    let mut config = CodingConfig::default();
    config.min_capacity = 0;
    assert!(config.validate().is_err());

    let config = CodingConfig::default().with_fixed_capacity(0);
    assert!(config.validate().is_err());

    let config = CodingConfig::default().with_fixed_capacity(32768);
    assert!(config.validate().is_ok());
}

#[test]
fn test_capacity_for() {
    let config = CodingConfig::default();
    assert_eq!(config.capacity_for(0), 16);
    assert_eq!(config.capacity_for(3), 16);
    assert_eq!(config.capacity_for(100), 201);

    let fixed = CodingConfig::default().with_fixed_capacity(32768);
    assert_eq!(fixed.capacity_for(5), 32768);
    assert_eq!(fixed.capacity_for(1_000_000), 32768);

    // Derived capacity always exceeds the token count
    let lean = CodingConfig::memory_preset();
    for tokens in [0usize, 1, 2, 17, 4096] {
        assert!(lean.capacity_for(tokens) > tokens);
    }
}

#[test]
fn test_builder_methods() {
    let config = CodingConfig::default()
        .with_trailing_word(TrailingWord::Emit)
        .with_table_stats(true)
        .with_fixed_capacity(64);
    assert_eq!(config.trailing_word, TrailingWord::Emit);
    assert!(config.log_table_stats);
    assert_eq!(config.fixed_capacity, Some(64));
}

#[test]
fn test_from_env_with_prefix() {
    let prefix = "WORDZIP_TEST_ENV_";
    env::set_var(format!("{}CAPACITY_FACTOR", prefix), "3");
    env::set_var(format!("{}FIXED_CAPACITY", prefix), "4096");
    env::set_var(format!("{}TRAILING_WORD", prefix), "emit");
    env::set_var(format!("{}LOG_TABLE_STATS", prefix), "yes");

    let config = CodingConfig::from_env_with_prefix(prefix).unwrap();
    assert_eq!(config.capacity_factor, 3);
    assert_eq!(config.min_capacity, 16);
    assert_eq!(config.fixed_capacity, Some(4096));
    assert_eq!(config.trailing_word, TrailingWord::Emit);
    assert!(config.log_table_stats);

    env::remove_var(format!("{}CAPACITY_FACTOR", prefix));
    env::remove_var(format!("{}FIXED_CAPACITY", prefix));
    env::remove_var(format!("{}TRAILING_WORD", prefix));
    env::remove_var(format!("{}LOG_TABLE_STATS", prefix));
}

#[test]
fn test_from_env_rejects_invalid_values() {
    let prefix = "WORDZIP_TEST_BAD_ENV_";
    env::set_var(format!("{}CAPACITY_FACTOR", prefix), "1");
    assert!(CodingConfig::from_env_with_prefix(prefix).is_err());
    env::remove_var(format!("{}CAPACITY_FACTOR", prefix));
}

#[test]
fn test_from_env_unset_uses_defaults() {
    let config = CodingConfig::from_env_with_prefix("WORDZIP_TEST_UNSET_").unwrap();
    assert_eq!(config, CodingConfig::default());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("coding.json");

    let config = CodingConfig::performance_preset()
        .with_trailing_word(TrailingWord::Emit)
        .with_fixed_capacity(1024);
    config.save_to_file(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"trailing_word\": \"emit\""));

    let loaded = CodingConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "capacity_factor": 5 }"#).unwrap();

    let loaded = CodingConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.capacity_factor, 5);
    assert_eq!(loaded.min_capacity, CodingConfig::default().min_capacity);
}

#[test]
fn test_load_invalid_files() {
    let dir = tempdir().unwrap();

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "not json").unwrap();
    assert!(matches!(
        CodingConfig::load_from_file(&garbage),
        Err(WordzipError::Configuration { .. })
    ));

    let invalid = dir.path().join("invalid.json");
    fs::write(&invalid, r#"{ "capacity_factor": 0 }"#).unwrap();
    assert!(CodingConfig::load_from_file(&invalid).is_err());

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        CodingConfig::load_from_file(&missing),
        Err(WordzipError::Io(_))
    ));
}

#[test]
fn test_parse_env_helpers() {
    env::set_var("WORDZIP_TEST_HELPER_NUM", "42");
    env::set_var("WORDZIP_TEST_HELPER_BOOL", "ON");
    assert_eq!(parse_env_var("WORDZIP_TEST_HELPER_NUM", 0usize), 42);
    assert_eq!(parse_env_var("WORDZIP_TEST_HELPER_MISSING", 7usize), 7);
    assert!(parse_env_bool("WORDZIP_TEST_HELPER_BOOL", false));
    assert!(!parse_env_bool("WORDZIP_TEST_HELPER_MISSING", false));
    env::remove_var("WORDZIP_TEST_HELPER_NUM");
    env::remove_var("WORDZIP_TEST_HELPER_BOOL");
}
