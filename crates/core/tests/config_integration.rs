//! logscope.toml 통합 설정 테스트
//!
//! - logscope.toml.example 파싱 테스트
//! - 부분 설정 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 잘못된 형식 에러 테스트

use logscope_core::config::LogscopeConfig;
use logscope_core::error::{ConfigError, LogscopeError};

// =============================================================================
// logscope.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../logscope.toml.example");
    let config = LogscopeConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "warn");
    assert_eq!(config.general.log_format, "pretty");
}

#[test]
fn example_config_matches_code_defaults() {
    let content = include_str!("../../../logscope.toml.example");
    let config = LogscopeConfig::parse(content).expect("should parse");
    let defaults = LogscopeConfig::default();

    assert_eq!(config.analysis.top_n, defaults.analysis.top_n);
    assert_eq!(config.analysis.window_secs, defaults.analysis.window_secs);
    assert_eq!(config.analysis.timezone, defaults.analysis.timezone);
    assert_eq!(config.analysis.rank_order, defaults.analysis.rank_order);
    config
        .validate()
        .expect("example config should pass validation");
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn partial_config_general_only() {
    let toml = r#"
[general]
log_level = "debug"
log_format = "json"
"#;
    let config = LogscopeConfig::parse(toml).expect("should parse");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.analysis.top_n, 10);
}

#[test]
fn unknown_section_is_ignored() {
    let toml = r#"
[analysis]
window_secs = 60

[storage]
url = "ignored"
"#;
    let config = LogscopeConfig::parse(toml).expect("unknown sections should be ignored");
    assert_eq!(config.analysis.window_secs, 60);
}

#[test]
fn wrong_type_for_numeric_field() {
    let toml = r#"
[analysis]
top_n = "ten"
"#;
    let err = LogscopeConfig::parse(toml).unwrap_err();
    assert!(matches!(
        err,
        LogscopeError::Config(ConfigError::ParseFailed { .. })
    ));
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

fn with_env<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    let original = std::env::var(key).ok();
    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe { std::env::set_var(key, value) };

    let result = f();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var(key, val),
            None => std::env::remove_var(key),
        }
    }
    result
}

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[analysis]
top_n = 3
"#;
    let top_n = with_env("LOGSCOPE_ANALYSIS_TOP_N", "25", || {
        let mut config = LogscopeConfig::parse(toml).expect("should parse");
        config.apply_env_overrides();
        config.analysis.top_n
    });
    assert_eq!(top_n, 25);
}

#[test]
#[serial_test::serial]
fn env_override_timezone_mode() {
    let timezone = with_env("LOGSCOPE_ANALYSIS_TIMEZONE", "offset", || {
        let mut config = LogscopeConfig::default();
        config.apply_env_overrides();
        config.analysis.timezone
    });
    assert_eq!(timezone, "offset");
}

#[test]
#[serial_test::serial]
fn env_override_mixed_case_timezone_is_valid() {
    let config = with_env("LOGSCOPE_ANALYSIS_TIMEZONE", "Offset", || {
        let mut config = LogscopeConfig::default();
        config.apply_env_overrides();
        config
    });
    assert_eq!(config.analysis.timezone, "Offset");
    config
        .validate()
        .expect("mixed-case timezone should pass validation");
}

#[test]
#[serial_test::serial]
fn env_override_invalid_value_fails_validation() {
    let result = with_env("LOGSCOPE_GENERAL_LOG_FORMAT", "xml", || {
        let mut config = LogscopeConfig::default();
        config.apply_env_overrides();
        config.validate()
    });
    assert!(result.is_err());
}

// =============================================================================
// 파일 로딩 테스트
// =============================================================================

#[tokio::test]
#[serial_test::serial]
async fn load_example_config_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../logscope.toml.example");
    let config = LogscopeConfig::load(&path)
        .await
        .expect("example config should load");
    assert_eq!(config.analysis.window_secs, 3600);
}

#[tokio::test]
async fn from_file_nonexistent_returns_file_not_found() {
    let err = LogscopeConfig::from_file("/nonexistent/logscope.toml")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LogscopeError::Config(ConfigError::FileNotFound { .. })
    ));
}
