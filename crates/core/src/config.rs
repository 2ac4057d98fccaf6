//! 설정 관리 -- logscope.toml 파싱 및 런타임 설정
//!
//! [`LogscopeConfig`]는 로깅과 분석 파라미터를 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGSCOPE_ANALYSIS_TOP_N=20` 형식)
//! 3. 설정 파일 (`logscope.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logscope_core::error::LogscopeError> {
//! use logscope_core::config::LogscopeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogscopeConfig::load("logscope.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogscopeConfig::parse("[analysis]\ntop_n = 5")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogscopeError};

/// 허용되는 로그 레벨
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// 허용되는 로그 출력 형식
pub const VALID_LOG_FORMATS: &[&str] = &["json", "pretty"];

/// 허용되는 타임존 해석 방식
pub const VALID_TIMEZONES: &[&str] = &["local", "offset"];

/// 허용되는 순위표 출력 순서
pub const VALID_RANK_ORDERS: &[&str] = &["rank", "request"];

/// logscope 통합 설정
///
/// `logscope.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogscopeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 분석 파라미터
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl LogscopeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogscopeError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값을 사용하는 [`load`](Self::load) 변형입니다.
    ///
    /// 파싱 실패나 검증 실패는 그대로 에러로 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LogscopeError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(LogscopeError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogscopeError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogscopeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogscopeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogscopeError> {
        toml::from_str(toml_str).map_err(|e| {
            LogscopeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGSCOPE_{SECTION}_{FIELD}`
    /// 예: `LOGSCOPE_ANALYSIS_WINDOW_SECS=600`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGSCOPE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGSCOPE_GENERAL_LOG_FORMAT");

        // Analysis
        override_i64(&mut self.analysis.top_n, "LOGSCOPE_ANALYSIS_TOP_N");
        override_i64(
            &mut self.analysis.window_secs,
            "LOGSCOPE_ANALYSIS_WINDOW_SECS",
        );
        override_string(&mut self.analysis.timezone, "LOGSCOPE_ANALYSIS_TIMEZONE");
        override_string(&mut self.analysis.rank_order, "LOGSCOPE_ANALYSIS_RANK_ORDER");
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// `top_n`과 `window_secs`의 0 이하 값은 퇴화 입력으로 허용됩니다.
    pub fn validate(&self) -> Result<(), LogscopeError> {
        check_one_of(
            "general.log_level",
            &self.general.log_level,
            VALID_LOG_LEVELS,
        )?;
        check_one_of(
            "general.log_format",
            &self.general.log_format,
            VALID_LOG_FORMATS,
        )?;
        check_one_of(
            "analysis.timezone",
            &self.analysis.timezone,
            VALID_TIMEZONES,
        )?;
        check_one_of(
            "analysis.rank_order",
            &self.analysis.rank_order,
            VALID_RANK_ORDERS,
        )?;
        Ok(())
    }
}

/// 대소문자를 구분하지 않고 허용 목록과 비교합니다.
fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), LogscopeError> {
    if allowed.iter().any(|candidate| candidate.eq_ignore_ascii_case(value)) {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: format!("must be one of: {}", allowed.join(", ")),
    }
    .into())
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 분석 파라미터
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 5xx 요청 순위표 크기 (0 이하이면 빈 순위표)
    pub top_n: i64,
    /// 피크 윈도우 크기 (초, 0 이하이면 `(0, 0)`)
    pub window_secs: i64,
    /// 타임스탬프 해석 방식 (local, offset)
    pub timezone: String,
    /// 순위표 출력 순서 (rank, request)
    pub rank_order: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            window_secs: 3600,
            timezone: "local".to_owned(),
            rank_order: "rank".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_i64(target: &mut i64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<i64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse i64 from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = LogscopeConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.analysis.window_secs, 3600);
        assert_eq!(config.analysis.timezone, "local");
        assert_eq!(config.analysis.rank_order, "rank");
    }

    #[test]
    fn default_config_passes_validation() {
        LogscopeConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = LogscopeConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.analysis.window_secs, 3600);
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[analysis]
top_n = 3
timezone = "offset"
"#;
        let config = LogscopeConfig::parse(toml).unwrap();
        assert_eq!(config.analysis.top_n, 3);
        assert_eq!(config.analysis.timezone, "offset");
        // window_secs는 기본값 유지
        assert_eq!(config.analysis.window_secs, 3600);
        assert_eq!(config.general.log_format, "pretty");
    }

    #[test]
    fn negative_parameters_are_valid_degenerate_inputs() {
        let toml = r#"
[analysis]
top_n = -1
window_secs = 0
"#;
        let config = LogscopeConfig::parse(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.analysis.top_n, -1);
        assert_eq!(config.analysis.window_secs, 0);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = LogscopeConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            LogscopeError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = LogscopeConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = LogscopeConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_unknown_timezone_mode() {
        let mut config = LogscopeConfig::default();
        config.analysis.timezone = "utc".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analysis.timezone"));
    }

    #[test]
    fn validate_rejects_unknown_rank_order() {
        let mut config = LogscopeConfig::default();
        config.analysis.rank_order = "count".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ignores_case_of_enum_values() {
        let mut config = LogscopeConfig::default();
        config.general.log_level = "INFO".to_owned();
        config.general.log_format = "Json".to_owned();
        config.analysis.timezone = "Offset".to_owned();
        config.analysis.rank_order = "REQUEST".to_owned();
        config.validate().unwrap();
    }

    #[test]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_LOGSCOPE_STR", "overridden") };
        override_string(&mut val, "TEST_LOGSCOPE_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_LOGSCOPE_STR") };
    }

    #[test]
    fn env_override_i64_valid() {
        let mut val = 10;
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_LOGSCOPE_I64", "-5") };
        override_i64(&mut val, "TEST_LOGSCOPE_I64");
        assert_eq!(val, -5);
        unsafe { std::env::remove_var("TEST_LOGSCOPE_I64") };
    }

    #[test]
    fn env_override_i64_invalid_keeps_original() {
        let mut val = 10;
        // SAFETY: 고유한 키를 사용하므로 다른 테스트와 충돌하지 않습니다.
        unsafe { std::env::set_var("TEST_LOGSCOPE_I64_BAD", "ten") };
        override_i64(&mut val, "TEST_LOGSCOPE_I64_BAD");
        assert_eq!(val, 10); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_LOGSCOPE_I64_BAD") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_LOGSCOPE_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = LogscopeConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = LogscopeConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.analysis.window_secs, parsed.analysis.window_secs);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = LogscopeConfig::from_file("/nonexistent/path/logscope.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogscopeError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn load_or_default_falls_back_when_missing() {
        let config = LogscopeConfig::load_or_default("/nonexistent/path/logscope.toml")
            .await
            .unwrap();
        assert_eq!(config.analysis.timezone, "local");
    }
}
