//! 접근 로그 분석 에러 타입
//!
//! [`AccessLogError`]는 라인 소스를 열거나 읽을 때, 그리고 설정 문자열을
//! 해석할 때 발생하는 에러를 표현합니다. 형식에 맞지 않는 로그 라인은
//! 에러가 아니라 기본값 레코드로 처리되므로 여기에 포함되지 않습니다.
//!
//! `From<AccessLogError> for LogscopeError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logscope_core::error::{ConfigError, LogscopeError, SourceError};

/// 접근 로그 분석 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AccessLogError {
    /// 라인 소스를 열 수 없음
    #[error("source unavailable: {path}: {reason}")]
    SourceUnavailable {
        /// 소스 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 읽기 도중 발생한 I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AccessLogError> for LogscopeError {
    fn from(err: AccessLogError) -> Self {
        match err {
            AccessLogError::SourceUnavailable { path, reason } => {
                LogscopeError::Source(SourceError::Unavailable { path, reason })
            }
            AccessLogError::Config { field, reason } => {
                LogscopeError::Config(ConfigError::InvalidValue { field, reason })
            }
            AccessLogError::Io(e) => LogscopeError::Source(SourceError::ReadFailed(e.to_string())),
        }
    }
}
