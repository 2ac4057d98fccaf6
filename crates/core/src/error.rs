//! 에러 타입 -- 도메인별 에러 정의

/// logscope 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogscopeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 로그 소스 에러
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 로그 소스 에러
///
/// 라인 소스를 열거나 읽을 수 없는 경우입니다. 한 번의 분석 실행에서
/// 종료 조건으로 취급되며 재시도하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// 소스를 열 수 없음
    #[error("source unavailable: {path}: {reason}")]
    Unavailable { path: String, reason: String },

    /// 읽기 도중 실패
    #[error("read failed: {0}")]
    ReadFailed(String),
}
