//! 도메인 타입 -- 분석 전 과정에서 공유되는 공통 타입
//!
//! 모든 타입은 분석 실행마다 입력 라인에서 새로 생성되며,
//! 생성 이후 변경되지 않습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 타임스탬프를 해석할 수 없을 때 사용되는 센티넬 값 (Unix epoch)
pub const UNPARSED_TIMESTAMP: i64 = 0;

/// 접근 로그 레코드
///
/// 로그 한 줄에서 추출한 타임스탬프, 요청 문자열, 상태 코드를 담습니다.
/// 형식에 맞지 않는 라인도 버려지지 않고 기본값 레코드로 생성됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Unix 초 단위 시각. 입력 순서를 그대로 유지하며 단조 증가를 가정하지 않습니다.
    pub timestamp: i64,
    /// 첫 번째 큰따옴표 쌍 사이의 원문 (보통 `METHOD path protocol`)
    pub request: String,
    /// 상태 코드 (범위 검증 없음)
    pub status: i32,
    /// 선행 토큰 다섯 개를 추출했는지 여부
    ///
    /// `false`인 레코드는 나머지 필드가 모두 기본값입니다.
    pub parsed: bool,
}

impl LogRecord {
    /// 파싱된 레코드를 생성합니다.
    pub fn new(timestamp: i64, request: impl Into<String>, status: i32) -> Self {
        Self {
            timestamp,
            request: request.into(),
            status,
            parsed: true,
        }
    }

    /// 형식에 맞지 않는 라인을 나타내는 기본값 레코드를 생성합니다.
    pub fn malformed() -> Self {
        Self::default()
    }

    /// 5xx 상태 코드 여부
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timestamp: {}, Request: {}, Status: {}",
            self.timestamp, self.request, self.status,
        )
    }
}

/// 시간 구간 `[start, end]` (Unix 초)
///
/// `end = start + window_secs` 관계를 가집니다. `(0, 0)`은 입력이 비었거나
/// 윈도우 크기가 0 이하일 때의 퇴화 결과입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// 구간 시작
    pub start: i64,
    /// 구간 끝
    pub end: i64,
}

impl TimeWindow {
    /// 새 시간 구간을 생성합니다.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// 퇴화 결과 `(0, 0)`
    pub fn empty() -> Self {
        Self::default()
    }

    /// 퇴화 결과인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// 구간 길이 (초)
    pub fn duration_secs(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
