//! 접근 로그 타임스탬프 파서
//!
//! `day/MonthAbbrev/Year:Hour:Minute:Second` 형식(예: `01/Jul/1995:00:00:01`)을
//! Unix 초로 변환합니다. 해석할 수 없는 입력은 에러 대신
//! [`UNPARSED_TIMESTAMP`]를 반환합니다.
//!
//! # 타임존
//! 기본값 [`TimezoneMode::Local`]은 로그의 `-0400` 같은 오프셋을 무시하고
//! 실행 중인 프로세스의 로컬 타임존으로 해석합니다. 결과가 호스트 설정에 따라
//! 달라지므로, 로그 자체의 오프셋을 쓰려면 [`TimezoneMode::Offset`]을 사용합니다.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use logscope_core::types::UNPARSED_TIMESTAMP;

/// 날짜/시각 토큰 형식
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// 타임스탬프 해석 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneMode {
    /// 실행 호스트의 로컬 타임존
    #[default]
    Local,
    /// 로그 라인의 UTC 오프셋 토큰
    Offset,
}

impl TimezoneMode {
    /// 설정 파일에서 사용하는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Offset => "offset",
        }
    }
}

impl fmt::Display for TimezoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimezoneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "offset" => Ok(Self::Offset),
            other => Err(format!(
                "unknown timezone mode '{other}', expected 'local' or 'offset'"
            )),
        }
    }
}

/// 날짜 토큰을 Unix 초로 변환합니다.
///
/// `zone`은 `[`/`]`가 제거된 오프셋 토큰(예: `-0400`)이며
/// [`TimezoneMode::Offset`]에서만 사용됩니다. 오프셋이 잘못된 경우
/// 로컬 타임존으로 대체합니다.
pub fn parse_timestamp(date: &str, zone: &str, mode: TimezoneMode) -> i64 {
    let Ok(naive) = NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT) else {
        return UNPARSED_TIMESTAMP;
    };

    match mode {
        TimezoneMode::Local => local_seconds(&naive),
        TimezoneMode::Offset => {
            let with_zone = format!("{date} {zone}");
            match DateTime::parse_from_str(&with_zone, "%d/%b/%Y:%H:%M:%S %z") {
                Ok(dt) => dt.timestamp(),
                Err(e) => {
                    tracing::trace!(zone, error = %e, "invalid zone offset, using local time");
                    local_seconds(&naive)
                }
            }
        }
    }
}

/// 로컬 시각을 Unix 초로 변환합니다.
///
/// DST로 모호한 시각은 더 이른 쪽을 택하고, DST 공백에 빠진 시각은
/// 한 시간 뒤로 정규화합니다. 표현 범위를 넘는 시각은 [`UNPARSED_TIMESTAMP`]입니다.
fn local_seconds(naive: &NaiveDateTime) -> i64 {
    match Local.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt.timestamp(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        LocalResult::None => naive
            .checked_add_signed(TimeDelta::hours(1))
            .and_then(|shifted| Local.from_local_datetime(&shifted).earliest())
            .map_or(UNPARSED_TIMESTAMP, |dt| dt.timestamp()),
    }
}
