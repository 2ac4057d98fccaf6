//! Common Log Format 라인 파서
//!
//! # 라인 형식
//! ```text
//! <client-ip> <ident> <auth-user> [<date>:<time> <tz>] "<request>" <status> <bytes>
//! ```
//!
//! 바이트 수 등 상태 코드 이후의 필드는 무시합니다.
//!
//! # 실패 정책
//! 파싱은 실패하지 않습니다. 선행 토큰 다섯 개를 얻지 못하면
//! [`LogRecord::malformed`]를 반환하고, 따옴표 구간이나 상태 코드가 없으면
//! 각각 빈 문자열과 `0`으로 남깁니다.
//!
//! # 사용 예시
//! ```ignore
//! use logscope_access_log::parser::CommonLogParser;
//!
//! let parser = CommonLogParser::new();
//! let record = parser.parse(
//!     r#"127.0.0.1 - - [01/Jul/1995:00:00:01 -0400] "GET /index.html HTTP/1.0" 500 1024"#,
//! );
//! assert_eq!(record.status, 500);
//! ```

use logscope_core::pipeline::RecordParser;
use logscope_core::types::LogRecord;

use super::timestamp::{TimezoneMode, parse_timestamp};

/// Common Log Format 파서
///
/// core의 [`RecordParser`] trait을 구현하여 로더에서 교체 가능하게 사용됩니다.
#[derive(Debug, Clone, Default)]
pub struct CommonLogParser {
    /// 타임스탬프 해석 방식
    timezone: TimezoneMode,
}

impl CommonLogParser {
    /// 로컬 타임존 해석을 사용하는 파서를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 타임스탬프 해석 방식을 설정합니다.
    pub fn with_timezone(mut self, mode: TimezoneMode) -> Self {
        self.timezone = mode;
        self
    }

    /// 현재 타임스탬프 해석 방식
    pub fn timezone(&self) -> TimezoneMode {
        self.timezone
    }

    /// 한 줄을 레코드로 파싱합니다.
    pub fn parse(&self, line: &str) -> LogRecord {
        let mut rest = line;
        let mut tokens = [""; 5];
        for slot in &mut tokens {
            let Some((token, tail)) = next_token(rest) else {
                return LogRecord::malformed();
            };
            *slot = token;
            rest = tail;
        }

        // client-ip, ident, auth-user는 추출만 하고 보관하지 않음
        let [_client, _ident, _user, date, zone] = tokens;
        let date = date.strip_prefix('[').unwrap_or(date);
        let zone = zone.strip_suffix(']').unwrap_or(zone);

        let timestamp = parse_timestamp(date, zone, self.timezone);
        let (request, rest) = quoted_segment(rest);
        let status = leading_status(rest);

        LogRecord {
            timestamp,
            request: request.to_owned(),
            status,
            parsed: true,
        }
    }
}

impl RecordParser for CommonLogParser {
    fn format_name(&self) -> &str {
        "common"
    }

    fn parse_line(&self, line: &str) -> LogRecord {
        self.parse(line)
    }
}

/// 선행 공백을 건너뛰고 다음 공백 구분 토큰과 나머지를 반환합니다.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

/// 첫 번째 `"` 다음부터 다음 `"` 직전까지를 요청으로 읽습니다.
///
/// 닫는 따옴표가 없으면 줄 끝까지가 요청입니다.
fn quoted_segment(input: &str) -> (&str, &str) {
    let Some(open) = input.find('"') else {
        return ("", "");
    };
    let after = &input[open + 1..];
    match after.find('"') {
        Some(close) => (&after[..close], &after[close + 1..]),
        None => (after, ""),
    }
}

/// 다음 토큰의 선행 정수를 상태 코드로 읽습니다.
///
/// 부호 하나와 연속된 숫자만 사용하고 그 뒤의 문자는 무시합니다.
/// 숫자가 없으면 `0`, 범위를 넘으면 `i32` 경계로 포화합니다.
fn leading_status(input: &str) -> i32 {
    let token = input.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
