//! 파서 trait -- 로그 형식 확장 포인트 정의

use crate::types::LogRecord;

/// 라인 단위 레코드 파서 trait
///
/// 새로운 접근 로그 형식을 지원하려면 이 trait을 구현합니다.
/// 파싱은 실패하지 않습니다: 형식에 맞지 않는 라인은 기본값 레코드
/// ([`LogRecord::malformed`])로 변환됩니다.
pub trait RecordParser: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 한 줄을 레코드로 파싱
    fn parse_line(&self, line: &str) -> LogRecord;
}
