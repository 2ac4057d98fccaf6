//! 5xx 에러 필터

use logscope_core::types::LogRecord;

/// 서버 에러(5xx) 레코드만 골라냅니다.
///
/// 입력 순서를 유지하는 부분 수열을 반환하며 입력은 변경하지 않습니다.
pub fn server_errors(records: &[LogRecord]) -> Vec<&LogRecord> {
    records
        .iter()
        .filter(|record| record.is_server_error())
        .collect()
}
