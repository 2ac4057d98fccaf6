//! 메트릭 이름 상수
//!
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않은 경우 카운터는 no-op 입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logscope_`
//! - 접미어: `_total` (counter)

/// 로더가 읽은 전체 라인 수 (counter)
pub const LINES_READ_TOTAL: &str = "logscope_lines_read_total";

/// 기본 토큰 추출에 실패한 라인 수 (counter)
pub const MALFORMED_LINES_TOTAL: &str = "logscope_malformed_lines_total";

/// 5xx 상태 코드로 필터링된 레코드 수 (counter)
pub const SERVER_ERROR_RECORDS_TOTAL: &str = "logscope_server_error_records_total";

/// 완료된 분석 실행 수 (counter)
pub const ANALYSIS_RUNS_TOTAL: &str = "logscope_analysis_runs_total";
