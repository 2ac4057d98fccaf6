//! 로그 파싱 모듈 -- 타임스탬프 파서와 Common Log Format 라인 파서
//!
//! 라인 파서는 core의 [`RecordParser`](logscope_core::pipeline::RecordParser)
//! trait을 구현합니다.
//!
//! # 지원 형식
//! - Common Log Format ([`CommonLogParser`])

pub mod access;
pub mod timestamp;

pub use access::CommonLogParser;
pub use timestamp::{TIMESTAMP_FORMAT, TimezoneMode, parse_timestamp};
