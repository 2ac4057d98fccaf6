#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, LogscopeError, SourceError};

// 설정
pub use config::LogscopeConfig;

// 파서 trait
pub use pipeline::RecordParser;

// 도메인 타입
pub use types::{LogRecord, TimeWindow, UNPARSED_TIMESTAMP};
