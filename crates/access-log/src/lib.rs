#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: 타임스탬프 파서와 Common Log Format 라인 파서
//! - [`loader`]: 라인 소스 전체를 레코드 시퀀스로 변환
//! - [`filter`]: 5xx 레코드 필터
//! - [`ranking`]: 요청 빈도 상위 N 순위표
//! - [`window`]: 피크 트래픽 윈도우 탐색
//! - [`analyzer`]: 전체 분석 오케스트레이션
//! - [`config`]: 분석기 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입

pub mod analyzer;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod parser;
pub mod ranking;
pub mod window;

// --- 주요 타입 re-export ---

// 분석기
pub use analyzer::{AccessLogAnalyzer, AccessLogAnalyzerBuilder, AnalysisReport};

// 설정
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder};

// 에러
pub use error::AccessLogError;

// 파서
pub use parser::{CommonLogParser, TimezoneMode};

// 로더
pub use loader::LogLoader;

// 분석 단계
pub use filter::server_errors;
pub use ranking::{FrequencyTable, RankOrder, RankedRequest, top_requests};
pub use window::{PeakWindow, find_peak_window, find_peak_window_quadratic};
