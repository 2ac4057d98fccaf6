//! 분석 오케스트레이션 -- 로드/필터/순위/피크 윈도우의 전체 흐름을 관리합니다.
//!
//! # 내부 흐름
//! ```text
//! LogLoader -> [LogRecord] -+-> server_errors -> top_requests ----+-> AnalysisReport
//!                           +-> find_peak_window -----------------+
//! ```
//!
//! 두 분석은 서로 독립적이며 로드된 레코드를 변경하지 않습니다.
//! 같은 입력과 설정이면 결과도 항상 같습니다.

use std::io::BufRead;
use std::path::Path;

use metrics::counter;
use serde::Serialize;

use logscope_core::metrics::{ANALYSIS_RUNS_TOTAL, SERVER_ERROR_RECORDS_TOTAL};
use logscope_core::types::LogRecord;

use crate::config::AnalyzerConfig;
use crate::error::AccessLogError;
use crate::filter::server_errors;
use crate::loader::LogLoader;
use crate::parser::CommonLogParser;
use crate::ranking::{FrequencyTable, top_requests};
use crate::window::{PeakWindow, find_peak_window};

/// 한 번의 분석 실행 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// 전체 레코드 수
    pub total_records: usize,
    /// 선행 토큰 추출에 실패한 레코드 수
    pub malformed_records: usize,
    /// 5xx 레코드 수
    pub server_error_records: usize,
    /// 5xx 요청 상위 N개
    pub top_requests: FrequencyTable,
    /// 피크 트래픽 윈도우
    pub peak_window: PeakWindow,
}

/// 접근 로그 분석기
///
/// # 사용 예시
/// ```ignore
/// use logscope_access_log::AccessLogAnalyzerBuilder;
///
/// let analyzer = AccessLogAnalyzerBuilder::new().config(config).build();
/// let (records, report) = analyzer.analyze_path("access_log_Jul95")?;
/// ```
pub struct AccessLogAnalyzer {
    /// 분석 설정
    config: AnalyzerConfig,
    /// 라인 로더
    loader: LogLoader,
}

impl AccessLogAnalyzer {
    /// 분석 설정
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 로드된 레코드를 분석합니다.
    pub fn analyze(&self, records: &[LogRecord]) -> AnalysisReport {
        let span = tracing::info_span!(
            "analyze",
            records = records.len(),
            top_n = self.config.top_n,
            window_secs = self.config.window_secs,
        );
        let _enter = span.enter();

        let errors = server_errors(records);
        counter!(SERVER_ERROR_RECORDS_TOTAL).increment(errors.len() as u64);

        let top = top_requests(errors.iter().copied(), self.config.top_n);
        let peak = find_peak_window(records, self.config.window_secs);

        let report = AnalysisReport {
            total_records: records.len(),
            malformed_records: records.iter().filter(|record| !record.parsed).count(),
            server_error_records: errors.len(),
            top_requests: top,
            peak_window: peak,
        };

        counter!(ANALYSIS_RUNS_TOTAL).increment(1);
        tracing::info!(
            server_errors = report.server_error_records,
            ranked = report.top_requests.len(),
            peak_start = report.peak_window.window.start,
            peak_count = report.peak_window.count,
            "analysis complete"
        );

        report
    }

    /// 라인 소스를 로드한 뒤 분석합니다.
    pub fn analyze_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(Vec<LogRecord>, AnalysisReport), AccessLogError> {
        let records = self.loader.load_reader(reader)?;
        let report = self.analyze(&records);
        Ok((records, report))
    }

    /// 파일을 로드한 뒤 분석합니다.
    pub fn analyze_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Vec<LogRecord>, AnalysisReport), AccessLogError> {
        let records = self.loader.load_path(path)?;
        let report = self.analyze(&records);
        Ok((records, report))
    }
}

/// 분석기 빌더
pub struct AccessLogAnalyzerBuilder {
    config: AnalyzerConfig,
    loader: Option<LogLoader>,
}

impl AccessLogAnalyzerBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            loader: None,
        }
    }

    /// 분석 설정을 지정합니다.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// 로더를 지정합니다.
    ///
    /// 지정하지 않으면 설정의 타임존 해석 방식을 쓰는 Common Log Format 로더를 사용합니다.
    pub fn loader(mut self, loader: LogLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// 분석기를 생성합니다.
    pub fn build(self) -> AccessLogAnalyzer {
        let loader = self.loader.unwrap_or_else(|| {
            LogLoader::with_parser(Box::new(
                CommonLogParser::new().with_timezone(self.config.timezone),
            ))
        });
        AccessLogAnalyzer {
            config: self.config,
            loader,
        }
    }
}

impl Default for AccessLogAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
