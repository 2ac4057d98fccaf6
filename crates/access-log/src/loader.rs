//! 로그 로더 -- 라인 소스의 모든 라인을 레코드 시퀀스로 변환합니다.
//!
//! 라인 소스는 임의의 [`BufRead`]입니다. 파일 경로에서 시작하려면
//! [`LogLoader::open`]으로 소스를 연 뒤 [`LogLoader::load_reader`]에 넘깁니다.
//!
//! 잘못된 UTF-8 바이트는 대체 문자로 바꾸고, 줄 끝의 `\r`은 제거합니다.
//! 형식에 맞지 않는 라인도 버리지 않고 기본값 레코드로 남깁니다.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use metrics::counter;

use logscope_core::metrics::{LINES_READ_TOTAL, MALFORMED_LINES_TOTAL};
use logscope_core::pipeline::RecordParser;
use logscope_core::types::LogRecord;

use crate::error::AccessLogError;
use crate::parser::CommonLogParser;

/// 로그 로더
///
/// 등록된 [`RecordParser`]로 라인을 하나씩 파싱하여 입력 순서대로 모읍니다.
pub struct LogLoader {
    /// 라인 파서
    parser: Box<dyn RecordParser>,
}

impl LogLoader {
    /// 기본 Common Log Format 파서로 로더를 생성합니다.
    pub fn new() -> Self {
        Self::with_parser(Box::new(CommonLogParser::new()))
    }

    /// 지정한 파서로 로더를 생성합니다.
    pub fn with_parser(parser: Box<dyn RecordParser>) -> Self {
        Self { parser }
    }

    /// 사용 중인 파서 형식 이름
    pub fn format_name(&self) -> &str {
        self.parser.format_name()
    }

    /// 파일 라인 소스를 엽니다.
    pub fn open(path: impl AsRef<Path>) -> Result<BufReader<File>, AccessLogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AccessLogError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(BufReader::new(file))
    }

    /// 파일 경로에서 모든 레코드를 로드합니다.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Vec<LogRecord>, AccessLogError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), format = self.format_name(), "loading access log");
        let reader = Self::open(path)?;
        self.load_reader(reader)
    }

    /// 라인 소스에서 모든 레코드를 로드합니다.
    ///
    /// 읽기 도중 I/O 에러가 나면 부분 결과 없이 에러를 반환합니다.
    pub fn load_reader<R: BufRead>(&self, mut reader: R) -> Result<Vec<LogRecord>, AccessLogError> {
        let mut records = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            records.push(self.parser.parse_line(&line));
        }

        self.record_metrics(&records);
        Ok(records)
    }

    /// 메모리 상의 라인 목록에서 레코드를 로드합니다.
    pub fn load_lines<I, S>(&self, lines: I) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<LogRecord> = lines
            .into_iter()
            .map(|line| self.parser.parse_line(line.as_ref()))
            .collect();
        self.record_metrics(&records);
        records
    }

    fn record_metrics(&self, records: &[LogRecord]) {
        let malformed = records.iter().filter(|record| !record.parsed).count();
        counter!(LINES_READ_TOTAL).increment(records.len() as u64);
        counter!(MALFORMED_LINES_TOTAL).increment(malformed as u64);

        if malformed > 0 {
            tracing::warn!(
                lines = records.len(),
                malformed,
                "some lines did not match the log layout and were kept as default records"
            );
        } else {
            tracing::debug!(lines = records.len(), "loaded access log lines");
        }
    }
}

impl Default for LogLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// 줄 끝의 `\n`, `\r\n`을 제거합니다.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
