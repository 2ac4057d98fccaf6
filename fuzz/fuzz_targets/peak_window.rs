#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use logscope_access_log::{find_peak_window, find_peak_window_quadratic};
use logscope_core::types::LogRecord;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 레코드 타임스탬프 (최대 256개로 제한)
    timestamps: Vec<i64>,
    /// 윈도우 크기
    window_secs: i64,
    /// 정렬 여부
    sort: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut timestamps = input.timestamps;
    timestamps.truncate(256);
    if input.sort {
        timestamps.sort_unstable();
    }

    let records: Vec<LogRecord> = timestamps
        .iter()
        .map(|&ts| LogRecord::new(ts, "GET /", 200))
        .collect();

    // 스캔 전략과 무관하게 기준 구현과 같은 결과여야 한다
    let peak = find_peak_window(&records, input.window_secs);
    assert_eq!(peak, find_peak_window_quadratic(&records, input.window_secs));
    assert!(peak.count <= records.len());
});
