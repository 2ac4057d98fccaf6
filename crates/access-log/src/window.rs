//! 피크 트래픽 윈도우 탐색
//!
//! 각 레코드의 타임스탬프를 윈도우 시작점 후보로 두고, 그 위치부터 앞으로
//! 스캔하며 `timestamp <= start + window_secs`인 레코드를 셉니다. 윈도우 밖의
//! 첫 레코드에서 스캔을 멈추므로, 입력이 시간순이 아니면 결과는 실제 시간
//! 밀도의 근사치입니다.
//!
//! 가장 큰 개수를 가진 첫 번째 후보가 선택됩니다 (동률이면 앞선 후보 유지).
//! 입력이 비었거나 `window_secs <= 0`이면 `(0, 0)`을 반환합니다.
//!
//! # 스캔 전략
//! - 입력이 타임스탬프 오름차순이면 결과가 동일한 두 포인터 스캔 (`O(n)`)
//! - 그 외에는 후보마다 앞으로 스캔하는 이차 스캔 (`O(n^2)`)

use serde::Serialize;

use logscope_core::types::{LogRecord, TimeWindow};

/// 피크 윈도우와 그 안의 레코드 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeakWindow {
    /// 윈도우 구간
    pub window: TimeWindow,
    /// 윈도우에 포함된 레코드 수
    pub count: usize,
}

/// 사용된 스캔 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// 정렬된 입력에 대한 두 포인터 스캔
    SortedTwoPointer,
    /// 후보별 전진 스캔
    Quadratic,
}

/// 입력 정렬 여부에 따라 스캔 전략을 골라 피크 윈도우를 찾습니다.
pub fn find_peak_window(records: &[LogRecord], window_secs: i64) -> PeakWindow {
    let strategy = strategy_for(records);
    tracing::debug!(
        records = records.len(),
        window_secs,
        strategy = ?strategy,
        "scanning for peak window"
    );
    match strategy {
        ScanStrategy::SortedTwoPointer => find_peak_window_sorted(records, window_secs),
        ScanStrategy::Quadratic => find_peak_window_quadratic(records, window_secs),
    }
}

/// 입력에 적용될 스캔 전략
pub fn strategy_for(records: &[LogRecord]) -> ScanStrategy {
    if records.is_sorted_by_key(|record| record.timestamp) {
        ScanStrategy::SortedTwoPointer
    } else {
        ScanStrategy::Quadratic
    }
}

/// 후보마다 앞으로 스캔하는 기준 구현입니다.
pub fn find_peak_window_quadratic(records: &[LogRecord], window_secs: i64) -> PeakWindow {
    if records.is_empty() || window_secs <= 0 {
        return PeakWindow::default();
    }

    let first = records[0].timestamp;
    let mut best = PeakWindow {
        window: TimeWindow::new(first, first),
        count: 0,
    };

    for (i, record) in records.iter().enumerate() {
        let start = record.timestamp;
        let end = start.saturating_add(window_secs);
        let count = records[i..]
            .iter()
            .take_while(|candidate| candidate.timestamp <= end)
            .count();

        if count > best.count {
            best = PeakWindow {
                window: TimeWindow::new(start, end),
                count,
            };
        }
    }

    best
}

/// 오름차순 정렬된 입력 전용 두 포인터 스캔
///
/// 정렬된 입력에서는 후보 `i`의 윈도우에 들어가는 레코드가 `i..hi` 연속 구간이고
/// `hi`가 감소하지 않으므로 이차 스캔과 같은 결과를 냅니다.
fn find_peak_window_sorted(records: &[LogRecord], window_secs: i64) -> PeakWindow {
    if records.is_empty() || window_secs <= 0 {
        return PeakWindow::default();
    }

    let first = records[0].timestamp;
    let mut best = PeakWindow {
        window: TimeWindow::new(first, first),
        count: 0,
    };
    let mut hi = 0;

    for (i, record) in records.iter().enumerate() {
        let start = record.timestamp;
        let end = start.saturating_add(window_secs);
        hi = hi.max(i);
        while hi < records.len() && records[hi].timestamp <= end {
            hi += 1;
        }

        let count = hi - i;
        if count > best.count {
            best = PeakWindow {
                window: TimeWindow::new(start, end),
                count,
            };
        }
    }

    best
}
