//! 분석기 설정
//!
//! [`AnalyzerConfig`]는 core의 [`AnalysisConfig`](logscope_core::config::AnalysisConfig)를
//! 타입이 지정된 형태로 변환한 설정입니다. 문자열 필드는 이 단계에서 열거형으로
//! 해석되며, 알 수 없는 값은 [`AccessLogError::Config`]가 됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use logscope_core::config::LogscopeConfig;
//! use logscope_access_log::config::AnalyzerConfig;
//!
//! let core_config = LogscopeConfig::default();
//! let config = AnalyzerConfig::from_core(&core_config.analysis)?;
//! ```

use serde::Serialize;

use crate::error::AccessLogError;
use crate::parser::TimezoneMode;
use crate::ranking::RankOrder;

/// 분석기 설정
///
/// `top_n`과 `window_secs`는 0 이하도 허용되며, 각각 빈 순위표와
/// `(0, 0)` 윈도우라는 퇴화 결과를 만듭니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerConfig {
    /// 5xx 요청 순위표 크기
    pub top_n: i64,
    /// 피크 윈도우 크기 (초)
    pub window_secs: i64,
    /// 타임스탬프 해석 방식
    pub timezone: TimezoneMode,
    /// 순위표 출력 순서
    pub rank_order: RankOrder,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            window_secs: 3600,
            timezone: TimezoneMode::Local,
            rank_order: RankOrder::Rank,
        }
    }
}

impl AnalyzerConfig {
    /// core의 `AnalysisConfig`에서 분석기 설정을 생성합니다.
    pub fn from_core(
        core: &logscope_core::config::AnalysisConfig,
    ) -> Result<Self, AccessLogError> {
        let timezone = core
            .timezone
            .parse::<TimezoneMode>()
            .map_err(|reason| AccessLogError::Config {
                field: "timezone".to_owned(),
                reason,
            })?;
        let rank_order = core
            .rank_order
            .parse::<RankOrder>()
            .map_err(|reason| AccessLogError::Config {
                field: "rank_order".to_owned(),
                reason,
            })?;

        Ok(Self {
            top_n: core.top_n,
            window_secs: core.window_secs,
            timezone,
            rank_order,
        })
    }
}

/// 분석기 설정 빌더
#[derive(Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 순위표 크기를 설정합니다.
    pub fn top_n(mut self, n: i64) -> Self {
        self.config.top_n = n;
        self
    }

    /// 피크 윈도우 크기(초)를 설정합니다.
    pub fn window_secs(mut self, secs: i64) -> Self {
        self.config.window_secs = secs;
        self
    }

    /// 타임스탬프 해석 방식을 설정합니다.
    pub fn timezone(mut self, mode: TimezoneMode) -> Self {
        self.config.timezone = mode;
        self
    }

    /// 순위표 출력 순서를 설정합니다.
    pub fn rank_order(mut self, order: RankOrder) -> Self {
        self.config.rank_order = order;
        self
    }

    /// `AnalyzerConfig`를 생성합니다.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_core_defaults() {
        let core = logscope_core::config::AnalysisConfig::default();
        let config = AnalyzerConfig::from_core(&core).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn from_core_preserves_values() {
        let core = logscope_core::config::AnalysisConfig {
            top_n: 3,
            window_secs: 60,
            timezone: "offset".to_owned(),
            rank_order: "request".to_owned(),
        };
        let config = AnalyzerConfig::from_core(&core).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.window_secs, 60);
        assert_eq!(config.timezone, TimezoneMode::Offset);
        assert_eq!(config.rank_order, RankOrder::Request);
    }

    #[test]
    fn from_core_accepts_what_core_validation_accepts() {
        let mut core = logscope_core::config::LogscopeConfig::default();
        core.analysis.timezone = "Offset".to_owned();
        core.analysis.rank_order = "REQUEST".to_owned();
        core.validate().unwrap();

        let config = AnalyzerConfig::from_core(&core.analysis).unwrap();
        assert_eq!(config.timezone, TimezoneMode::Offset);
        assert_eq!(config.rank_order, RankOrder::Request);
    }

    #[test]
    fn from_core_rejects_unknown_timezone() {
        let core = logscope_core::config::AnalysisConfig {
            timezone: "mars".to_owned(),
            ..Default::default()
        };
        let err = AnalyzerConfig::from_core(&core).unwrap_err();
        assert!(matches!(err, AccessLogError::Config { ref field, .. } if field == "timezone"));
    }

    #[test]
    fn builder_sets_degenerate_values() {
        let config = AnalyzerConfigBuilder::new()
            .top_n(0)
            .window_secs(-1)
            .build();
        assert_eq!(config.top_n, 0);
        assert_eq!(config.window_secs, -1);
    }
}
