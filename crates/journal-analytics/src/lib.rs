//! 매매일지 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기간별 손익 집계 (일/주/월/분기, 빈 기간 0 채움)
//! - 단일 데이터 포인트 패딩
//! - 차트 지오메트리 (선, 막대, 원)
//! - 대시보드 통계, 성과 계산기, 기간 비교
//!
//! 모든 계산은 순수 함수이며 에러를 반환하지 않습니다.
//!
//! # Re-exports
//!
//! - [`aggregator`]: 집계기 (aggregate, PeriodBucket 등)
//! - [`chart`]: 차트 지오메트리 (LineChart, BarChart, PieChart)

pub mod aggregator;
pub mod chart;
pub mod comparison;
pub mod filter;
pub mod padding;
pub mod performance;
pub mod statistics;

pub use aggregator::{
    aggregate, aggregate_today, today_in, windows, PeriodBucket, PeriodWindow,
    TimeSeriesAggregator,
};
pub use chart::{bar_chart, line_chart, pie_chart, BarChart, ChartArea, LineChart, PieChart};
pub use comparison::{compare_periods, PeriodComparison};
pub use filter::{window_filter, window_range, TimeFilter};
pub use padding::{
    pad_single_point, pad_single_point_with, slots_from_buckets, ChartSlot, DEFAULT_PAD_SLOTS,
};
pub use performance::PerformanceReport;
pub use statistics::{DashboardStats, MarketBreakdown};
