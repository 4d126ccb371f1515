//! 기간 집계, 패딩, 차트 지오메트리 명령.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use journal_analytics::{
    bar_chart, compare_periods, line_chart, pad_single_point_with, pie_chart, slots_from_buckets,
    window_filter, BarChart, ChartArea, ChartSlot, LineChart, PeriodBucket, PeriodComparison,
    PieChart, TimeSeriesAggregator,
};
use journal_core::{Granularity, Trade};

/// 차트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// 시계열 구성 옵션.
#[derive(Debug, Clone, Copy)]
pub struct SeriesOptions {
    pub granularity: Granularity,
    /// 거래가 있는 기간만 남깁니다 (대시보드 손익 API와 같은 형태)
    pub sparse: bool,
    /// 단일 포인트 패딩 슬롯 수
    pub pad_slots: usize,
}

/// 차트 계산 결과.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartOutput {
    Line(LineChart),
    Bar(BarChart),
    Pie(PieChart),
}

/// 집계 버킷과 차트 슬롯.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub buckets: Vec<PeriodBucket>,
    pub slots: Vec<ChartSlot>,
}

/// 거래를 집계하고 차트 슬롯을 만듭니다.
pub fn build_series(trades: &[Trade], options: SeriesOptions, today: NaiveDate) -> Series {
    let buckets = TimeSeriesAggregator::new(options.granularity).aggregate_at(trades, today);

    let slots = if options.sparse {
        let filled: Vec<PeriodBucket> = buckets
            .iter()
            .filter(|b| b.trade_count > 0)
            .cloned()
            .collect();
        pad_single_point_with(&slots_from_buckets(&filled), options.pad_slots)
    } else {
        slots_from_buckets(&buckets)
    };

    info!(
        granularity = %options.granularity,
        buckets = buckets.len(),
        slots = slots.len(),
        "Series built"
    );
    Series { buckets, slots }
}

/// 차트 지오메트리를 계산합니다. 그릴 데이터가 없으면 `None`.
pub fn build_chart(
    kind: ChartKind,
    trades: &[Trade],
    options: SeriesOptions,
    today: NaiveDate,
    width: f64,
    height: f64,
) -> Option<ChartOutput> {
    match kind {
        ChartKind::Pie => {
            let in_window = window_filter(trades, options.granularity, today);
            pie_chart(in_window, width, height).map(ChartOutput::Pie)
        }
        ChartKind::Line => {
            let series = build_series(trades, options, today);
            line_chart(&series.slots, &ChartArea::new(width, height)).map(ChartOutput::Line)
        }
        ChartKind::Bar => {
            let series = build_series(trades, options, today);
            bar_chart(&series.slots, &ChartArea::for_bars(width, height)).map(ChartOutput::Bar)
        }
    }
}

/// 현재/직전 기간을 비교합니다.
pub fn build_comparison(
    trades: &[Trade],
    granularity: Granularity,
    today: NaiveDate,
) -> Option<PeriodComparison> {
    compare_periods(trades, granularity, today)
}
