//! 원 차트 지오메트리 (수익/손실 거래 비율).

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use journal_core::DatedPnl;

use super::{LOSS_COLOR, PROFIT_COLOR};

/// 원 조각.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub color: String,
    /// 시작 각도 (라디안, -π/2 = 12시 방향)
    pub start_angle: f64,
    pub end_angle: f64,
    /// 조각 중앙선 위 0.7·반지름 위치의 레이블 좌표
    pub label_x: f64,
    pub label_y: f64,
}

/// 범례 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub x: f64,
    pub y: f64,
    pub color: String,
    /// `Winning: 3 (60.0%)`
    pub text: String,
    pub percentage: f64,
}

/// 원 차트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub slices: Vec<PieSlice>,
    pub legend: Vec<LegendEntry>,
}

/// 수익/손실 거래 수로 원 차트를 계산합니다. 손익 0 거래는 제외합니다.
///
/// 수익/손실 거래가 하나도 없으면 `None`.
pub fn pie_chart<I>(trades: I, width: f64, height: f64) -> Option<PieChart>
where
    I: IntoIterator,
    I::Item: DatedPnl,
{
    let (wins, losses) = trades.into_iter().fold((0usize, 0usize), |(w, l), t| {
        if t.is_win() {
            (w + 1, l)
        } else if t.is_loss() {
            (w, l + 1)
        } else {
            (w, l)
        }
    });

    let total = wins + losses;
    if total == 0 {
        return None;
    }

    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 3.0;

    let parts = [
        ("Winning", wins, PROFIT_COLOR),
        ("Losing", losses, LOSS_COLOR),
    ];

    let mut start = -FRAC_PI_2;
    let slices = parts
        .iter()
        .map(|(label, count, color)| {
            let sweep = *count as f64 / total as f64 * PI * 2.0;
            let mid = start + sweep / 2.0;
            let slice = PieSlice {
                label: label.to_string(),
                count: *count,
                color: color.to_string(),
                start_angle: start,
                end_angle: start + sweep,
                label_x: center_x + mid.cos() * radius * 0.7,
                label_y: center_y + mid.sin() * radius * 0.7,
            };
            start += sweep;
            slice
        })
        .collect();

    let legend_x = center_x + radius + 40.0;
    let legend = parts
        .iter()
        .enumerate()
        .map(|(i, (label, count, color))| {
            let percentage = *count as f64 / total as f64 * 100.0;
            LegendEntry {
                x: legend_x,
                y: center_y - 30.0 + 25.0 * i as f64,
                color: color.to_string(),
                text: format!("{}: {} ({:.1}%)", label, count, percentage),
                percentage,
            }
        })
        .collect();

    Some(PieChart {
        center_x,
        center_y,
        radius,
        slices,
        legend,
    })
}
