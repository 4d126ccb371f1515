//! 선 차트 지오메트리.

use journal_core::DecimalExt;
use serde::{Deserialize, Serialize};

use super::{profit_color, AxisLabel, ChartArea, GridLine, Point, GRID_LINES};
use crate::padding::ChartSlot;

/// 데이터 포인트 마커.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
}

/// 선 차트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    /// 수평 그리드 (6개)
    pub grid: Vec<GridLine>,
    /// 0 기준선 y. 범위가 0을 걸칠 때만 존재
    pub zero_line: Option<f64>,
    /// 꺾은선 (점이 2개 이상일 때만)
    pub polyline: Vec<Point>,
    /// 하단으로 닫힌 영역 다각형 (점이 2개 이상일 때만)
    pub area: Vec<Point>,
    /// 선/영역 색상 (마지막 값 부호)
    pub line_color: String,
    /// 마커
    pub markers: Vec<Marker>,
    /// X축 레이블
    pub labels: Vec<AxisLabel>,
}

/// 선 차트 지오메트리를 계산합니다. 빈 시계열은 `None`.
pub fn line_chart(slots: &[ChartSlot], area: &ChartArea) -> Option<LineChart> {
    let last = slots.last()?;
    let n = slots.len();
    let inner_w = area.inner_width();
    let inner_h = area.inner_height();
    let top = area.padding.top;
    let left = area.padding.left;

    let values: Vec<f64> = slots.iter().map(|s| s.value.to_f64_lossy()).collect();
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let y_of = |v: f64| top + (max - v) / range * inner_h;
    let step = if n > 1 { inner_w / (n - 1) as f64 } else { 0.0 };
    let x_of = |i: usize| {
        if n == 1 {
            left + inner_w / 2.0
        } else {
            left + i as f64 * step
        }
    };

    let grid = (0..GRID_LINES)
        .map(|i| GridLine {
            y: top + inner_h / 5.0 * i as f64,
            value: max - range / 5.0 * i as f64,
        })
        .collect();

    let zero_line = (min < 0.0 && max > 0.0).then(|| y_of(0.0));

    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(i, v)| Point { x: x_of(i), y: y_of(*v) })
        .collect();

    let (polyline, area_polygon) = if n > 1 {
        let bottom = area.bottom();
        let mut polygon = Vec::with_capacity(n + 2);
        polygon.push(Point { x: left, y: bottom });
        polygon.extend(points.iter().copied());
        polygon.push(Point { x: x_of(n - 1), y: bottom });
        (points.clone(), polygon)
    } else {
        (Vec::new(), Vec::new())
    };

    let radius = if n == 1 { 8.0 } else { 4.0 };
    let markers = slots
        .iter()
        .zip(&points)
        .map(|(slot, p)| Marker {
            x: p.x,
            y: p.y,
            radius,
            color: profit_color(slot.value).to_string(),
        })
        .collect();

    let label_y = area.height - area.padding.bottom + 20.0;
    let label_step = n.div_ceil(8).max(1);
    let labels = slots
        .iter()
        .enumerate()
        .filter(|(i, _)| n == 1 || i % label_step == 0 || *i == n - 1)
        .map(|(i, slot)| AxisLabel {
            index: i,
            x: x_of(i),
            y: label_y,
            text: slot.label.clone(),
        })
        .collect();

    Some(LineChart {
        grid,
        zero_line,
        polyline,
        area: area_polygon,
        line_color: profit_color(last.value).to_string(),
        markers,
        labels,
    })
}
