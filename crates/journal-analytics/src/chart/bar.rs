//! 막대 차트 지오메트리.
//!
//! 값 범위는 0을 중심으로 대칭(`max(|max|, |min|)`)이며 0 기준선은 세로 중앙에 놓입니다.
//! 합성 슬롯은 값 스케일에 참여하지 않고 전체 높이의 흐린 자리표시 막대가 됩니다.

use chrono::NaiveDate;
use journal_core::DecimalExt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    profit_color, AxisLabel, ChartArea, GridLine, GRID_LINES, PLACEHOLDER_FILL,
    PLACEHOLDER_STROKE,
};
use crate::padding::ChartSlot;

/// 레이블 하나가 차지하는 대략적인 너비 (px).
const APPROX_LABEL_WIDTH: f64 = 40.0;

/// 막대.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    /// 테두리 색상 (합성 슬롯만)
    pub stroke: Option<String>,
    pub synthetic: bool,
    pub value: Decimal,
}

/// 막대 차트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    /// 대칭 값 범위
    pub range: f64,
    /// 수평 그리드 (6개)
    pub grid: Vec<GridLine>,
    /// 0 기준선 y
    pub zero_line: f64,
    pub bars: Vec<Bar>,
    pub labels: Vec<AxisLabel>,
    /// 레이블 회전 (도)
    pub label_rotation_deg: f64,
    /// 레이블 글꼴 크기 (px)
    pub label_font_px: u32,
}

/// 막대 차트 지오메트리를 계산합니다. 빈 시계열은 `None`.
pub fn bar_chart(slots: &[ChartSlot], area: &ChartArea) -> Option<BarChart> {
    if slots.is_empty() {
        return None;
    }

    let n = slots.len();
    let inner_w = area.inner_width();
    let inner_h = area.inner_height();
    let top = area.padding.top;
    let left = area.padding.left;

    let (max, min) = slots
        .iter()
        .filter(|s| !s.synthetic)
        .map(|s| s.value.to_f64_lossy())
        .fold((0.0_f64, 0.0_f64), |(hi, lo), v| (hi.max(v), lo.min(v)));
    let range = match max.abs().max(min.abs()) {
        r if r == 0.0 => 1.0,
        r => r,
    };

    let zero_line = top + inner_h / 2.0;

    let grid = (0..GRID_LINES)
        .map(|i| GridLine {
            y: top + inner_h / 5.0 * i as f64,
            value: range - (range * 2.0 / 5.0) * i as f64,
        })
        .collect();

    let slot_width = inner_w / n as f64;
    let bar_width = slot_width * 0.7;
    let bar_gap = slot_width * 0.3;
    let x_of = |i: usize| left + i as f64 * (bar_width + bar_gap) + bar_gap / 2.0;

    let bars = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let x = x_of(i);
            if slot.synthetic {
                return Bar {
                    x,
                    y: top,
                    width: bar_width,
                    height: inner_h,
                    fill: PLACEHOLDER_FILL.to_string(),
                    stroke: Some(PLACEHOLDER_STROKE.to_string()),
                    synthetic: true,
                    value: slot.value,
                };
            }

            let v = slot.value.to_f64_lossy();
            let height = v.abs() / (range * 2.0) * inner_h;
            let y = if v >= 0.0 { zero_line - height } else { zero_line };
            Bar {
                x,
                y,
                width: bar_width,
                height,
                fill: profit_color(slot.value).to_string(),
                stroke: None,
                synthetic: false,
                value: slot.value,
            }
        })
        .collect();

    let rotation = label_rotation(slot_width);
    let label_y = area.height - area.padding.bottom + if rotation == -90.0 { 34.0 } else { 18.0 };
    let interval = label_interval(n, inner_w);

    let labels = slots
        .iter()
        .enumerate()
        .filter(|(i, _)| i % interval == 0 || *i == n - 1)
        .map(|(i, slot)| AxisLabel {
            index: i,
            x: x_of(i) + bar_width / 2.0,
            y: label_y,
            text: format_bar_label(&slot.label),
        })
        .collect();

    Some(BarChart {
        range,
        grid,
        zero_line,
        bars,
        labels,
        label_rotation_deg: rotation,
        label_font_px: label_font_px(slot_width),
    })
}

/// 레이블 간격. 레이블당 약 40px 기준입니다.
pub fn label_interval(slot_count: usize, chart_width: f64) -> usize {
    let max_labels = ((chart_width / APPROX_LABEL_WIDTH).floor() as usize).max(1);
    slot_count.div_ceil(max_labels).max(1)
}

/// 슬롯 너비에 따른 레이블 회전 각도.
pub fn label_rotation(slot_width: f64) -> f64 {
    if slot_width < 50.0 {
        -90.0
    } else if slot_width < 90.0 {
        -45.0
    } else {
        0.0
    }
}

/// 슬롯 너비에 따른 레이블 글꼴 크기.
pub fn label_font_px(slot_width: f64) -> u32 {
    if slot_width < 40.0 {
        9
    } else if slot_width < 70.0 {
        10
    } else {
        11
    }
}

/// 기간 키를 축 레이블로 표시합니다.
///
/// `2025-06-15` → `15 Jun`, `2025-06` → `Jun 2025`, `2025-Q1` → `Q1 2025`.
/// 그 외 형식은 그대로 둡니다.
pub fn format_bar_label(label: &str) -> String {
    if is_digits(label, &[4, 2, 2]) {
        if let Ok(d) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
            return d.format("%-d %b").to_string();
        }
    }
    if is_digits(label, &[4, 2]) {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d") {
            return d.format("%b %Y").to_string();
        }
    }
    if let Some((year, quarter)) = label.split_once("-Q") {
        if is_digits(year, &[4]) && matches!(quarter, "1" | "2" | "3" | "4") {
            return format!("Q{} {}", quarter, year);
        }
    }
    label.to_string()
}

/// `-`로 나눈 각 부분이 주어진 자릿수의 숫자인지 확인합니다.
fn is_digits(s: &str, widths: &[usize]) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == widths.len()
        && parts
            .iter()
            .zip(widths)
            .all(|(p, w)| p.len() == *w && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::pad_single_point;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_bar_label() {
        assert_eq!(format_bar_label("2025-06-15"), "15 Jun");
        assert_eq!(format_bar_label("2025-06-05"), "5 Jun");
        assert_eq!(format_bar_label("2025-06"), "Jun 2025");
        assert_eq!(format_bar_label("2025-Q1"), "Q1 2025");
        assert_eq!(format_bar_label("2025-Q5"), "2025-Q5");
        assert_eq!(format_bar_label(""), "");
        assert_eq!(format_bar_label("Week 3"), "Week 3");
    }

    #[test]
    fn test_symmetric_range_and_bar_directions() {
        // inner 400 x 200, 슬롯 2개 → 슬롯 너비 200
        let area = ChartArea::for_bars(480.0, 290.0);
        let slots = vec![ChartSlot::new("a", dec!(50)), ChartSlot::new("b", dec!(-100))];
        let chart = bar_chart(&slots, &area).unwrap();

        assert_eq!(chart.range, 100.0);
        assert_eq!(chart.zero_line, 20.0 + 100.0);
        assert_eq!(chart.grid[0].value, 100.0);
        assert_eq!(chart.grid[5].value, -100.0);

        let up = &chart.bars[0];
        assert_eq!(up.height, 50.0);
        assert_eq!(up.y, 120.0 - 50.0);
        assert_eq!(up.width, 140.0);
        assert_eq!(up.x, 60.0 + 30.0);

        let down = &chart.bars[1];
        assert_eq!(down.y, 120.0);
        assert_eq!(down.height, 100.0);
        assert_eq!(down.x, 60.0 + 200.0 + 30.0);
        assert_eq!(down.fill, crate::chart::LOSS_COLOR);

        assert_eq!(chart.label_rotation_deg, 0.0);
        assert_eq!(chart.label_font_px, 11);
    }

    #[test]
    fn test_padded_single_point_placeholders() {
        let padded = pad_single_point(&[ChartSlot::new("2025-06-15", dec!(100))]);
        let area = ChartArea::for_bars(780.0, 300.0);
        let chart = bar_chart(&padded, &area).unwrap();

        assert_eq!(chart.bars.len(), 7);
        assert_eq!(chart.range, 100.0);
        for (i, bar) in chart.bars.iter().enumerate() {
            if i == 3 {
                assert!(!bar.synthetic);
                assert_eq!(bar.fill, crate::chart::PROFIT_COLOR);
                assert_eq!(bar.height, area.inner_height() / 2.0);
            } else {
                assert!(bar.synthetic);
                assert_eq!(bar.y, area.padding.top);
                assert_eq!(bar.height, area.inner_height());
                assert_eq!(bar.fill, PLACEHOLDER_FILL);
                assert_eq!(bar.stroke.as_deref(), Some(PLACEHOLDER_STROKE));
            }
        }
        assert_eq!(chart.labels[3].text, "15 Jun");
    }

    #[test]
    fn test_all_zero_range_is_one() {
        let slots = vec![ChartSlot::new("a", dec!(0))];
        let chart = bar_chart(&slots, &ChartArea::for_bars(400.0, 300.0)).unwrap();
        assert_eq!(chart.range, 1.0);
        assert_eq!(chart.bars[0].height, 0.0);
    }

    #[test]
    fn test_label_rules() {
        assert_eq!(label_rotation(49.9), -90.0);
        assert_eq!(label_rotation(50.0), -45.0);
        assert_eq!(label_rotation(90.0), 0.0);
        assert_eq!(label_font_px(39.0), 9);
        assert_eq!(label_font_px(69.0), 10);
        assert_eq!(label_font_px(70.0), 11);

        // 680px → 최대 17개 레이블, 30개 슬롯이면 2칸마다
        assert_eq!(label_interval(30, 680.0), 2);
        assert_eq!(label_interval(12, 680.0), 1);
        assert_eq!(label_interval(5, 10.0), 5);
    }

    #[test]
    fn test_narrow_slots_rotate_labels() {
        let slots: Vec<ChartSlot> = (0..30)
            .map(|i| ChartSlot::new(format!("2025-06-{:02}", i + 1), dec!(1)))
            .collect();
        let area = ChartArea::for_bars(800.0, 300.0);
        let chart = bar_chart(&slots, &area).unwrap();

        assert_eq!(chart.label_rotation_deg, -90.0);
        assert_eq!(chart.label_font_px, 9);
        assert_eq!(chart.labels[0].y, 300.0 - 70.0 + 34.0);
        assert_eq!(chart.labels.last().unwrap().index, 29);
    }
}
