//! 차트 지오메트리.
//!
//! 시계열 슬롯을 픽셀 좌표와 색상으로 매핑합니다. 그리기 표면은 다루지 않으며,
//! 결과 구조체는 렌더러에 그대로 넘길 수 있도록 직렬화됩니다.
//!
//! # 제공 차트
//!
//! - 선 차트 (누적/기간 손익 추이)
//! - 막대 차트 (기간별 손익, 합성 슬롯 표시)
//! - 원 차트 (수익/손실 거래 비율)

pub mod bar;
pub mod line;
pub mod pie;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use bar::{bar_chart, format_bar_label, Bar, BarChart};
pub use line::{line_chart, LineChart, Marker};
pub use pie::{pie_chart, LegendEntry, PieChart, PieSlice};

/// 수익(0 이상) 색상.
pub const PROFIT_COLOR: &str = "#27ae60";
/// 손실 색상.
pub const LOSS_COLOR: &str = "#e74c3c";
/// 합성 슬롯 채움 색상.
pub const PLACEHOLDER_FILL: &str = "#ecf0f1";
/// 합성 슬롯 테두리 색상.
pub const PLACEHOLDER_STROKE: &str = "#bdc3c7";

/// 값의 부호에 따른 색상.
pub fn profit_color(value: Decimal) -> &'static str {
    if value >= Decimal::ZERO {
        PROFIT_COLOR
    } else {
        LOSS_COLOR
    }
}

/// 차트 여백.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// 차트 영역.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartArea {
    /// 전체 너비 (px)
    pub width: f64,
    /// 전체 높이 (px)
    pub height: f64,
    /// 여백
    pub padding: Padding,
}

impl ChartArea {
    /// 선 차트 기본 여백으로 영역을 생성합니다.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: Padding {
                top: 20.0,
                right: 20.0,
                bottom: 60.0,
                left: 60.0,
            },
        }
    }

    /// 막대 차트 기본 여백(회전 레이블용 하단 여유)으로 영역을 생성합니다.
    pub fn for_bars(width: f64, height: f64) -> Self {
        Self {
            padding: Padding {
                bottom: 70.0,
                ..Self::new(width, height).padding
            },
            ..Self::new(width, height)
        }
    }

    /// 여백을 설정합니다.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// 그리기 영역 너비. 음수가 되지 않습니다.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    /// 그리기 영역 높이. 음수가 되지 않습니다.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    /// 그리기 영역 하단 y 좌표.
    pub fn bottom(&self) -> f64 {
        self.padding.top + self.inner_height()
    }
}

/// 좌표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// 수평 그리드 선과 Y축 눈금 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub y: f64,
    pub value: f64,
}

/// X축 레이블.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    /// 원본 슬롯 인덱스
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// 그리드 선 수 (0..=5).
pub(crate) const GRID_LINES: usize = 6;
