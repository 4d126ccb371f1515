//! 금액 계산을 위한 Decimal 유틸리티.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 손익 금액 타입.
pub type Amount = Decimal;

/// 퍼센트 타입 (5.25 = 5.25%).
pub type Percentage = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 통화 단위(소수 둘째 자리)로 반올림합니다.
    fn round_money(&self) -> Decimal;

    /// 픽셀 계산용 f64로 변환합니다. 변환 불가 시 0.
    fn to_f64_lossy(&self) -> f64;

    /// `self / base × 100`을 소수 둘째 자리로 반올림합니다.
    ///
    /// `base`가 0이거나 결과가 Decimal 범위를 넘으면 `None`.
    fn percent_of(&self, base: Decimal) -> Option<Decimal>;
}

impl DecimalExt for Decimal {
    fn round_money(&self) -> Decimal {
        self.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    fn percent_of(&self, base: Decimal) -> Option<Decimal> {
        self.checked_div(base)?
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|pct| pct.round_money())
    }
}

/// 통화.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// 미국 달러 (외환 시장 기본)
    Usd,
    /// 인도 루피 (인도 시장 기본)
    Inr,
}

impl Currency {
    /// 통화 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }
}

/// 통화가 포함된 금액.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// 금액
    pub amount: Decimal,
    /// 통화
    pub currency: Currency,
}

impl Money {
    /// 새 금액을 생성합니다.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self.amount.round_money();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-{}{:.2}", self.currency.symbol(), rounded.abs())
        } else {
            write!(f, "{}{:.2}", self.currency.symbol(), rounded.abs())
        }
    }
}
