//! 명령 결과 출력 (표 또는 JSON).

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;

use journal_analytics::{ChartSlot, DashboardStats, PerformanceReport, PeriodBucket, PeriodComparison};
use journal_client::ExtractionReport;
use journal_core::{Currency, MaintenanceWindow, Money};

/// 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 사람이 읽기 쉬운 표
    #[default]
    Table,
    /// JSON
    Json,
}

/// JSON으로 stdout에 출력합니다.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// 형식에 맞게 출력합니다. 표 형식은 `table`이 만든 문자열을 사용합니다.
pub fn emit<T, F>(format: OutputFormat, value: &T, table: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => {
            println!("{}", table(value));
            Ok(())
        }
    }
}

/// 기간별 손익 표.
pub fn format_buckets(buckets: &[PeriodBucket], currency: Currency) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<12} {:>7} {:>14}",
        "PERIOD", "START", "END", "TRADES", "P/L"
    );
    out.push_str(&"-".repeat(61));
    out.push('\n');

    for b in buckets {
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:<12} {:>7} {:>14}",
            b.period_key,
            b.start,
            b.end,
            b.trade_count,
            Money::new(b.total_profit, currency).to_string()
        );
    }

    let total = buckets
        .iter()
        .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.total_profit));
    let trades: usize = buckets.iter().map(|b| b.trade_count).sum();
    let _ = write!(
        out,
        "\nTotal: {} over {} trades in {} periods",
        Money::new(total, currency),
        trades,
        buckets.len()
    );
    out
}

/// 차트 슬롯 표.
pub fn format_slots(slots: &[ChartSlot], currency: Currency) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<4} {:<12} {:>14} {}", "#", "LABEL", "VALUE", "");
    out.push_str(&"-".repeat(44));
    out.push('\n');
    for (i, slot) in slots.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<12} {:>14} {}",
            i,
            if slot.label.is_empty() { "-" } else { slot.label.as_str() },
            Money::new(slot.value, currency).to_string(),
            if slot.synthetic { "(padding)" } else { "" }
        );
    }
    out.trim_end().to_string()
}

/// 대시보드 통계 표.
pub fn format_stats(stats: &DashboardStats, currency: Currency) -> String {
    let money = |v| Money::new(v, currency).to_string();
    let mut out = String::new();
    let _ = writeln!(out, "Total trades:    {}", stats.total_trades);
    let _ = writeln!(out, "Net P/L:         {}", money(stats.total_profit_loss));
    let _ = writeln!(
        out,
        "Win / Loss / BE: {} / {} / {}",
        stats.winning_trades, stats.losing_trades, stats.breakeven_trades
    );
    let _ = writeln!(out, "Win rate:        {}%", stats.win_rate);
    let _ = writeln!(out, "Gross profit:    {}", money(stats.gross_profit));
    let _ = writeln!(out, "Gross loss:      {}", money(stats.gross_loss));
    let _ = writeln!(out, "Average win:     {}", money(stats.average_win));
    let _ = writeln!(out, "Average loss:    {}", money(stats.average_loss));
    let _ = writeln!(out, "Largest win:     {}", money(stats.largest_win));
    let _ = writeln!(out, "Largest loss:    {}", money(stats.largest_loss));
    let _ = write!(
        out,
        "Profit factor:   {}",
        stats
            .profit_factor
            .map(|pf| pf.round_dp(2).to_string())
            .unwrap_or_else(|| "-".to_string())
    );

    if !stats.trades_by_market.is_empty() {
        out.push_str("\n\nBy Market:");
        for m in &stats.trades_by_market {
            let name = m.market.as_ref().map(|m| m.as_str()).unwrap_or("(untagged)");
            let market_currency = m.market.as_ref().map(|m| m.currency()).unwrap_or(currency);
            let _ = write!(
                out,
                "\n  {:<10} {:>5} trades  {}",
                name,
                m.count,
                Money::new(m.profit_loss, market_currency)
            );
        }
    }
    out
}

/// 성과 리포트 표.
pub fn format_performance(report: &PerformanceReport, currency: Currency) -> String {
    let money = |v| Money::new(v, currency).to_string();
    let mut out = String::new();
    let _ = writeln!(out, "Filter:          {}", report.filter);
    let _ = writeln!(out, "Trades:          {}", report.trade_count);
    let _ = writeln!(out, "Initial capital: {}", money(report.initial_capital));
    let _ = writeln!(out, "Net P/L:         {}", money(report.total_profit_loss));
    let _ = writeln!(out, "Final capital:   {}", money(report.final_capital));
    let _ = writeln!(
        out,
        "Profit / Loss:   {} ({}) / {} ({})",
        money(report.total_profit),
        report.profitable_trades,
        money(report.total_loss),
        report.loss_trades
    );
    let sign = if report.performance_pct.is_sign_positive() { "+" } else { "" };
    let _ = write!(out, "Performance:     {}{}%", sign, report.performance_pct);
    out
}

/// 기간 비교 표.
pub fn format_comparison(cmp: &PeriodComparison, currency: Currency) -> String {
    let money = |v| Money::new(v, currency).to_string();
    let pct = cmp
        .change_pct
        .map(|p| format!("{}{}%", if p.is_sign_positive() { "+" } else { "" }, p))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{} comparison\n  Previous ({}): {}\n  Current  ({}): {}\n  Change: {} ({}){}",
        cmp.granularity.display_name(),
        cmp.previous.period_key,
        money(cmp.previous.total_profit),
        cmp.current.period_key,
        money(cmp.current.total_profit),
        money(cmp.change),
        pct,
        if cmp.improved() { " ▲" } else { "" }
    )
}

/// 점검 일정 목록.
pub fn format_maintenance(windows: &[MaintenanceWindow]) -> String {
    if windows.is_empty() {
        return "No upcoming maintenance".to_string();
    }
    windows
        .iter()
        .map(|w| {
            format!(
                "{}  {}  {}",
                w.display_date(),
                w.display_range(),
                w.message.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 이미지 추출 검증 결과.
pub fn format_extraction(report: &ExtractionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Valid trades: {}", report.valid.len());
    for t in &report.valid {
        let _ = writeln!(
            out,
            "  {:<8} {:<5} lot {:<6} {} -> {}  P/L {}  {}",
            t.symbol,
            t.trade_type,
            t.lot_size,
            t.entry_price,
            t.exit_price,
            Money::new(t.profit_loss, t.market_type.currency()),
            t.trade_date
        );
    }
    if let Some(summary) = report.summary() {
        out.push_str(&summary);
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use journal_analytics::aggregate;
    use journal_core::{Granularity, Trade};
    use rust_decimal_macros::dec;

    #[test]
    fn test_bucket_table_totals() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let trades = vec![
            Trade::new(Some(today), dec!(50)),
            Trade::new(Some(today), dec!(-20)),
        ];
        let buckets = aggregate(&trades, Granularity::Months, today);
        let table = format_buckets(&buckets, Currency::Inr);

        assert!(table.contains("2025-06"));
        assert!(table.contains("₹30.00"));
        assert!(table.ends_with("Total: ₹30.00 over 2 trades in 12 periods"));
    }

    #[test]
    fn test_slot_table_marks_padding() {
        let slots = journal_analytics::pad_single_point(&[ChartSlot::new("2025-06-15", dec!(100))]);
        let table = format_slots(&slots, Currency::Usd);
        assert_eq!(table.matches("(padding)").count(), 6);
        assert!(table.contains("$100.00"));
    }
}
