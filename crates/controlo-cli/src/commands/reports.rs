//! Report command implementations

use anyhow::Result;
use controlo_core::analytics::AggregationEngine;
use controlo_core::currency::format_cve;
use controlo_core::insights::{InsightContext, InsightEngine};
use controlo_core::models::{MetricComparison, Period, TransactionType, Trend};
use controlo_core::{Ledger, LocalePack, TransactionStore};

use super::truncate;

/// Months of history behind the "usual spending" figure
const HISTORY_WINDOW_MONTHS: u32 = 3;

fn trend_arrow(metric: &MetricComparison) -> &'static str {
    match metric.trend {
        Trend::Up => "\x1b[32m▲\x1b[0m",
        Trend::Down => "\x1b[31m▼\x1b[0m",
    }
}

fn print_metric(label: &str, metric: &MetricComparison) {
    println!(
        "   {:10} {:>16}  {} {:+.1}% vs {}",
        label,
        format_cve(metric.current),
        trend_arrow(metric),
        metric.change,
        format_cve(metric.previous)
    );
}

/// Render a bar of `width` cells filled to `fraction`
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn cmd_summary(ledger: &Ledger, locale: &LocalePack, period: Period) -> Result<()> {
    let engine = AggregationEngine::new(ledger);
    let comparison = engine.monthly_comparison(period);

    println!();
    println!("📊 {}", locale.month_title(period));
    println!("   ─────────────────────────────────────────────────────────────");
    print_metric("Income", &comparison.income);
    print_metric("Expense", &comparison.expense);
    print_metric("Balance", &comparison.balance);

    if let Some(top) = engine.top_expense(period) {
        println!();
        println!(
            "   🔝 Largest expense: {} in {} on {}{}",
            format_cve(top.amount),
            top.category,
            top.date,
            if top.note.is_empty() {
                String::new()
            } else {
                format!(" ({})", truncate(&top.note, 30))
            }
        );
    }

    if period == engine.current_period() {
        let average = engine.historical_average(HISTORY_WINDOW_MONTHS);
        println!(
            "   🔮 Projected month-end spending: {}",
            format_cve(engine.spending_projection())
        );
        if average > 0.0 {
            println!(
                "   📏 Usual monthly spending ({} months): {}",
                HISTORY_WINDOW_MONTHS,
                format_cve(average)
            );
        }
    }

    let categories = engine.category_summary(TransactionType::Expense, period);
    if categories.is_empty() {
        println!();
        println!("   No expenses this month.");
        return Ok(());
    }

    let total = comparison.expense.current;
    println!();
    println!("   {:20} │ {:>16} │ {:>6}", "Category", "Amount", "%");
    println!("   ─────────────────────┼──────────────────┼────────");
    for cat in &categories {
        let share = if total > 0.0 { cat.total / total * 100.0 } else { 0.0 };
        println!(
            "   {:20} │ {:>16} │ {:>5.1}%",
            truncate(&cat.category, 20),
            format_cve(cat.total),
            share
        );
    }

    Ok(())
}

pub fn cmd_trend(ledger: &Ledger, locale: &LocalePack) -> Result<()> {
    let engine = AggregationEngine::new(ledger);
    let months = engine.last_6_months(locale);

    let peak = months
        .iter()
        .flat_map(|m| [m.income, m.expense])
        .fold(0.0_f64, f64::max);

    println!();
    println!("📈 Last 6 Months");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:9} │ {:>16} │ {:>16} │ Expense",
        "Month", "Income", "Expense"
    );
    for m in &months {
        let fraction = if peak > 0.0 { m.expense / peak } else { 0.0 };
        println!(
            "   {:4} {:04} │ {:>16} │ {:>16} │ {}",
            m.label,
            m.year,
            format_cve(m.income),
            format_cve(m.expense),
            bar(fraction, 20)
        );
    }

    Ok(())
}

pub fn cmd_insights(ledger: &Ledger, locale: &LocalePack) -> Result<()> {
    let ctx = InsightContext::new(ledger, locale);
    let insights = InsightEngine::new().generate(&ctx);

    if insights.is_empty() {
        println!(
            "💡 Not enough data yet: insights need at least 5 expenses ({} recorded).",
            ledger.expenses().len()
        );
        return Ok(());
    }

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    for insight in &insights {
        println!("   {} {}", insight.icon, insight.text);
        println!("      {}", insight.detail);
    }

    Ok(())
}

