//! Built-in insight rules

use chrono::{Datelike, Weekday};

use crate::currency::format_cve;
use crate::locale::render;
use crate::models::Period;

use super::engine::{InsightContext, InsightRule};
use super::types::{Insight, InsightKind};

/// Sunday first, matching `Weekday::num_days_from_sunday`
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

fn rounded_percent(part: f64, whole: f64) -> i64 {
    if whole == 0.0 {
        0
    } else {
        (part / whole * 100.0).round() as i64
    }
}

/// Weekday with the highest mean expense amount
///
/// Ties go to the earliest weekday, Sunday first.
pub struct BusiestWeekdayRule;

impl InsightRule for BusiestWeekdayRule {
    fn kind(&self) -> InsightKind {
        InsightKind::BusiestWeekday
    }

    fn name(&self) -> &'static str {
        "Busiest Weekday"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        if ctx.expenses.is_empty() {
            return None;
        }

        let mut totals = [0.0_f64; 7];
        let mut counts = [0_u32; 7];
        for t in &ctx.expenses {
            let day = t.date.weekday().num_days_from_sunday() as usize;
            totals[day] += t.amount;
            counts[day] += 1;
        }

        let (mut best_day, mut best_avg) = (0, 0.0);
        for day in 0..7 {
            if counts[day] == 0 {
                continue;
            }
            let avg = totals[day] / counts[day] as f64;
            if avg > best_avg {
                best_day = day;
                best_avg = avg;
            }
        }

        let day_name = ctx.locale.weekday_name(WEEKDAYS[best_day]);
        let day_lower = day_name.to_lowercase();
        let amount = format_cve(best_avg);
        let templates = ctx.locale.templates();

        Some(Insight::new(
            self.kind(),
            "📅",
            render(&templates.busiest_day_text, &[("day", day_name)]),
            render(
                &templates.busiest_day_detail,
                &[("amount", amount.as_str()), ("day_lower", day_lower.as_str())],
            ),
        ))
    }
}

/// Category with the largest total across all expenses
pub struct TopCategoryRule;

impl InsightRule for TopCategoryRule {
    fn kind(&self) -> InsightKind {
        InsightKind::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let mut totals: Vec<(&str, f64)> = Vec::new();
        for t in &ctx.expenses {
            match totals.iter_mut().find(|(c, _)| *c == t.category) {
                Some((_, total)) => *total += t.amount,
                None => totals.push((t.category.as_str(), t.amount)),
            }
        }

        // First-seen category wins a tie
        let (category, top_total) = totals
            .iter()
            .copied()
            .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })?;

        let grand_total: f64 = ctx.expenses.iter().map(|t| t.amount).sum();
        let percent = rounded_percent(top_total, grand_total).to_string();
        let templates = ctx.locale.templates();

        Some(Insight::new(
            self.kind(),
            "🏆",
            render(&templates.top_category_text, &[("category", category)]),
            render(&templates.top_category_detail, &[("percent", percent.as_str())]),
        ))
    }
}

/// Share of spending on Saturday and Sunday, reported above a threshold
pub struct WeekendShareRule {
    threshold_percent: i64,
}

impl WeekendShareRule {
    pub fn new(threshold_percent: i64) -> Self {
        Self { threshold_percent }
    }
}

impl InsightRule for WeekendShareRule {
    fn kind(&self) -> InsightKind {
        InsightKind::WeekendShare
    }

    fn name(&self) -> &'static str {
        "Weekend Share"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let (weekend, total) = ctx.expenses.iter().fold((0.0, 0.0), |(weekend, total), t| {
            let is_weekend = matches!(t.date.weekday(), Weekday::Sat | Weekday::Sun);
            (
                if is_weekend { weekend + t.amount } else { weekend },
                total + t.amount,
            )
        });
        if total <= 0.0 {
            return None;
        }

        // The rounded figure is what gets displayed, so it is also what is compared
        let percent = rounded_percent(weekend, total);
        if percent <= self.threshold_percent {
            return None;
        }

        let templates = ctx.locale.templates();
        Some(Insight::new(
            self.kind(),
            "🌴",
            render(&templates.weekend_text, &[("percent", percent.to_string().as_str())]),
            templates.weekend_detail.clone(),
        ))
    }
}

/// More expense transactions this month than in the previous one
pub struct TransactionGrowthRule;

impl InsightRule for TransactionGrowthRule {
    fn kind(&self) -> InsightKind {
        InsightKind::TransactionGrowth
    }

    fn name(&self) -> &'static str {
        "Transaction Growth"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let current = Period::of(ctx.today);
        let previous = current.previous();

        let count_in = |period: Period| {
            ctx.expenses
                .iter()
                .filter(|t| period.contains(t.date))
                .count()
        };
        let this_month = count_in(current);
        let last_month = count_in(previous);

        if last_month == 0 || this_month <= last_month {
            return None;
        }

        let percent = rounded_percent((this_month - last_month) as f64, last_month as f64);
        let templates = ctx.locale.templates();

        Some(Insight::new(
            self.kind(),
            "📈",
            render(&templates.growth_text, &[("percent", percent.to_string().as_str())]),
            render(
                &templates.growth_detail,
                &[
                    ("current", this_month.to_string().as_str()),
                    ("previous", last_month.to_string().as_str()),
                ],
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::locale::LocalePack;
    use crate::test_utils::{date, expense, income, ledger_with};

    fn evaluate(rule: &dyn InsightRule, ledger: &Ledger) -> Option<Insight> {
        let locale = LocalePack::embedded();
        let ctx = InsightContext::with_today(ledger, &locale, date(2024, 3, 20));
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_busiest_weekday() {
        // 2024-03-02 is a Saturday, 2024-03-04 a Monday
        let ledger = ledger_with([
            expense(100.0, "Lazer", date(2024, 3, 2)),
            expense(300.0, "Lazer", date(2024, 3, 2)),
            expense(50.0, "Transporte", date(2024, 3, 4)),
            income(5000.0, "Salário", date(2024, 3, 4)),
        ]);

        let insight = evaluate(&BusiestWeekdayRule, &ledger).unwrap();
        assert_eq!(insight.kind, InsightKind::BusiestWeekday);
        assert_eq!(insight.icon, "📅");
        assert_eq!(insight.text, "Seu dia mais gastador é Sábado");
        assert_eq!(insight.detail, "Média de 200,00 $ por sábado");
    }

    #[test]
    fn test_busiest_weekday_tie_prefers_sunday_side() {
        // Sunday 2024-03-03 and Wednesday 2024-03-06 have the same mean
        let ledger = ledger_with([
            expense(40.0, "Lazer", date(2024, 3, 6)),
            expense(40.0, "Lazer", date(2024, 3, 3)),
        ]);
        let insight = evaluate(&BusiestWeekdayRule, &ledger).unwrap();
        assert_eq!(insight.text, "Seu dia mais gastador é Domingo");
    }

    #[test]
    fn test_top_category_share() {
        let ledger = ledger_with([
            expense(60.0, "Alimentação", date(2024, 1, 5)),
            expense(30.0, "Transporte", date(2024, 3, 5)),
            expense(30.0, "Transporte", date(2024, 3, 6)),
            expense(80.0, "Saúde", date(2024, 3, 7)),
        ]);

        let insight = evaluate(&TopCategoryRule, &ledger).unwrap();
        assert_eq!(insight.text, "Saúde é sua maior categoria");
        assert_eq!(insight.detail, "40% dos seus gastos");
    }

    #[test]
    fn test_top_category_tie_keeps_first_seen() {
        let ledger = ledger_with([
            expense(50.0, "Transporte", date(2024, 3, 5)),
            expense(50.0, "Alimentação", date(2024, 3, 6)),
        ]);
        let insight = evaluate(&TopCategoryRule, &ledger).unwrap();
        assert_eq!(insight.text, "Transporte é sua maior categoria");
        assert_eq!(insight.detail, "50% dos seus gastos");
    }

    #[test]
    fn test_weekend_share_above_threshold() {
        let ledger = ledger_with([
            expense(40.0, "Lazer", date(2024, 3, 2)),
            expense(60.0, "Lazer", date(2024, 3, 4)),
        ]);
        let insight = evaluate(&WeekendShareRule::new(30), &ledger).unwrap();
        assert_eq!(insight.text, "40% dos seus gastos são no fim de semana");
        assert_eq!(insight.detail, "Sábado e Domingo");
    }

    #[test]
    fn test_weekend_share_at_threshold_is_skipped() {
        let ledger = ledger_with([
            expense(30.0, "Lazer", date(2024, 3, 3)),
            expense(70.0, "Lazer", date(2024, 3, 5)),
        ]);
        assert!(evaluate(&WeekendShareRule::new(30), &ledger).is_none());
    }

    #[test]
    fn test_transaction_growth() {
        let ledger = ledger_with([
            expense(10.0, "Lazer", date(2024, 2, 5)),
            expense(10.0, "Lazer", date(2024, 2, 6)),
            expense(10.0, "Lazer", date(2024, 3, 5)),
            expense(10.0, "Lazer", date(2024, 3, 6)),
            expense(10.0, "Lazer", date(2024, 3, 7)),
        ]);
        let insight = evaluate(&TransactionGrowthRule, &ledger).unwrap();
        assert_eq!(insight.text, "Este mês você tem 50% mais transações");
        assert_eq!(insight.detail, "3 transações vs 2 no mês passado");
    }

    #[test]
    fn test_transaction_growth_needs_previous_month() {
        let no_history = ledger_with([expense(10.0, "Lazer", date(2024, 3, 5))]);
        assert!(evaluate(&TransactionGrowthRule, &no_history).is_none());

        let flat = ledger_with([
            expense(10.0, "Lazer", date(2024, 2, 5)),
            expense(10.0, "Lazer", date(2024, 3, 5)),
        ]);
        assert!(evaluate(&TransactionGrowthRule, &flat).is_none());
    }
}
