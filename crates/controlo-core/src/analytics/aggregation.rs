//! Monthly aggregation, comparison and projection
//!
//! Every query re-reads the store; nothing is cached between calls.

use chrono::{Datelike, Local, NaiveDate};

use crate::locale::LocalePack;
use crate::models::{
    CategorySummary, MetricComparison, MonthSnapshot, MonthlyComparison, MonthlyTotals, Period,
    TopExpense, TransactionType, Trend,
};
use crate::store::TransactionStore;

/// Percent change from `previous` to `current`
///
/// A zero baseline reports 100 when anything was recorded this month and 0
/// otherwise.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

pub struct AggregationEngine<'a> {
    store: &'a dyn TransactionStore,
    today: NaiveDate,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self::with_today(store, Local::now().date_naive())
    }

    /// Pin "today" (for tests and reproducible reports)
    pub fn with_today(store: &'a dyn TransactionStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    pub fn current_period(&self) -> Period {
        Period::of(self.today)
    }

    pub fn monthly_totals(&self, period: Period) -> MonthlyTotals {
        let mut totals = MonthlyTotals::default();
        for t in self.store.in_period(period) {
            match t.kind {
                TransactionType::Income => totals.income += t.amount,
                TransactionType::Expense => totals.expense += t.amount,
            }
        }
        totals.balance = totals.income - totals.expense;
        totals
    }

    /// Per-category totals, largest first; ties keep first-seen order
    pub fn category_summary(&self, kind: TransactionType, period: Period) -> Vec<CategorySummary> {
        let mut summary: Vec<CategorySummary> = Vec::new();
        for t in self
            .store
            .in_period(period)
            .into_iter()
            .filter(|t| t.kind == kind)
        {
            match summary.iter_mut().find(|s| s.category == t.category) {
                Some(entry) => entry.total += t.amount,
                None => summary.push(CategorySummary {
                    category: t.category.clone(),
                    total: t.amount,
                }),
            }
        }

        // sort_by is stable, which keeps equal totals in first-seen order
        summary.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        summary
    }

    /// `count` months ending at the current month, oldest first
    pub fn trailing_months(&self, count: usize, locale: &LocalePack) -> Vec<MonthSnapshot> {
        let current = self.current_period();
        (0..count as i32)
            .rev()
            .map(|back| {
                let period = current.offset(-back);
                let totals = self.monthly_totals(period);
                MonthSnapshot {
                    label: locale.short_month(period.month()).to_string(),
                    year: period.year(),
                    month: period.month(),
                    income: totals.income,
                    expense: totals.expense,
                }
            })
            .collect()
    }

    pub fn last_6_months(&self, locale: &LocalePack) -> Vec<MonthSnapshot> {
        self.trailing_months(6, locale)
    }

    /// Compare `period` with the calendar month before it
    ///
    /// For expense, `Trend::Up` means spending did not grow.
    pub fn monthly_comparison(&self, period: Period) -> MonthlyComparison {
        let current = self.monthly_totals(period);
        let previous = self.monthly_totals(period.previous());

        let metric = |current: f64, previous: f64, favorable: bool| MetricComparison {
            current,
            previous,
            change: percent_change(current, previous),
            trend: if favorable { Trend::Up } else { Trend::Down },
        };

        MonthlyComparison {
            income: metric(
                current.income,
                previous.income,
                current.income >= previous.income,
            ),
            expense: metric(
                current.expense,
                previous.expense,
                current.expense <= previous.expense,
            ),
            balance: metric(
                current.balance,
                previous.balance,
                current.balance >= previous.balance,
            ),
        }
    }

    /// Largest expense of the month; the first one wins a tie
    pub fn top_expense(&self, period: Period) -> Option<TopExpense> {
        let top = self
            .store
            .in_period(period)
            .into_iter()
            .filter(|t| t.is_expense())
            .reduce(|max, t| if t.amount > max.amount { t } else { max })?;

        Some(TopExpense {
            category: top.category.clone(),
            amount: top.amount,
            note: top.note.clone().unwrap_or_default(),
            date: top.date,
        })
    }

    /// Month-end expense projected from the current daily average
    ///
    /// On day 1, or with nothing spent yet, the month-to-date figure is
    /// returned as is.
    pub fn spending_projection(&self) -> f64 {
        let period = self.current_period();
        let spent = self.monthly_totals(period).expense;
        let day = self.today.day();

        if day <= 1 || spent == 0.0 {
            return spent;
        }

        let daily_average = spent / day as f64;
        daily_average * period.days_in_month() as f64
    }

    /// Mean monthly expense over the `window_months` months before the
    /// current one, skipping months with no expense at all
    pub fn historical_average(&self, window_months: u32) -> f64 {
        let current = self.current_period();
        let (total, count) = (1..=window_months as i32)
            .map(|back| self.monthly_totals(current.offset(-back)).expense)
            .filter(|expense| *expense > 0.0)
            .fold((0.0, 0u32), |(total, count), expense| {
                (total + expense, count + 1)
            });

        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}
