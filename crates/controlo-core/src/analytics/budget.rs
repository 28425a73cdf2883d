//! Budget progress per expense category

use crate::models::{BudgetProgress, BudgetStatus, Period, TransactionType};
use crate::store::TransactionStore;

/// Status thresholds for budget progress
#[derive(Debug, Clone)]
pub struct BudgetConfig {
    /// Raw percentage at which a budget turns `Warning`
    pub warning_percent: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            warning_percent: 80.0,
        }
    }
}

pub struct BudgetEngine<'a> {
    store: &'a dyn TransactionStore,
    config: BudgetConfig,
}

impl<'a> BudgetEngine<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self::with_config(store, BudgetConfig::default())
    }

    pub fn with_config(store: &'a dyn TransactionStore, config: BudgetConfig) -> Self {
        Self { store, config }
    }

    /// Progress for every expense category with a positive budget
    ///
    /// Categories are taken from the store's expense list, so a budget left
    /// behind for a removed category is not reported. Sorted by capped
    /// percentage, highest first.
    pub fn budget_progress(&self, period: Period) -> Vec<BudgetProgress> {
        let budgets = self.store.budgets();
        let month = self.store.in_period(period);

        let mut progress: Vec<BudgetProgress> = self
            .store
            .categories(TransactionType::Expense)
            .iter()
            .filter_map(|category| {
                let budget = budgets.get(category).copied().filter(|b| *b > 0.0)?;
                let spent: f64 = month
                    .iter()
                    .filter(|t| t.is_expense() && &t.category == category)
                    .map(|t| t.amount)
                    .sum();
                Some(self.progress_for(category, budget, spent))
            })
            .collect();

        progress.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        progress
    }

    fn progress_for(&self, category: &str, budget: f64, spent: f64) -> BudgetProgress {
        let raw = spent / budget * 100.0;
        let status = if raw >= 100.0 {
            BudgetStatus::Exceeded
        } else if raw >= self.config.warning_percent {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        };

        BudgetProgress {
            category: category.to_string(),
            budget,
            spent,
            percentage: raw.min(100.0),
            remaining: (budget - spent).max(0.0),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income, ledger_with};

    fn march() -> Period {
        Period::new(2024, 3).unwrap()
    }

    #[test]
    fn test_budget_statuses_and_order() {
        let mut ledger = ledger_with([
            expense(150.0, "Transporte", date(2024, 3, 2)),
            expense(85.0, "Lazer", date(2024, 3, 3)),
            expense(10.0, "Saúde", date(2024, 3, 4)),
            // Other months and income do not count
            expense(500.0, "Saúde", date(2024, 2, 4)),
            income(500.0, "Saúde", date(2024, 3, 4)),
        ]);
        ledger.set_budget("Saúde", 100.0);
        ledger.set_budget("Transporte", 100.0);
        ledger.set_budget("Lazer", 100.0);

        let progress = BudgetEngine::new(&ledger).budget_progress(march());
        let names: Vec<&str> = progress.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(names, vec!["Transporte", "Lazer", "Saúde"]);

        assert_eq!(progress[0].status, BudgetStatus::Exceeded);
        assert_eq!(progress[0].percentage, 100.0);
        assert_eq!(progress[0].remaining, 0.0);
        assert_eq!(progress[0].spent, 150.0);

        assert_eq!(progress[1].status, BudgetStatus::Warning);
        assert_eq!(progress[1].percentage, 85.0);
        assert_eq!(progress[1].remaining, 15.0);

        assert_eq!(progress[2].status, BudgetStatus::Ok);
        assert_eq!(progress[2].spent, 10.0);
    }

    #[test]
    fn test_exact_thresholds() {
        let mut ledger = ledger_with([
            expense(80.0, "Lazer", date(2024, 3, 3)),
            expense(100.0, "Saúde", date(2024, 3, 4)),
        ]);
        ledger.set_budget("Lazer", 100.0);
        ledger.set_budget("Saúde", 100.0);

        let progress = BudgetEngine::new(&ledger).budget_progress(march());
        let status = |name: &str| {
            progress
                .iter()
                .find(|p| p.category == name)
                .map(|p| p.status)
                .unwrap()
        };
        assert_eq!(status("Lazer"), BudgetStatus::Warning);
        assert_eq!(status("Saúde"), BudgetStatus::Exceeded);
    }

    #[test]
    fn test_only_listed_categories_with_budget() {
        let mut ledger = ledger_with([expense(20.0, "Sem Lista", date(2024, 3, 3))]);
        ledger.set_budget("Sem Lista", 50.0);
        ledger.set_budget("Viagens", 200.0);

        let progress = BudgetEngine::new(&ledger).budget_progress(march());
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].category, "Viagens");
        assert_eq!(progress[0].spent, 0.0);
        assert_eq!(progress[0].percentage, 0.0);
        assert_eq!(progress[0].remaining, 200.0);
    }

    #[test]
    fn test_custom_warning_threshold() {
        let mut ledger = ledger_with([expense(60.0, "Lazer", date(2024, 3, 3))]);
        ledger.set_budget("Lazer", 100.0);

        let engine = BudgetEngine::with_config(
            &ledger,
            BudgetConfig {
                warning_percent: 50.0,
            },
        );
        assert_eq!(engine.budget_progress(march())[0].status, BudgetStatus::Warning);
    }

    #[test]
    fn test_percentages_stay_in_range() {
        let mut ledger = ledger_with([expense(10_000.0, "Lazer", date(2024, 3, 3))]);
        ledger.set_budget("Lazer", 1.0);
        ledger.set_budget("Saúde", 1.0);

        for p in BudgetEngine::new(&ledger).budget_progress(march()) {
            assert!((0.0..=100.0).contains(&p.percentage));
        }
    }
}
