//! Unusually large expense detection

use serde::{Deserialize, Serialize};

use crate::models::{is_valid_amount, TransactionType};
use crate::store::TransactionStore;

/// Thresholds for anomaly detection
#[derive(Debug, Clone)]
pub struct AnomalyConfig {
    /// Past expenses needed in a category before it is judged
    pub min_history: usize,
    /// Amounts above `average * threshold_ratio` are flagged
    pub threshold_ratio: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            min_history: 5,
            threshold_ratio: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub is_anomaly: bool,
    /// Mean of the category's past expenses
    pub avg: f64,
    /// How far above the mean, in whole percent
    pub diff_percent: i64,
}

pub struct AnomalyDetector<'a> {
    store: &'a dyn TransactionStore,
    config: AnomalyConfig,
}

impl<'a> AnomalyDetector<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self::with_config(store, AnomalyConfig::default())
    }

    pub fn with_config(store: &'a dyn TransactionStore, config: AnomalyConfig) -> Self {
        Self { store, config }
    }

    /// Flag `amount` when it is well above what is usually spent in
    /// `category`. Only expenses are checked.
    pub fn check(&self, amount: f64, category: &str, kind: TransactionType) -> Option<Anomaly> {
        if kind != TransactionType::Expense || !is_valid_amount(amount) || category.is_empty() {
            return None;
        }

        let history: Vec<f64> = self
            .store
            .expenses()
            .into_iter()
            .filter(|t| t.category == category)
            .map(|t| t.amount)
            .collect();

        if history.len() < self.config.min_history {
            return None;
        }

        let avg = history.iter().sum::<f64>() / history.len() as f64;
        if avg <= 0.0 || amount <= avg * self.config.threshold_ratio {
            return None;
        }

        let diff_percent = ((amount - avg) / avg * 100.0).round() as i64;
        tracing::debug!(
            category,
            amount,
            avg,
            diff_percent,
            "Expense above category average"
        );

        Some(Anomaly {
            is_anomaly: true,
            avg,
            diff_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::test_utils::{date, expense, income, ledger_with};

    fn food_history() -> Ledger {
        ledger_with(
            [50.0, 50.0, 50.0, 50.0, 150.0]
                .into_iter()
                .enumerate()
                .map(|(i, amount)| expense(amount, "Food", date(2024, 3, i as u32 + 1))),
        )
    }

    #[test]
    fn test_flags_large_expense() {
        let ledger = food_history();
        let detector = AnomalyDetector::new(&ledger);

        let anomaly = detector
            .check(150.0, "Food", TransactionType::Expense)
            .unwrap();
        assert!(anomaly.is_anomaly);
        assert_eq!(anomaly.avg, 70.0);
        assert_eq!(anomaly.diff_percent, 114);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let ledger = food_history();
        let detector = AnomalyDetector::new(&ledger);

        // 1.5 x 70 = 105
        assert!(detector.check(105.0, "Food", TransactionType::Expense).is_none());
        assert!(detector.check(105.5, "Food", TransactionType::Expense).is_some());
    }

    #[test]
    fn test_needs_history() {
        let ledger = ledger_with([
            expense(10.0, "Food", date(2024, 3, 1)),
            expense(10.0, "Food", date(2024, 3, 2)),
            expense(10.0, "Food", date(2024, 3, 3)),
            expense(10.0, "Food", date(2024, 3, 4)),
            // Income in the same category is not history
            income(10.0, "Food", date(2024, 3, 5)),
        ]);
        let detector = AnomalyDetector::new(&ledger);
        assert!(detector.check(1000.0, "Food", TransactionType::Expense).is_none());
    }

    #[test]
    fn test_ignores_income_and_missing_input() {
        let ledger = food_history();
        let detector = AnomalyDetector::new(&ledger);

        assert!(detector.check(1000.0, "Food", TransactionType::Income).is_none());
        assert!(detector.check(0.0, "Food", TransactionType::Expense).is_none());
        assert!(detector.check(1000.0, "", TransactionType::Expense).is_none());
        assert!(detector.check(f64::NAN, "Food", TransactionType::Expense).is_none());
        assert!(detector.check(f64::INFINITY, "Food", TransactionType::Expense).is_none());
        assert!(detector.check(1000.0, "Lazer", TransactionType::Expense).is_none());
    }

    #[test]
    fn test_custom_config() {
        let ledger = ledger_with([
            expense(10.0, "Food", date(2024, 3, 1)),
            expense(10.0, "Food", date(2024, 3, 2)),
        ]);
        let detector = AnomalyDetector::with_config(
            &ledger,
            AnomalyConfig {
                min_history: 2,
                threshold_ratio: 3.0,
            },
        );
        assert!(detector.check(25.0, "Food", TransactionType::Expense).is_none());
        let anomaly = detector.check(40.0, "Food", TransactionType::Expense).unwrap();
        assert_eq!(anomaly.diff_percent, 300);
    }
}
