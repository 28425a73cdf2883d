//! Quick entry: free text to a draft transaction
//!
//! Keywords come from the [`LocalePack`], so "Gastei 50 em almoço ontem"
//! becomes a 50 expense in Alimentação dated yesterday.

use chrono::{Days, Local, NaiveDate};
use regex::Regex;

use super::CategoryPredictor;
use crate::locale::LocalePack;
use crate::models::{is_valid_amount, ParsedEntry, TransactionType};
use crate::store::TransactionStore;

const MIN_TEXT_CHARS: usize = 3;

pub struct QuickEntryParser<'a> {
    store: &'a dyn TransactionStore,
    locale: &'a LocalePack,
    today: NaiveDate,
    amount_re: Regex,
}

impl<'a> QuickEntryParser<'a> {
    pub fn new(store: &'a dyn TransactionStore, locale: &'a LocalePack) -> Self {
        Self::with_today(store, locale, Local::now().date_naive())
    }

    pub fn with_today(
        store: &'a dyn TransactionStore,
        locale: &'a LocalePack,
        today: NaiveDate,
    ) -> Self {
        // First number, optionally wrapped in a currency symbol: 50, 50€, $50, 12,50
        let amount_re = Regex::new(r"[$€]?\s*([0-9]+[.,]?[0-9]*)\s*[$€]?").expect("valid regex");
        Self {
            store,
            locale,
            today,
            amount_re,
        }
    }

    /// Draft entry for `text`, or `None` when no amount can be found
    pub fn parse(&self, text: &str) -> Option<ParsedEntry> {
        if text.chars().count() < MIN_TEXT_CHARS {
            return None;
        }

        let amount = self.extract_amount(text)?;

        let kind = if self.locale.income_pattern().is_match(text) {
            TransactionType::Income
        } else {
            TransactionType::Expense
        };

        let category = self.detect_category(text);

        Some(ParsedEntry {
            kind,
            amount,
            category,
            note: text.trim().to_string(),
            date: self.detect_date(text),
        })
    }

    fn extract_amount(&self, text: &str) -> Option<f64> {
        let raw = self.amount_re.captures(text)?.get(1)?.as_str();
        let amount: f64 = raw.replacen(',', ".", 1).trim_end_matches('.').parse().ok()?;
        is_valid_amount(amount).then_some(amount)
    }

    /// "yesterday" is checked before "day before yesterday"
    fn detect_date(&self, text: &str) -> NaiveDate {
        let days_back = if self.locale.yesterday_pattern().is_match(text) {
            1
        } else if self.locale.day_before_yesterday_pattern().is_match(text) {
            2
        } else {
            0
        };
        self.today
            .checked_sub_days(Days::new(days_back))
            .unwrap_or(self.today)
    }

    fn detect_category(&self, text: &str) -> String {
        if let Some(matched) = self
            .locale
            .category_patterns()
            .iter()
            .find(|p| p.pattern.is_match(text))
        {
            return matched.category.clone();
        }

        if let Some(predicted) = CategoryPredictor::new(self.store).predict(text) {
            tracing::debug!(category = %predicted, "No keyword matched, using predicted category");
            return predicted;
        }

        tracing::debug!(
            category = self.locale.fallback_category(),
            "No keyword or history match, using fallback category"
        );
        self.locale.fallback_category().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::test_utils::{date, expense, ledger_with};

    fn parse_with(ledger: &Ledger, text: &str) -> Option<ParsedEntry> {
        let locale = LocalePack::embedded();
        QuickEntryParser::with_today(ledger, &locale, date(2024, 3, 10)).parse(text)
    }

    #[test]
    fn test_parse_expense_yesterday() {
        let ledger = Ledger::new();
        let entry = parse_with(&ledger, "Gastei 50 em almoço ontem").unwrap();
        assert_eq!(entry.kind, TransactionType::Expense);
        assert_eq!(entry.amount, 50.0);
        assert_eq!(entry.category, "Alimentação");
        assert_eq!(entry.date, date(2024, 3, 9));
        assert_eq!(entry.note, "Gastei 50 em almoço ontem");
    }

    #[test]
    fn test_parse_income() {
        let ledger = Ledger::new();
        let entry = parse_with(&ledger, "Recebi 1200,50€ de salário").unwrap();
        assert_eq!(entry.kind, TransactionType::Income);
        assert_eq!(entry.amount, 1200.5);
        assert_eq!(entry.date, date(2024, 3, 10));
    }

    #[test]
    fn test_parse_day_before_yesterday() {
        let ledger = Ledger::new();
        let entry = parse_with(&ledger, "uber 7.5 anteontem").unwrap();
        assert_eq!(entry.amount, 7.5);
        assert_eq!(entry.category, "Transporte");
        assert_eq!(entry.date, date(2024, 3, 8));
    }

    #[test]
    fn test_keywords_are_word_bounded() {
        let ledger = Ledger::new();
        // "barato" must not match "bar" and "contas" must not match "conta"
        let entry = parse_with(&ledger, "algo barato 12").unwrap();
        assert_eq!(entry.category, "Outros");
    }

    #[test]
    fn test_first_category_table_wins() {
        let ledger = Ledger::new();
        // Both Alimentação (jantar) and Entretenimento (festa) match
        let entry = parse_with(&ledger, "festa com jantar 40").unwrap();
        assert_eq!(entry.category, "Alimentação");
    }

    #[test]
    fn test_falls_back_to_prediction() {
        let ledger = ledger_with([
            expense(20.0, "Lazer", date(2024, 3, 1)).with_note("padel 20"),
        ]);
        let entry = parse_with(&ledger, "padel 20").unwrap();
        assert_eq!(entry.category, "Lazer");
    }

    #[test]
    fn test_rejects_short_or_amountless_text() {
        let ledger = Ledger::new();
        assert!(parse_with(&ledger, "oi").is_none());
        assert!(parse_with(&ledger, "almoço ontem").is_none());
        assert!(parse_with(&ledger, "almoço 0").is_none());
    }

    #[test]
    fn test_rejects_amount_that_overflows() {
        let ledger = Ledger::new();
        let text = format!("almoço {}", "9".repeat(400));
        assert!(parse_with(&ledger, &text).is_none());
    }
}
