//! Insight engine: evaluates rules in order and keeps the first results

use chrono::{Local, NaiveDate};

use crate::locale::LocalePack;
use crate::models::Transaction;
use crate::store::TransactionStore;

use super::types::{Insight, InsightKind};
use super::{BusiestWeekdayRule, TopCategoryRule, TransactionGrowthRule, WeekendShareRule};

/// Limits for insight generation
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Expenses needed before any insight is attempted
    pub min_expenses: usize,
    /// Insights returned at most
    pub max_insights: usize,
    /// Rounded weekend share (percent) that must be exceeded
    pub weekend_share_percent: i64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            min_expenses: 5,
            max_insights: 3,
            weekend_share_percent: 30,
        }
    }
}

/// Data shared by every rule during one evaluation
pub struct InsightContext<'a> {
    pub locale: &'a LocalePack,
    /// Every expense in the store, insertion order
    pub expenses: Vec<&'a Transaction>,
    pub today: NaiveDate,
}

impl<'a> InsightContext<'a> {
    pub fn new(store: &'a dyn TransactionStore, locale: &'a LocalePack) -> Self {
        Self::with_today(store, locale, Local::now().date_naive())
    }

    pub fn with_today(
        store: &'a dyn TransactionStore,
        locale: &'a LocalePack,
        today: NaiveDate,
    ) -> Self {
        Self {
            locale,
            expenses: store.expenses(),
            today,
        }
    }
}

/// A single insight heuristic
pub trait InsightRule {
    fn kind(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// `None` when the rule has nothing to report
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight>;
}

pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    config: InsightConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the built-in rules and default limits
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    pub fn with_config(config: InsightConfig) -> Self {
        let weekend_threshold = config.weekend_share_percent;
        let mut engine = Self::empty(config);

        // Register built-in rules
        engine.register(Box::new(BusiestWeekdayRule));
        engine.register(Box::new(TopCategoryRule));
        engine.register(Box::new(WeekendShareRule::new(weekend_threshold)));
        engine.register(Box::new(TransactionGrowthRule));

        engine
    }

    /// Engine with no rules registered
    pub fn empty(config: InsightConfig) -> Self {
        Self {
            rules: vec![],
            config,
        }
    }

    /// Append a rule; rules run in registration order
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_kinds(&self) -> Vec<InsightKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Run rules in order until `max_insights` have been produced
    pub fn generate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        if ctx.expenses.len() < self.config.min_expenses {
            tracing::debug!(
                expenses = ctx.expenses.len(),
                required = self.config.min_expenses,
                "Not enough expenses for insights"
            );
            return vec![];
        }

        let mut insights = Vec::with_capacity(self.config.max_insights);
        for rule in &self.rules {
            if insights.len() >= self.config.max_insights {
                break;
            }
            match rule.evaluate(ctx) {
                Some(insight) => {
                    tracing::debug!(rule = rule.kind().as_str(), "Insight produced");
                    insights.push(insight);
                }
                None => {
                    tracing::debug!(rule = rule.kind().as_str(), "Insight rule skipped");
                }
            }
        }

        insights
    }
}
