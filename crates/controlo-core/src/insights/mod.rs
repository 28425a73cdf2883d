//! Behavioral insights
//!
//! [`InsightEngine`] runs an ordered list of [`InsightRule`]s over the expense
//! history and keeps the first few that have something to say. Message text
//! comes from the locale pack templates.

mod engine;
mod rules;
mod types;

pub use engine::{InsightConfig, InsightContext, InsightEngine, InsightRule};
pub use rules::{BusiestWeekdayRule, TopCategoryRule, TransactionGrowthRule, WeekendShareRule};
pub use types::{Insight, InsightKind};
