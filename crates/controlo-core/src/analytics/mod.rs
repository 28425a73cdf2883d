//! Read-only reporting over a [`TransactionStore`](crate::store::TransactionStore)
//!
//! - [`AggregationEngine`]: monthly totals, category breakdown, trend series,
//!   month-over-month comparison and projections
//! - [`BudgetEngine`]: spending against per-category budgets

mod aggregation;
mod budget;

pub use aggregation::{percent_change, AggregationEngine};
pub use budget::{BudgetConfig, BudgetEngine};
