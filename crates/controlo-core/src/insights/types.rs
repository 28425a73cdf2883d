//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of behavioral insight, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Weekday with the highest mean expense
    BusiestWeekday,
    /// Category with the largest share of spending
    TopCategory,
    /// Share of spending that falls on Saturday and Sunday
    WeekendShare,
    /// More transactions this month than last
    TransactionGrowth,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::BusiestWeekday => "busiest_weekday",
            InsightKind::TopCategory => "top_category",
            InsightKind::WeekendShare => "weekend_share",
            InsightKind::TransactionGrowth => "transaction_growth",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "busiest_weekday" => Ok(InsightKind::BusiestWeekday),
            "top_category" => Ok(InsightKind::TopCategory),
            "weekend_share" => Ok(InsightKind::WeekendShare),
            "transaction_growth" => Ok(InsightKind::TransactionGrowth),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A short observation about spending habits, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub icon: String,
    /// Headline (e.g., "Seu dia mais gastador é Sábado")
    pub text: String,
    /// Supporting figure (e.g., "Média de 1 250,00 $ por sábado")
    pub detail: String,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        icon: impl Into<String>,
        text: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            icon: icon.into(),
            text: text.into(),
            detail: detail.into(),
        }
    }
}
