//! Domain models for Controlo
//!
//! `Transaction`, `Wallet` and `Categories` are owned by the ledger and use the
//! camelCase field names of the backup file. Everything else in this module is
//! derived: computed per query and never persisted.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amounts stored in the ledger must be finite and strictly positive
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Direction of a transaction; the amount itself is always non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" | "receita" => Ok(Self::Income),
            "expense" | "despesa" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repeat schedule of a recurring template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    /// Next occurrence after `from`. Monthly steps clamp to the last day of
    /// shorter months (Jan 31 -> Feb 28).
    pub fn next_after(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => from.checked_add_days(chrono::Days::new(1)),
            Self::Weekly => from.checked_add_days(chrono::Days::new(7)),
            Self::Biweekly => from.checked_add_days(chrono::Days::new(14)),
            Self::Monthly => from.checked_add_months(chrono::Months::new(1)),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_processed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_transfer: bool,
    /// Template this occurrence was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_recurring_id: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// Input for creating a transaction (id and timestamps are assigned by the ledger)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub wallet_id: Option<String>,
    pub is_transfer: bool,
    pub source_recurring_id: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date,
            note: None,
            is_recurring: false,
            frequency: None,
            wallet_id: None,
            is_transfer: false,
            source_recurring_id: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    /// Mark as a recurring template starting at its own date
    pub fn recurring(mut self, frequency: Frequency) -> Self {
        self.is_recurring = true;
        self.frequency = Some(frequency);
        self
    }
}

impl From<ParsedEntry> for NewTransaction {
    fn from(entry: ParsedEntry) -> Self {
        NewTransaction::new(entry.kind, entry.amount, entry.category, entry.date)
            .with_note(entry.note)
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub kind: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub last_processed: Option<NaiveDate>,
}

/// A wallet (account) that transactions can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A receipt image kept alongside the ledger
///
/// The image itself lives on disk at `image_path`; `content_hash` is the
/// SHA-256 of its bytes and identifies duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub note: String,
    pub image_path: String,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a receipt
#[derive(Debug, Clone, PartialEq)]
pub struct NewReceipt {
    pub image_path: String,
    pub content_hash: String,
    pub date: NaiveDate,
    pub transaction_id: Option<String>,
    pub note: String,
}

impl NewReceipt {
    pub fn new(
        image_path: impl Into<String>,
        content_hash: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            content_hash: content_hash.into(),
            date,
            transaction_id: None,
            note: String::new(),
        }
    }

    pub fn with_transaction(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Category names per transaction type, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub income: Vec<String>,
    pub expense: Vec<String>,
}

impl Categories {
    pub fn of(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    pub fn of_mut(&mut self, kind: TransactionType) -> &mut Vec<String> {
        match kind {
            TransactionType::Income => &mut self.income,
            TransactionType::Expense => &mut self.expense,
        }
    }
}

/// Earliest year a [`Period`] can name
pub const MIN_YEAR: i32 = 1;

/// Latest year a [`Period`] can name
pub const MAX_YEAR: i32 = 9999;

/// A calendar month (month is 1-12, chrono convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Returns `None` unless `month` is within 1-12 and `year` within
    /// [`MIN_YEAR`]..=[`MAX_YEAR`]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        ((MIN_YEAR..=MAX_YEAR).contains(&year) && (1..=12).contains(&month))
            .then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by a signed number of months, rolling over year boundaries.
    /// Saturates at the first and last supported months.
    pub fn offset(&self, months: i32) -> Self {
        let first = i64::from(MIN_YEAR) * 12;
        let last = i64::from(MAX_YEAR) * 12 + 11;
        let index = (i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months))
            .clamp(first, last);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("Day 1 always valid")
    }

    pub fn days_in_month(&self) -> u32 {
        (self.next().first_day() - self.first_day()).num_days() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    /// Parses `YYYY-MM`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid period (use YYYY-MM): {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in period: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in period: {}", s))?;
        Period::new(year, month).ok_or_else(|| format!("Period out of range: {}", s))
    }
}

/// Income, expense and balance of one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Total per category for one type and month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
}

/// One point of the six-month chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

/// Whether a metric moved in the favorable direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub current: f64,
    pub previous: f64,
    /// Percent change vs previous month
    pub change: f64,
    pub trend: Trend,
}

/// Month-over-month comparison of the three headline metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyComparison {
    pub income: MetricComparison,
    pub expense: MetricComparison,
    pub balance: MetricComparison,
}

/// The largest single expense of a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopExpense {
    pub category: String,
    pub amount: f64,
    pub note: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    /// Capped at 100
    pub percentage: f64,
    /// Floored at 0
    pub remaining: f64,
    pub status: BudgetStatus,
}

/// Draft transaction produced by the quick-entry parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
}

/// Balance of a wallet or any other transaction subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}
