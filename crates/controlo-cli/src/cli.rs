//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Controlo - Personal finance tracking with smart quick entry
#[derive(Parser)]
#[command(name = "controlo")]
#[command(about = "Personal finance tracker with insights and budgets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger file (JSON backup format)
    #[arg(long, env = "CONTROLO_DATA", default_value = "controlo.json", global = true)]
    pub data: PathBuf,

    /// Locale pack overriding the built-in keywords and messages
    #[arg(long, global = true)]
    pub locale: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the ledger file with default categories
    Init,

    /// Record a transaction
    Add {
        /// income or expense (receita/despesa also accepted)
        #[arg(value_name = "TYPE")]
        kind: String,

        /// Amount in escudos
        amount: f64,

        /// Category name
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,

        /// Wallet id (defaults to the active wallet)
        #[arg(short, long)]
        wallet: Option<String>,

        /// Repeat: daily, weekly, biweekly, monthly
        #[arg(short, long)]
        recurring: Option<String>,
    },

    /// Parse a free-text entry such as "Gastei 50 em almoço ontem"
    Quick {
        /// Text to parse
        text: String,

        /// Record the parsed entry instead of only previewing it
        #[arg(long)]
        save: bool,
    },

    /// List transactions, newest first
    List {
        /// Month to show (YYYY-MM, defaults to all)
        #[arg(short, long)]
        month: Option<String>,

        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Edit a transaction
    Edit {
        /// Transaction id
        id: String,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id
        id: String,
    },

    /// Monthly summary: totals, comparison, top expense and projection
    Summary {
        /// Month to summarize (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Manage categories (list, add, remove)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Income and expense over the last six months
    Trend,

    /// Manage budgets (list, set, remove)
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Behavioral insights about your spending
    Insights,

    /// Predict a category from a note
    Predict {
        /// Note text
        note: String,
    },

    /// Check whether an expense is unusually large for its category
    Anomaly {
        amount: f64,
        category: String,
    },

    /// Generate due recurring transactions and list templates
    Recurring,

    /// Manage wallets (list, add, edit, delete, use, transfer)
    Wallets {
        #[command(subcommand)]
        action: Option<WalletsAction>,
    },

    /// Manage receipt images (list, add, link, delete)
    Receipts {
        #[command(subcommand)]
        action: Option<ReceiptsAction>,
    },

    /// Export the ledger
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },

    /// Restore a JSON backup (replaces all transactions)
    Import {
        /// Backup file
        file: PathBuf,
    },

    /// Convert between escudos and euros
    Convert {
        amount: f64,

        /// Treat the amount as euros and convert to escudos
        #[arg(long)]
        to_cve: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories for both types
    List,

    /// Add a custom category
    Add {
        /// income or expense
        #[arg(value_name = "TYPE")]
        kind: String,
        name: String,
    },

    /// Remove a custom category (built-in ones are kept)
    Remove {
        /// income or expense
        #[arg(value_name = "TYPE")]
        kind: String,
        name: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show budget progress for a month
    List {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a monthly budget for an expense category
    Set { category: String, amount: f64 },

    /// Remove a category budget
    Remove { category: String },
}

#[derive(Subcommand)]
pub enum WalletsAction {
    /// List wallets with balances
    List,

    /// Create a wallet
    Add {
        name: String,

        #[arg(long)]
        icon: Option<String>,

        /// Color (e.g., #27ae60)
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or restyle a wallet
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a wallet (the main wallet is kept)
    Delete { id: String },

    /// Make a wallet the active one
    Use { id: String },

    /// Move money between wallets
    Transfer {
        from: String,
        to: String,
        amount: f64,

        #[arg(short, long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReceiptsAction {
    /// List receipts grouped by month
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Only receipts linked to this transaction
        #[arg(short, long)]
        transaction: Option<String>,
    },

    /// Store a receipt image (copied next to the ledger file)
    Add {
        /// Path to the receipt image
        file: PathBuf,

        /// Receipt date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Transaction ID to link to
        #[arg(short, long)]
        transaction: Option<String>,

        #[arg(short, long)]
        note: Option<String>,
    },

    /// Link a receipt to a transaction
    Link {
        receipt_id: String,
        transaction_id: String,
    },

    /// Delete a receipt and its stored image
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ExportFormat {
    /// Semicolon-separated CSV
    Csv {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Full JSON backup
    Json {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
