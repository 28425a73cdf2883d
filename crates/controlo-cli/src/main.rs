//! Controlo CLI - Personal finance tracker
//!
//! Usage:
//!   controlo init                              Create the ledger file
//!   controlo quick "Gastei 50 em almoço" --save  Record a free-text entry
//!   controlo summary                           This month at a glance
//!   controlo insights                          Behavioral insights
//!   controlo receipts add talao.jpg -t <id>    Keep a receipt with a transaction

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let data = cli.data.as_path();
    let locale_path = cli.locale.as_deref();

    match cli.command {
        Commands::Init => commands::cmd_init(data),
        Commands::Add {
            kind,
            amount,
            category,
            date,
            note,
            wallet,
            recurring,
        } => {
            let mut ledger = commands::open_ledger(data)?;
            let opts = commands::AddOptions {
                date: date.as_deref(),
                note: note.as_deref(),
                wallet: wallet.as_deref(),
                recurring: recurring.as_deref(),
            };
            commands::cmd_add(&mut ledger, &kind, amount, &category, opts)?;
            commands::save(&ledger, data)
        }
        Commands::Quick { text, save } => {
            let mut ledger = commands::open_ledger(data)?;
            let locale = commands::load_locale(locale_path)?;
            commands::cmd_quick(&mut ledger, &locale, &text, save)?;
            if save {
                commands::save(&ledger, data)?;
            }
            Ok(())
        }
        Commands::List { month, limit } => {
            let ledger = commands::open_ledger(data)?;
            let period = month
                .as_deref()
                .map(|m| commands::parse_period(Some(m)))
                .transpose()?;
            commands::cmd_list(&ledger, period, limit)
        }
        Commands::Edit {
            id,
            amount,
            category,
            date,
            note,
        } => {
            let mut ledger = commands::open_ledger(data)?;
            commands::cmd_edit(
                &mut ledger,
                &id,
                amount,
                category.as_deref(),
                date.as_deref(),
                note.as_deref(),
            )?;
            commands::save(&ledger, data)
        }
        Commands::Delete { id } => {
            let mut ledger = commands::open_ledger(data)?;
            commands::cmd_delete(&mut ledger, &id)?;
            commands::save(&ledger, data)
        }
        Commands::Summary { month } => {
            let ledger = commands::open_ledger(data)?;
            let locale = commands::load_locale(locale_path)?;
            let period = commands::parse_period(month.as_deref())?;
            commands::cmd_summary(&ledger, &locale, period)
        }
        Commands::Categories { action } => match action {
            None | Some(CategoriesAction::List) => {
                let ledger = commands::open_ledger(data)?;
                commands::cmd_categories_list(&ledger)
            }
            Some(CategoriesAction::Add { kind, name }) => {
                let mut ledger = commands::open_ledger(data)?;
                commands::cmd_categories_add(&mut ledger, &kind, &name)?;
                commands::save(&ledger, data)
            }
            Some(CategoriesAction::Remove { kind, name }) => {
                let mut ledger = commands::open_ledger(data)?;
                commands::cmd_categories_remove(&mut ledger, &kind, &name)?;
                commands::save(&ledger, data)
            }
        },
        Commands::Trend => {
            let ledger = commands::open_ledger(data)?;
            let locale = commands::load_locale(locale_path)?;
            commands::cmd_trend(&ledger, &locale)
        }
        Commands::Budget { action } => match action {
            None => {
                let ledger = commands::open_ledger(data)?;
                commands::cmd_budget_list(&ledger, commands::parse_period(None)?)
            }
            Some(BudgetAction::List { month }) => {
                let ledger = commands::open_ledger(data)?;
                let period = commands::parse_period(month.as_deref())?;
                commands::cmd_budget_list(&ledger, period)
            }
            Some(BudgetAction::Set { category, amount }) => {
                let mut ledger = commands::open_ledger(data)?;
                commands::cmd_budget_set(&mut ledger, &category, amount)?;
                commands::save(&ledger, data)
            }
            Some(BudgetAction::Remove { category }) => {
                let mut ledger = commands::open_ledger(data)?;
                commands::cmd_budget_remove(&mut ledger, &category)?;
                commands::save(&ledger, data)
            }
        },
        Commands::Insights => {
            let ledger = commands::open_ledger(data)?;
            let locale = commands::load_locale(locale_path)?;
            commands::cmd_insights(&ledger, &locale)
        }
        Commands::Predict { note } => {
            let ledger = commands::open_ledger(data)?;
            commands::cmd_predict(&ledger, &note)
        }
        Commands::Anomaly { amount, category } => {
            let ledger = commands::open_ledger(data)?;
            commands::cmd_anomaly(&ledger, amount, &category)
        }
        Commands::Recurring => {
            let mut ledger = commands::open_ledger(data)?;
            commands::cmd_recurring(&mut ledger)?;
            commands::save(&ledger, data)
        }
        Commands::Wallets { action } => {
            let mut ledger = commands::open_ledger(data)?;
            match action {
                None | Some(WalletsAction::List) => return commands::cmd_wallets_list(&ledger),
                Some(WalletsAction::Add { name, icon, color }) => {
                    commands::cmd_wallets_add(&mut ledger, &name, icon.as_deref(), color.as_deref())?
                }
                Some(WalletsAction::Edit {
                    id,
                    name,
                    icon,
                    color,
                }) => commands::cmd_wallets_edit(
                    &mut ledger,
                    &id,
                    name.as_deref(),
                    icon.as_deref(),
                    color.as_deref(),
                )?,
                Some(WalletsAction::Delete { id }) => commands::cmd_wallets_delete(&mut ledger, &id)?,
                Some(WalletsAction::Use { id }) => commands::cmd_wallets_use(&mut ledger, &id)?,
                Some(WalletsAction::Transfer {
                    from,
                    to,
                    amount,
                    note,
                }) => commands::cmd_wallets_transfer(&mut ledger, &from, &to, amount, note.as_deref())?,
            }
            commands::save(&ledger, data)
        }
        Commands::Receipts { action } => {
            let mut ledger = commands::open_ledger(data)?;
            match action {
                None => return commands::cmd_receipts_list(&ledger, None, None),
                Some(ReceiptsAction::List { month, transaction }) => {
                    let period = month
                        .as_deref()
                        .map(|m| commands::parse_period(Some(m)))
                        .transpose()?;
                    return commands::cmd_receipts_list(&ledger, period, transaction.as_deref());
                }
                Some(ReceiptsAction::Add {
                    file,
                    date,
                    transaction,
                    note,
                }) => commands::cmd_receipts_add(
                    &mut ledger,
                    data,
                    &file,
                    commands::ReceiptOptions {
                        date: date.as_deref(),
                        transaction: transaction.as_deref(),
                        note: note.as_deref(),
                    },
                )?,
                Some(ReceiptsAction::Link {
                    receipt_id,
                    transaction_id,
                }) => commands::cmd_receipts_link(&mut ledger, &receipt_id, &transaction_id)?,
                Some(ReceiptsAction::Delete { id }) => commands::cmd_receipts_delete(&mut ledger, &id)?,
            }
            commands::save(&ledger, data)
        }
        Commands::Export { format } => {
            let ledger = commands::open_ledger(data)?;
            match format {
                ExportFormat::Csv { output } => commands::cmd_export_csv(&ledger, output.as_deref()),
                ExportFormat::Json { output } => {
                    commands::cmd_export_json(&ledger, output.as_deref())
                }
            }
        }
        Commands::Import { file } => {
            let mut ledger = commands::open_ledger(data)?;
            commands::cmd_import(&mut ledger, &file)?;
            commands::save(&ledger, data)
        }
        Commands::Convert { amount, to_cve } => commands::cmd_convert(amount, to_cve),
    }
}
