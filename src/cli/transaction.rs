//! Transaction CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{transaction_table, CurrencyFormat};
use crate::error::{PocketError, PocketResult};
use crate::export::export_transactions_csv;
use crate::models::{TransactionFilter, TransactionType};
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_optional_date, parse_range, write_output};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record income or an expense
    Add {
        /// income or expense
        kind: TransactionType,
        /// Amount (e.g. "150000" or "10.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Only income or only expenses
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        /// Filter by category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Date range: "2025", "2025-11" or "2025-11-01..2025-11-15"
        #[arg(short, long)]
        range: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Number of transactions to skip
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Write CSV to this file instead of printing a table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// New note; an empty string clears it
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PocketResult<()> {
    let service = TransactionService::new(storage);
    let category_service = CategoryService::new(storage);
    let fmt = CurrencyFormat::from_settings(settings);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            note,
        } => {
            let category = category_service.resolve(&category)?;
            let txn = service.create(CreateTransactionInput {
                kind,
                category_id: category.id,
                amount: parse_amount(&amount, settings)?,
                date: parse_date(date.as_deref())?,
                note,
            })?;

            println!("Recorded {} {}", txn.kind, fmt.format(txn.amount));
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date.format(&settings.date_format));
            println!("  Category: {}", category.name);
            if let Some(note) = &txn.note {
                println!("  Note:     {}", note);
            }
        }

        TransactionCommands::List {
            kind,
            category,
            range,
            limit,
            offset,
            output,
        } => {
            let mut filter = TransactionFilter::all().page(limit, offset);
            if let Some(kind) = kind {
                filter = filter.with_kind(kind);
            }
            if let Some(category) = category {
                filter = filter.with_category(category_service.resolve(&category)?.id);
            }
            if range.is_some() {
                filter = filter.with_range(parse_range(range.as_deref())?);
            }

            let transactions = service.list(&filter)?;
            let categories = category_service.list()?;

            match output {
                Some(path) => write_output(Some(&path), |w| {
                    export_transactions_csv(&transactions, &categories, w)
                })?,
                None => println!("{}", transaction_table(&transactions, &categories, &fmt)),
            }
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            date,
            note,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| PocketError::transaction_not_found(&id))?;

            let input = UpdateTransactionInput {
                category_id: category
                    .map(|c| category_service.resolve(&c).map(|c| c.id))
                    .transpose()?,
                amount: amount.as_deref().map(|a| parse_amount(a, settings)).transpose()?,
                date: parse_optional_date(date.as_deref())?,
                note,
            };

            let updated = service.update(txn.id, input)?;
            println!("Updated transaction {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| PocketError::transaction_not_found(&id))?;
            service.delete(txn.id)?;
            println!("Deleted transaction {} ({})", txn.id, fmt.format(txn.amount));
        }
    }

    Ok(())
}
