//! Transaction CLI commands

use clap::{Subcommand, ValueEnum};

use super::{parse_amount, parse_date_or_now, Session};
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{known_categories, NewTransaction};
use crate::reports::{recent_transactions, transaction_view, SortDirection, SortKey, TransactionFilter, TransactionSort};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// income or expense
        #[arg(value_enum)]
        kind: KindArg,
        /// Amount (e.g., "45.50")
        amount: String,
        /// Category (e.g., "Groceries", "Salary")
        category: String,
        /// Description
        description: String,
        /// Transaction date (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions
    #[command(alias = "ls")]
    List {
        /// all, income or expense
        #[arg(short, long, default_value = "all")]
        filter: TransactionFilter,
        /// date, description, category, amount or kind
        #[arg(short, long, default_value = "date")]
        sort: SortKey,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
    },

    /// Show the most recent transactions
    Recent {
        /// Number of transactions to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(session: &Session, cmd: TransactionCommands) -> BudgetwiseResult<()> {
    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_now(date.as_deref())?;

            let input = match kind {
                KindArg::Income => NewTransaction::income(category, amount, date, description),
                KindArg::Expense => NewTransaction::expense(category, amount, date, description),
            };
            input
                .validate()
                .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

            let txn = session.store.add_transaction(input)?;
            println!("Recorded transaction:");
            print!("{}", format_transaction_details(&txn, &session.settings));

            let known = known_categories(txn.kind);
            if !known.contains(&txn.category.as_str()) {
                println!(
                    "Note: '{}' is not a standard category ({})",
                    txn.category,
                    known.join(", ")
                );
            }
        }

        TransactionCommands::List {
            filter,
            sort,
            direction,
        } => {
            let transactions = session.store.transactions()?;
            let view = transaction_view(
                &transactions,
                filter,
                TransactionSort {
                    key: sort,
                    direction,
                },
            );
            print!("{}", format_transaction_table(&view, &session.settings));
            println!("\n{} of {} transaction(s)", view.len(), transactions.len());
        }

        TransactionCommands::Recent { limit } => {
            let limit = limit.unwrap_or(session.settings.recent_limit);
            let recent = recent_transactions(&session.store.transactions()?, limit);
            println!("Recent Transactions");
            print!("{}", format_transaction_table(&recent, &session.settings));
        }
    }

    Ok(())
}
