//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the session store. The same `Commands` enum drives
//! one-shot invocations and the interactive shell.

pub mod bill;
pub mod budget;
pub mod export;
pub mod quick;
pub mod session;
pub mod shell;
pub mod transaction;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Subcommand;

use crate::display::{format_budget_chart, format_transaction_table};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::Money;
use crate::notification::Notification;
use crate::reports::{budget_rows, recent_transactions, FinancialStats};

pub use bill::{handle_bill_command, BillCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use quick::{handle_quick_command, QuickCommands};
pub use session::Session;
pub use shell::{run_shell, split_line};
pub use transaction::{handle_transaction_command, TransactionCommands};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dashboard: totals, recent transactions and an AI spending summary
    Summary {
        /// Skip the AI spending summary
        #[arg(long)]
        no_ai: bool,
    },

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Bill reminder commands
    #[command(subcommand)]
    Bill(BillCommands),

    /// Quick expense commands
    #[command(subcommand)]
    Quick(QuickCommands),

    /// Export a CSV report or a session snapshot
    #[command(subcommand)]
    Export(ExportCommands),

    /// Reset the session to its starting data
    Reset,

    /// Show current configuration and paths
    Config {
        /// Write the settings file (with defaults for missing fields)
        #[arg(long)]
        init: bool,
    },

    /// Run commands interactively against one session
    Shell,
}

/// Run one command against a session
///
/// `Shell` is handled by the caller.
pub async fn dispatch(session: &Session, command: Commands) -> BudgetwiseResult<()> {
    match command {
        Commands::Summary { no_ai } => handle_summary(session, no_ai).await,
        Commands::Transaction(cmd) => handle_transaction_command(session, cmd),
        Commands::Budget(cmd) => handle_budget_command(session, cmd).await,
        Commands::Bill(cmd) => handle_bill_command(session, cmd),
        Commands::Quick(cmd) => handle_quick_command(session, cmd),
        Commands::Export(cmd) => handle_export_command(session, cmd),
        Commands::Reset => {
            session.store.reset_all()?;
            println!("Session reset.");
            Ok(())
        }
        Commands::Config { init } => handle_config(session, init),
        Commands::Shell => Ok(()),
    }
}

async fn handle_summary(session: &Session, no_ai: bool) -> BudgetwiseResult<()> {
    let settings = &session.settings;
    let transactions = session.store.transactions()?;
    let budgets = session.store.budgets()?;

    println!("BudgetWise Dashboard");
    println!("{}", "=".repeat(32));
    print!(
        "{}",
        FinancialStats::from_transactions(&transactions).format_terminal(&settings.currency_symbol)
    );

    println!("\nBudget vs. Spending");
    print!("{}", format_budget_chart(&budget_rows(&budgets, &transactions), settings));

    println!("\nRecent Transactions");
    print!(
        "{}",
        format_transaction_table(&recent_transactions(&transactions, settings.recent_limit), settings)
    );

    if !no_ai {
        println!("\nAI Spending Summary");
        if session.ai_available {
            println!("{}", session.summarizer.summarize_or_fallback(&session.store).await);
        } else {
            println!("Skipped.");
            session.store.notify(Notification::warning(format!(
                "AI summary needs an API key: set the {} environment variable",
                settings.ai.api_key_env
            )))?;
        }
    }

    Ok(())
}

fn handle_config(session: &Session, init: bool) -> BudgetwiseResult<()> {
    let settings = &session.settings;
    if init {
        settings.save(&session.paths)?;
        println!("Wrote {}", session.paths.settings_file().display());
        println!();
    }

    println!("BudgetWise Configuration");
    println!("========================");
    println!("Config directory: {}", session.paths.base_dir().display());
    if session.paths.is_initialized() {
        println!("Settings file:    {}", session.paths.settings_file().display());
    } else {
        println!(
            "Settings file:    {} (not written, using defaults; run 'config --init')",
            session.paths.settings_file().display()
        );
    }
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Recent limit:    {}", settings.recent_limit);
    println!("  AI endpoint:     {}", settings.ai.endpoint);
    println!("  AI model:        {}", settings.ai.model);
    println!("  API key env var: {}", settings.ai.api_key_env);
    println!("  Fallback ratio:  {}", settings.ai.fallback_ratio);
    match settings.ai.timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }
    Ok(())
}

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> BudgetwiseResult<Money> {
    Money::parse(input).map_err(|e| {
        BudgetwiseError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '45.50' or '100'. Error: {}",
            input, e
        ))
    })
}

/// Parse a YYYY-MM-DD date as midnight UTC
pub(crate) fn parse_date(input: &str) -> BudgetwiseResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetwiseError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

pub(crate) fn parse_date_or_now(input: Option<&str>) -> BudgetwiseResult<DateTime<Utc>> {
    match input {
        Some(input) => parse_date(input),
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("45.50").unwrap(), Money::from_cents(4550));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-01-15").unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), "2025-01-15 00:00");
        assert!(parse_date("15/01/2025").is_err());
    }
}
