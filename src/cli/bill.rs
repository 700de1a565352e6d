//! Bill reminder CLI commands

use chrono::Utc;
use clap::Subcommand;

use super::{parse_amount, parse_date, Session};
use crate::display::format_bill_schedule;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::NewBill;
use crate::reports::bill_schedule;

/// Bill subcommands
#[derive(Subcommand, Debug)]
pub enum BillCommands {
    /// Add a bill reminder
    Add {
        /// Bill name (e.g., "Internet")
        name: String,
        /// Amount
        amount: String,
        /// Due date (YYYY-MM-DD)
        due: String,
    },

    /// List upcoming and paid bills
    #[command(alias = "ls")]
    List,

    /// Mark a bill as paid
    Pay {
        /// Bill ID (or prefix)
        bill: String,
    },

    /// Mark a bill as unpaid
    Unpay {
        /// Bill ID (or prefix)
        bill: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(session: &Session, cmd: BillCommands) -> BudgetwiseResult<()> {
    match cmd {
        BillCommands::Add { name, amount, due } => {
            let input = NewBill::new(name, parse_amount(&amount)?, parse_date(&due)?);
            input
                .validate()
                .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

            let bill = session.store.add_bill(input)?;
            println!("Added bill: {} [{}]", bill.name, bill.id);
        }

        BillCommands::List => {
            let schedule = bill_schedule(&session.store.bills()?);
            print!("{}", format_bill_schedule(&schedule, &session.settings, Utc::now()));
        }

        BillCommands::Pay { bill } => set_paid(session, &bill, true)?,
        BillCommands::Unpay { bill } => set_paid(session, &bill, false)?,
    }

    Ok(())
}

fn set_paid(session: &Session, identifier: &str, paid: bool) -> BudgetwiseResult<()> {
    match session.store.find_bill(identifier)? {
        Some(bill) => {
            session.store.set_bill_paid(bill.id, paid)?;
            let status = if paid { "paid" } else { "unpaid" };
            println!("Marked {} as {}.", bill.name, status);
        }
        None => println!("{}. Nothing changed.", BudgetwiseError::bill_not_found(identifier)),
    }
    Ok(())
}
