//! Budget CLI commands

use clap::Subcommand;
use tracing::warn;

use super::{parse_amount, Session};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::display::format_budget_progress;
use crate::models::validate_budget_amount;
use crate::reports::BudgetOverview;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show budgets with spending progress
    #[command(alias = "overview")]
    Show,

    /// Set the budget for a category
    Set {
        /// Category name
        category: String,
        /// Amount (e.g., "600" or "600.00")
        amount: String,
    },

    /// Reset every budget to zero
    Reset,

    /// Replace budgets with AI suggestions
    Suggest,
}

/// Handle a budget command
pub async fn handle_budget_command(session: &Session, cmd: BudgetCommands) -> BudgetwiseResult<()> {
    match cmd {
        BudgetCommands::Show => {
            let overview = BudgetOverview::generate(&session.store.budgets()?, &session.store.transactions()?);
            println!("Budgets");
            print!("{}", format_budget_progress(&overview.rows, &session.settings));
            println!(
                "\nTotal budgeted: {}   Total spent: {}",
                overview.total_budgeted.format_with_symbol(&session.settings.currency_symbol),
                overview.total_spent.format_with_symbol(&session.settings.currency_symbol)
            );
        }

        BudgetCommands::Set { category, amount } => {
            let amount = parse_amount(&amount)?;
            validate_budget_amount(amount).map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

            if session.store.update_budget(&category, amount)? {
                println!(
                    "Budget for {} set to {}",
                    category,
                    amount.format_with_symbol(&session.settings.currency_symbol)
                );
            } else {
                println!("{}. Nothing changed.", BudgetwiseError::category_not_found(category));
            }
        }

        BudgetCommands::Reset => {
            session.store.reset_budgets()?;
            println!("All budgets reset to zero.");
        }

        BudgetCommands::Suggest => match session.reconciler.reconcile(&session.store).await {
            Ok(outcome) => {
                println!("Updated {} budget(s).", outcome.applied.len());
                if !outcome.retained.is_empty() {
                    println!("Unchanged: {}", outcome.retained.join(", "));
                }
                if !outcome.ignored.is_empty() {
                    println!("Ignored unknown categories: {}", outcome.ignored.join(", "));
                }
            }
            Err(BudgetwiseError::Busy) => {
                println!("Budget suggestions are already being generated.");
            }
            // The reconciler has already queued a notification for the user
            Err(e) if e.is_provider_failure() => warn!(error = %e, "budget suggestion failed"),
            Err(e) => return Err(e),
        },
    }

    Ok(())
}
