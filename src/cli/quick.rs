//! Quick expense CLI commands

use clap::Subcommand;

use super::{parse_amount, Session};
use crate::display::{format_quick_expenses, format_transaction_details};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{QuickExpenseIcon, QuickExpenseSetting};

/// Quick expense subcommands
#[derive(Subcommand, Debug)]
pub enum QuickCommands {
    /// List quick expense templates
    #[command(alias = "ls")]
    List,

    /// Record the expense a template describes
    Log {
        /// Template name or ID
        name: String,
    },

    /// Add a template
    Add {
        /// Name (used as the transaction description)
        name: String,
        /// Amount
        amount: String,
        /// Category
        category: String,
        /// coffee, utensils or bus
        #[arg(short, long, default_value = "coffee")]
        icon: QuickExpenseIcon,
    },

    /// Change fields of a template
    Edit {
        /// Template name or ID
        template: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New icon: coffee, utensils or bus
        #[arg(long)]
        icon: Option<QuickExpenseIcon>,
    },

    /// Delete a template
    #[command(alias = "rm")]
    Remove {
        /// Template name or ID
        template: String,
    },
}

/// Handle a quick expense command
pub fn handle_quick_command(session: &Session, cmd: QuickCommands) -> BudgetwiseResult<()> {
    match cmd {
        QuickCommands::List => {
            print!("{}", format_quick_expenses(&session.store.quick_expenses()?, &session.settings));
        }

        QuickCommands::Log { name } => match session.store.find_quick_expense(&name)? {
            Some(template) => {
                if let Some(txn) = session.store.log_quick_expense(template.id)? {
                    println!("Logged {}:", template.name);
                    print!("{}", format_transaction_details(&txn, &session.settings));
                }
            }
            None => println!(
                "{}. Nothing recorded.",
                BudgetwiseError::quick_expense_not_found(name)
            ),
        },

        QuickCommands::Add {
            name,
            amount,
            category,
            icon,
        } => {
            let template = QuickExpenseSetting::new(name, parse_amount(&amount)?, category, icon);
            template
                .validate()
                .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

            let mut templates = session.store.quick_expenses()?;
            templates.push(template.clone());
            session.store.set_quick_expenses(templates)?;
            println!("Added quick expense: {} [{}]", template.name, template.id);
        }

        QuickCommands::Edit {
            template,
            name,
            amount,
            category,
            icon,
        } => {
            let Some(found) = session.store.find_quick_expense(&template)? else {
                println!(
                    "{}. Nothing changed.",
                    BudgetwiseError::quick_expense_not_found(template)
                );
                return Ok(());
            };

            let mut edited = found.clone();
            if let Some(name) = name {
                edited.name = name;
            }
            if let Some(amount) = amount {
                edited.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                edited.category = category;
            }
            if let Some(icon) = icon {
                edited.icon = icon;
            }
            edited
                .validate()
                .map_err(|e| BudgetwiseError::Validation(e.to_string()))?;

            let templates = session
                .store
                .quick_expenses()?
                .into_iter()
                .map(|q| if q.id == found.id { edited.clone() } else { q })
                .collect();
            session.store.set_quick_expenses(templates)?;
            println!("Updated quick expense:");
            print!("{}", format_quick_expenses(&[edited], &session.settings));
        }

        QuickCommands::Remove { template } => match session.store.find_quick_expense(&template)? {
            Some(found) => {
                let mut templates = session.store.quick_expenses()?;
                templates.retain(|q| q.id != found.id);
                session.store.set_quick_expenses(templates)?;
                println!("Removed quick expense: {}", found.name);
            }
            None => println!(
                "{}. Nothing changed.",
                BudgetwiseError::quick_expense_not_found(template)
            ),
        },
    }

    Ok(())
}
