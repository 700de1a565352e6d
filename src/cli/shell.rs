//! Interactive shell
//!
//! Reads one command per line and runs it against a single session, so
//! mutations accumulate until `exit` or end of input.

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::{dispatch, Commands, Session};
use crate::error::{BudgetwiseError, BudgetwiseResult};

/// A shell line, parsed like the command line minus the binary name
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Split a line into words, honouring single and double quotes
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err("trailing backslash".to_string()),
            },
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => match chars.next() {
                    Some(escaped) => {
                        current.push(escaped);
                        in_word = true;
                    }
                    None => return Err("trailing backslash".to_string()),
                },
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Run the shell until `exit`/`quit` or end of input
pub async fn run_shell<R>(session: &Session, reader: R) -> BudgetwiseResult<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("BudgetWise shell. Type 'help' for commands, 'exit' to quit.");
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BudgetwiseError::Io(e.to_string()))?
    {
        let words = match split_line(&line) {
            Ok(words) => words,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };

        match words.first().map(String::as_str) {
            None => continue,
            Some("exit") | Some("quit") => break,
            _ => {}
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        debug!(command = ?parsed.command, "shell command");
        match parsed.command {
            Commands::Shell => println!("Already in a shell."),
            command => {
                if let Err(e) = dispatch(session, command).await {
                    println!("Error: {}", e);
                }
            }
        }
        session.print_notifications()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{
        BudgetAdvisor, BudgetSuggestionRequest, BudgetSuggestions, SpendingAnalyst, SpendingSummary,
        SpendingSummaryRequest,
    };
    use crate::config::{BudgetwisePaths, Settings};
    use crate::models::{Money, QuickExpenseIcon};
    use crate::store::SeedData;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Offline;

    #[async_trait]
    impl BudgetAdvisor for Offline {
        async fn suggest_budgets(&self, _: &BudgetSuggestionRequest) -> BudgetwiseResult<BudgetSuggestions> {
            Ok([("Groceries".to_string(), 250.0)].into_iter().collect())
        }
    }

    #[async_trait]
    impl SpendingAnalyst for Offline {
        async fn summarize_spending(&self, _: &SpendingSummaryRequest) -> BudgetwiseResult<SpendingSummary> {
            Err(BudgetwiseError::Provider("offline".into()))
        }
    }

    fn session(temp_dir: &TempDir) -> Session {
        let paths = BudgetwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        Session::with_providers(
            paths,
            Settings::default(),
            SeedData::default(),
            Arc::new(Offline),
            Arc::new(Offline),
        )
        .unwrap()
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("transaction add expense 12 Groceries \"Milk, eggs\"").unwrap(),
            vec!["transaction", "add", "expense", "12", "Groceries", "Milk, eggs"]
        );
        assert_eq!(split_line("  bill   pay 'a b' ").unwrap(), vec!["bill", "pay", "a b"]);
        assert_eq!(split_line(r#"say "a \"quoted\" word""#).unwrap(), vec!["say", "a \"quoted\" word"]);
        assert_eq!(split_line(r"one\ word").unwrap(), vec!["one word"]);
        assert_eq!(split_line("quick add ''").unwrap(), vec!["quick", "add", ""]);
        assert!(split_line("\"open").is_err());
        assert!(split_line("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_accumulate_across_lines() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir);
        let input: &[u8] = b"transaction add income 100 Salary Pay\n\
            quick log coffee\n\
            budget set Rent 1500\n\
            not-a-command\n\
            budget suggest\n\
            exit\n\
            transaction add income 999 Salary Ignored\n";

        run_shell(&session, input).await.unwrap();

        let transactions = session.store.transactions().unwrap();
        assert_eq!(transactions.len(), 2);
        let budgets = session.store.budgets().unwrap();
        let amount = |category: &str| budgets.iter().find(|b| b.category == category).unwrap().amount;
        assert_eq!(amount("Rent"), Money::from_units(1500));
        assert_eq!(amount("Groceries"), Money::from_units(250));
        assert!(session.store.drain_notifications().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quick_expense_templates_can_be_edited_and_removed() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir);
        let input: &[u8] = b"quick edit coffee --name Espresso --amount 180 --icon utensils\n\
            quick remove lunch\n\
            quick edit missing --amount 5\n\
            quick log espresso\n";

        run_shell(&session, input).await.unwrap();

        let templates = session.store.quick_expenses().unwrap();
        let names: Vec<&str> = templates.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Espresso", "Bus Fare"]);
        assert_eq!(templates[0].amount, Money::from_units(180));
        assert_eq!(templates[0].icon, QuickExpenseIcon::Utensils);

        let transactions = session.store.transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "Espresso");
        assert_eq!(transactions[0].amount, Money::from_units(180));
    }
}
