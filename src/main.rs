use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use budgetwise::cli::{dispatch, run_shell, Commands, Session};
use budgetwise::config::{BudgetwisePaths, Settings};
use budgetwise::export::load_seed_file;
use budgetwise::store::SeedData;

#[derive(Parser)]
#[command(
    name = "budgetwise",
    version,
    about = "Personal finance tracker with budgets, bill reminders and AI budget suggestions",
    long_about = "BudgetWise tracks income and expenses against per-category budgets, \
                  keeps bill reminders, logs one-tap quick expenses and asks an AI \
                  prompt service for budget suggestions and spending summaries. \
                  Financial data lives only in memory for the length of a session."
)]
struct Cli {
    /// Start the session from a JSON or YAML snapshot
    #[arg(long, global = true, env = "BUDGETWISE_SEED")]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let seed = match &cli.seed {
        Some(path) => load_seed_file(path)?,
        None => SeedData::default(),
    };
    let session = Session::new(paths, settings, seed)?;

    match cli.command {
        Some(Commands::Shell) => {
            run_shell(&session, BufReader::new(tokio::io::stdin())).await?;
        }
        Some(command) => {
            dispatch(&session, command).await?;
            session.print_notifications()?;
        }
        None => {
            println!("BudgetWise - personal finance tracker");
            println!();
            println!("Run 'budgetwise --help' for usage information.");
            println!("Run 'budgetwise shell' for an interactive session.");
        }
    }

    Ok(())
}
