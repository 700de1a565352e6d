//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use super::Session;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::export::{export_session_json, export_session_yaml, report_filename, write_report_csv};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Income, expense and budget report as CSV
    Csv {
        /// Output file or directory (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Full session snapshot as JSON (usable with --seed)
    Json {
        /// Output file or directory (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Full session snapshot as YAML (usable with --seed)
    Yaml {
        /// Output file or directory (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> BudgetwiseResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        ExportCommands::Csv { output } => {
            let transactions = session.store.transactions()?;
            let budgets = session.store.budgets()?;
            write_to(output.as_deref(), &report_filename(today), |mut writer| {
                write_report_csv(&transactions, &budgets, &session.settings.date_format, &mut writer)
            })
        }
        ExportCommands::Json { output, compact } => {
            let default_name = format!("budgetwise_session_{}.json", today.format("%Y-%m-%d"));
            write_to(output.as_deref(), &default_name, |mut writer| {
                export_session_json(&session.store, &mut writer, !compact)?;
                writeln!(writer).map_err(|e| BudgetwiseError::Export(e.to_string()))
            })
        }
        ExportCommands::Yaml { output } => {
            let default_name = format!("budgetwise_session_{}.yaml", today.format("%Y-%m-%d"));
            write_to(output.as_deref(), &default_name, |mut writer| {
                export_session_yaml(&session.store, &mut writer)
            })
        }
    }
}

/// Run `write` against stdout, a file, or `default_name` inside a directory
fn write_to<F>(output: Option<&Path>, default_name: &str, write: F) -> BudgetwiseResult<()>
where
    F: FnOnce(&mut dyn Write) -> BudgetwiseResult<()>,
{
    let Some(output) = output else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        write(&mut lock)?;
        return lock.flush().map_err(|e| BudgetwiseError::Export(e.to_string()));
    };

    let path = if output.is_dir() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    };

    let file = File::create(&path).map_err(|e| {
        BudgetwiseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer
        .flush()
        .map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    println!("Exported to: {}", path.display());
    Ok(())
}
