//! YAML session snapshots
//!
//! Same structure as the JSON snapshot, with a comment header.

use std::io::Write;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::export::json::SessionExport;
use crate::store::FinanceStore;

/// Export the session to YAML format
pub fn export_session_yaml<W: Write>(store: &FinanceStore, writer: &mut W) -> BudgetwiseResult<()> {
    let export = SessionExport::from_store(store)?;
    let err = |e: std::io::Error| BudgetwiseError::Export(e.to_string());

    writeln!(writer, "# BudgetWise Session Export").map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(err)?;
    writeln!(writer, "#").map_err(err)?;
    writeln!(writer, "# Pass this file to --seed to start a session from it.").map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML snapshot
pub fn import_from_yaml(yaml_str: &str) -> BudgetwiseResult<SessionExport> {
    let export: SessionExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BudgetwiseError::Import(e.to_string()))?;

    export.validate().map_err(BudgetwiseError::Import)?;

    Ok(export)
}
