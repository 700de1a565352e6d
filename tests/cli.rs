use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budgetwise(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetwise").unwrap();
    cmd.env("BUDGETWISE_CONFIG_DIR", config_dir.path())
        .env_remove("BUDGETWISE_AI_API_KEY")
        .env_remove("BUDGETWISE_SEED")
        .env_remove("RUST_LOG");
    cmd
}

const SEED: &str = r#"{
  "transactions": [
    {"id": "0b6f1f2e-8a51-4c57-9d2a-1f6c0f8e4d11", "kind": "income", "category": "Salary",
     "amount": 500000, "date": "2025-01-01T00:00:00Z", "description": "January pay"},
    {"id": "5d1c7b0a-3e2f-4a9b-8c6d-2e7f1a0b9c22", "kind": "expense", "category": "Groceries",
     "amount": 3550, "date": "2025-01-03T00:00:00Z", "description": "Milk, eggs"}
  ],
  "budgets": [
    {"category": "Groceries", "amount": 60000},
    {"category": "Rent", "amount": 150000}
  ],
  "bills": [
    {"id": "9a8b7c6d-5e4f-4321-9abc-def012345678", "name": "Internet", "amount": 4500,
     "due_date": "2025-01-20T00:00:00Z", "paid": false}
  ]
}"#;

#[test]
fn test_help_lists_commands() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transaction"))
        .stdout(predicate::str::contains("budget"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_config_init_writes_settings() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fallback ratio:  0.8"));

    let written = fs::read_to_string(config_dir.path().join("config.json")).unwrap();
    assert!(written.contains("\"fallback_ratio\": 0.8"));
}

#[test]
fn test_export_csv_from_seed() {
    let config_dir = TempDir::new().unwrap();
    let seed = config_dir.path().join("seed.json");
    fs::write(&seed, SEED).unwrap();
    let out = config_dir.path().join("report.csv");

    budgetwise(&config_dir)
        .arg("--seed")
        .arg(&seed)
        .args(["export", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Income Report\n"));
    assert!(csv.contains("2025-01-03,\"Milk, eggs\",Groceries,35.50"));
    assert!(csv.contains("Groceries,600.00,35.50,564.50"));
    assert!(csv.contains("Rent,1500.00,0.00,1500.00"));
}

#[test]
fn test_summary_without_ai() {
    let config_dir = TempDir::new().unwrap();
    let seed = config_dir.path().join("seed.json");
    fs::write(&seed, SEED).unwrap();

    budgetwise(&config_dir)
        .arg("--seed")
        .arg(&seed)
        .args(["summary", "--no-ai"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹5000.00"))
        .stdout(predicate::str::contains("Milk, eggs"))
        .stdout(predicate::str::contains("AI Spending Summary").not());
}

#[test]
fn test_invalid_transaction_is_rejected() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .args(["transaction", "add", "expense", "0", "Groceries", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));
}

#[test]
fn test_suggest_without_api_key_keeps_budgets() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .arg("shell")
        .write_stdin("budget set Rent 1500\nbudget suggest\nbudget show\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Could not generate AI budget suggestions. Please try again later.",
        ))
        .stdout(predicate::str::contains("₹1500.00"));
}

#[test]
fn test_shell_keeps_state_between_commands() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .arg("shell")
        .write_stdin(
            "transaction add income 100 Salary \"Side job\"\n\
             bill add Water 20 2025-06-01\n\
             transaction list --filter income\n\
             bill pay nonexistent\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Side job"))
        .stdout(predicate::str::contains("1 of 1 transaction(s)"))
        .stdout(predicate::str::contains("Bill not found: nonexistent. Nothing changed."));
}

#[test]
fn test_duplicate_seed_budgets_rejected() {
    let config_dir = TempDir::new().unwrap();
    let seed = config_dir.path().join("seed.yaml");
    fs::write(
        &seed,
        "budgets:\n  - category: Rent\n    amount: 100\n  - category: Rent\n    amount: 200\n",
    )
    .unwrap();

    budgetwise(&config_dir)
        .arg("--seed")
        .arg(&seed)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate budget category"));
}

#[test]
fn test_quick_expense_edit_and_remove() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .arg("shell")
        .write_stdin(
            "quick edit lunch --amount 275 --category Entertainment\n\
             quick remove \"bus fare\"\n\
             quick remove bus-fare\n\
             quick log \"Bus Fare\"\n\
             quick list\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated quick expense:"))
        .stdout(predicate::str::contains("₹275.00"))
        .stdout(predicate::str::contains("Removed quick expense: Bus Fare"))
        .stdout(predicate::str::contains(
            "Quick expense not found: bus-fare. Nothing changed.",
        ))
        .stdout(predicate::str::contains(
            "Quick expense not found: Bus Fare. Nothing recorded.",
        ))
        .stdout(predicate::str::contains("Entertainment"));
}

#[test]
fn test_quick_edit_rejects_invalid_amount() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .args(["quick", "edit", "coffee", "--amount", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));
}

#[test]
fn test_oversized_amount_is_a_validation_error() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .args(["budget", "set", "Rent", "100000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount too large"));
}

#[test]
fn test_summary_without_api_key_skips_ai_with_warning() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI Spending Summary\nSkipped."))
        .stdout(predicate::str::contains(
            "[!] Warning: AI summary needs an API key: set the BUDGETWISE_AI_API_KEY environment variable",
        ));
}

#[test]
fn test_config_reports_unwritten_settings_file() {
    let config_dir = TempDir::new().unwrap();
    budgetwise(&config_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not written, using defaults"));
}
