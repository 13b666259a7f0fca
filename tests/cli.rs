use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocketwise(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocketwise").unwrap();
    cmd.env("POCKETWISE_DATA_DIR", data_dir.path())
        .env_remove("POCKETWISE_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    pocketwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 13 default categories"));
    dir
}

#[test]
fn init_is_idempotent() {
    let dir = initialized();
    pocketwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));

    pocketwise(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::contains("Salary"));
}

#[test]
fn record_transactions_and_summarize() {
    let dir = initialized();

    pocketwise(&dir)
        .args(["transaction", "add", "income", "8000000", "-c", "Salary", "-d", "2025-11-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded income Rp8.000.000"));

    pocketwise(&dir)
        .args([
            "txn", "add", "expense", "1850000", "-c", "food & dining", "-d", "2025-11-20", "-n",
            "Groceries",
        ])
        .assert()
        .success();

    pocketwise(&dir)
        .args(["report", "summary", "--range", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rp8.000.000"))
        .stdout(predicate::str::contains("Rp1.850.000"))
        .stdout(predicate::str::contains("Rp6.150.000"));

    pocketwise(&dir)
        .args(["transaction", "list", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Salary").not());
}

#[test]
fn expense_against_income_category_fails() {
    let dir = initialized();
    pocketwise(&dir)
        .args(["transaction", "add", "expense", "100", "-c", "Salary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn budget_progress_report() {
    let dir = initialized();

    pocketwise(&dir)
        .args([
            "budget", "add", "Food", "3000000", "-c", "Food & Dining", "--start", "2025-01-01",
        ])
        .assert()
        .success();
    pocketwise(&dir)
        .args(["txn", "add", "expense", "2500000", "-c", "Food & Dining", "-d", "2025-11-10"])
        .assert()
        .success();

    pocketwise(&dir)
        .args(["budget", "show", "food", "--as-of", "2025-11-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("83.3%"))
        .stdout(predicate::str::contains("warning"));

    let csv_path = dir.path().join("budgets.csv");
    pocketwise(&dir)
        .args(["report", "budgets", "--as-of", "2025-11-24", "-o"])
        .arg(&csv_path)
        .assert()
        .success();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.contains("Food,2025-11-01,2025-11-30,2500000.00,3000000.00,500000.00,83.3,warning,false"));
}

#[test]
fn goal_projection() {
    let dir = initialized();

    pocketwise(&dir)
        .args(["goal", "add", "Laptop", "1200000"])
        .assert()
        .success();

    pocketwise(&dir)
        .args(["goal", "project", "laptop", "--monthly", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 months"));

    pocketwise(&dir)
        .args(["goal", "project", "laptop", "--monthly", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));

    pocketwise(&dir)
        .args(["goal", "contribute", "Laptop", "1200000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal reached!"));
}

#[test]
fn config_set_changes_formatting() {
    let dir = initialized();

    pocketwise(&dir)
        .args(["config", "set", "currency_symbol", "$"])
        .assert()
        .success();
    pocketwise(&dir)
        .args(["config", "set", "decimals", "9"])
        .assert()
        .failure();

    pocketwise(&dir)
        .args(["txn", "add", "income", "10", "-c", "Gift", "-d", "2025-11-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$10"));
}

#[test]
fn dashboard_and_history() {
    let dir = initialized();

    pocketwise(&dir)
        .args(["txn", "add", "expense", "150000", "-c", "Transportation", "-d", "2025-11-24"])
        .assert()
        .success();

    pocketwise(&dir)
        .args(["dashboard", "--as-of", "2025-11-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("November 2025"))
        .stdout(predicate::str::contains("Transportation"));

    pocketwise(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction"));
}

#[test]
fn zero_limit_budget_is_refused() {
    let dir = initialized();

    pocketwise(&dir)
        .args(["budget", "add", "Zero", "0", "-c", "Food & Dining"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
    pocketwise(&dir)
        .args(["txn", "add", "expense", "1000", "-c", "Food & Dining", "-d", "2025-11-10"])
        .assert()
        .success();

    pocketwise(&dir)
        .args(["dashboard", "--as-of", "2025-11-24"])
        .assert()
        .success();
    pocketwise(&dir)
        .args(["report", "budgets", "--as-of", "2025-11-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zero").not());
}

#[test]
fn out_of_range_amounts_are_refused() {
    let dir = initialized();

    pocketwise(&dir)
        .args(["txn", "add", "income", "92233720368547758", "-c", "Salary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    pocketwise(&dir)
        .args(["txn", "add", "income", "1.999", "-c", "Salary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("two decimal places"));

    for _ in 0..2 {
        pocketwise(&dir)
            .args([
                "txn", "add", "income", "100000000000", "-c", "Salary", "-d", "2025-11-01",
            ])
            .assert()
            .success();
    }
    pocketwise(&dir)
        .args(["report", "summary", "--range", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rp200.000.000.000"));
}

#[test]
fn edit_budget_goal_and_category() {
    let dir = initialized();

    pocketwise(&dir)
        .args([
            "budget", "add", "Food", "3000000", "-c", "Food & Dining", "--start", "2025-01-01",
        ])
        .assert()
        .success();
    pocketwise(&dir)
        .args(["txn", "add", "expense", "500000", "-c", "Shopping", "-d", "2025-11-10"])
        .assert()
        .success();
    pocketwise(&dir)
        .args([
            "budget", "edit", "food", "--name", "Everything", "--all-expenses", "-l", "1000000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated budget: Everything"));
    pocketwise(&dir)
        .args(["budget", "show", "everything", "--as-of", "2025-11-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.0%"));
    pocketwise(&dir)
        .args(["budget", "edit", "everything", "-l", "0"])
        .assert()
        .failure();

    pocketwise(&dir)
        .args(["goal", "add", "Laptop", "1200000", "-r", "5"])
        .assert()
        .success();
    pocketwise(&dir)
        .args(["goal", "edit", "laptop", "-t", "1500000", "--no-rate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rp1.500.000"));
    pocketwise(&dir)
        .args(["goal", "project", "laptop", "--monthly", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15 months"));

    pocketwise(&dir)
        .args(["category", "edit", "Shopping", "-n", "Errands", "-c", "#F59E0B"])
        .assert()
        .success();
    pocketwise(&dir)
        .args(["category", "edit", "Errands", "-t", "income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
    pocketwise(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Errands"));
}
