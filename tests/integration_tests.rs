//! Integration tests for the invtrack CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! The shell is driven through piped stdin, which switches it to
//! line-based prompts.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an invtrack command isolated from the user's environment
fn invtrack(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("invtrack").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("INVTRACK_CSV_PATH")
        .env_remove("INVTRACK_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temp directory holding `inventory.csv`
fn setup_inventory(contents: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("inventory.csv"), contents).unwrap();
    tmp
}

fn read_inventory(tmp: &TempDir) -> String {
    fs::read_to_string(tmp.path().join("inventory.csv")).unwrap()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inventory"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("invtrack"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invtrack"));
}

#[test]
fn test_template_prints_header() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp)
        .arg("template")
        .assert()
        .success()
        .stdout("name,price,quantity\nWidget,2.5,10\n");
}

// ============================================================================
// List / Stats Tests
// ============================================================================

#[test]
fn test_list_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_shows_products() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\nGadget,19.99,3\n");
    invtrack(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("59.97"))
        .stdout(predicate::str::contains("2 product(s) found"));
}

#[test]
fn test_list_name_format_and_search() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\nGadget,19.99,3\n");
    invtrack(&tmp)
        .args(["list", "--format", "name", "--search", "GAD"])
        .assert()
        .success()
        .stdout("Gadget\n");
}

#[test]
fn test_list_count() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\nGadget,19.99,3\nbroken\n");
    invtrack(&tmp)
        .args(["list", "--count"])
        .assert()
        .success()
        .stdout("2\n")
        .stderr(predicate::str::contains("1 invalid row(s) skipped"));
}

#[test]
fn test_list_json_format() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\n");
    let output = invtrack(&tmp)
        .args(["list", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "Widget");
    assert_eq!(value[0]["total_cost"], 25.0);
}

#[test]
fn test_list_uses_file_flag() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("other.csv"), "name,price,quantity\nGizmo,1.0,2\n").unwrap();
    invtrack(&tmp)
        .args(["list", "--file", "other.csv", "--format", "csv"])
        .assert()
        .success()
        .stdout("name,price,quantity,total_cost\nGizmo,1,2,2\n");
}

#[test]
fn test_list_reads_local_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("stock.csv"), "name,price,quantity\nGizmo,1.0,2\n").unwrap();
    fs::write(tmp.path().join(".invtrack.yaml"), "csv_path: stock.csv\ndefault_format: name\n").unwrap();
    invtrack(&tmp).arg("list").assert().success().stdout("Gizmo\n");
}

#[test]
fn test_list_rejects_bad_header() {
    let tmp = setup_inventory("name,cost,qty\nWidget,2.5,10\n");
    invtrack(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header"));
}

#[test]
fn test_stats_output() {
    let tmp = setup_inventory("name,price,quantity\nWidget,3.0,15\nGizmo,1.0,2\n");
    invtrack(&tmp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Inventory Value: 47.00"))
        .stdout(predicate::str::contains("Total Number of Units in Stock: 17"))
        .stdout(predicate::str::contains("Most Expensive Product Price: 3.00"))
        .stdout(predicate::str::contains("Product with Highest Stock Quantity: 15"));
}

#[test]
fn test_stats_empty_inventory_fails() {
    let tmp = setup_inventory("name,price,quantity\n");
    invtrack(&tmp)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inventory is empty"));
}

// ============================================================================
// Import Tests
// ============================================================================

#[test]
fn test_import_merge_scenario() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\n");
    fs::write(
        tmp.path().join("incoming.csv"),
        "name,price,quantity\nWidget,3.0,5\nGizmo,1.0,2\n",
    )
    .unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "--mode", "merge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid rows skipped: 0"))
        .stdout(predicate::str::contains("merge"));

    assert_eq!(
        read_inventory(&tmp),
        "name,price,quantity\nWidget,3.0,15\nGizmo,1.0,2\n"
    );
}

#[test]
fn test_import_overwrite() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\n");
    fs::write(tmp.path().join("incoming.csv"), "name,price,quantity\nGizmo,1.0,2\n").unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "--mode", "overwrite", "--quiet"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_inventory(&tmp), "name,price,quantity\nGizmo,1.0,2\n");
}

#[test]
fn test_import_counts_invalid_rows() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("incoming.csv"),
        "name,price,quantity\nA,1.0,1\nB,2.0,2\nC,3.0\nD,abc,4\nE,5.0,5\nF,6.0,6\nG,7.0,7\n",
    )
    .unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "-m", "overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid rows skipped: 2"));

    let saved = read_inventory(&tmp);
    assert_eq!(saved.lines().count(), 6);
    assert!(!saved.contains("\nC,"));
    assert!(!saved.contains("\nD,"));
}

#[test]
fn test_import_dry_run_leaves_file() {
    let original = "name,price,quantity\nWidget,2.5,10\n";
    let tmp = setup_inventory(original);
    fs::write(tmp.path().join("incoming.csv"), "name,price,quantity\nGizmo,1.0,2\n").unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "--mode", "merge", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run complete"));

    assert_eq!(read_inventory(&tmp), original);
}

#[test]
fn test_import_bad_header_leaves_file() {
    let original = "name,price,quantity\nWidget,2.5,10\n";
    let tmp = setup_inventory(original);
    fs::write(tmp.path().join("incoming.csv"), "name,cost,qty\nGizmo,1.0,2\n").unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "--mode", "overwrite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header"));

    assert_eq!(read_inventory(&tmp), original);
}

#[test]
fn test_import_empty_file_fails() {
    let original = "name,price,quantity\nWidget,2.5,10\n";
    let tmp = setup_inventory(original);
    fs::write(tmp.path().join("incoming.csv"), "").unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "--mode", "merge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty"));

    assert_eq!(read_inventory(&tmp), original);
}

#[test]
fn test_import_requires_mode() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("incoming.csv"), "name,price,quantity\nGizmo,1.0,2\n").unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mode"));
}

#[test]
fn test_import_creates_missing_target() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("incoming.csv"), "name,price,quantity\ngizmo,1.5,2\n").unwrap();

    invtrack(&tmp)
        .args(["import", "incoming.csv", "--mode", "merge"])
        .assert()
        .success();

    assert_eq!(read_inventory(&tmp), "name,price,quantity\nGizmo,1.5,2\n");
}

// ============================================================================
// Shell Tests
// ============================================================================

#[test]
fn test_shell_add_and_save() {
    let tmp = TempDir::new().unwrap();

    invtrack(&tmp)
        .write_stdin("1\nwidget\n2.5\n10\n7\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"))
        .stdout(predicate::str::contains(
            "10 units of the product Widget added to the inventory.",
        ))
        .stdout(predicate::str::contains("See you later"));

    assert_eq!(read_inventory(&tmp), "name,price,quantity\nWidget,2.5,10\n");
}

#[test]
fn test_shell_save_empty_does_not_write() {
    let tmp = TempDir::new().unwrap();

    invtrack(&tmp)
        .arg("shell")
        .write_stdin("7\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data to save"));

    assert!(!tmp.path().join("inventory.csv").exists());
}

#[test]
fn test_shell_load_merge_and_statistics() {
    let tmp = setup_inventory("name,price,quantity\nWidget,3.0,5\nGizmo,1.0,2\n");

    invtrack(&tmp)
        .arg("shell")
        .write_stdin("1\nwidget\n2.5\n10\n8\nn\n6\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Action performed: merge"))
        .stdout(predicate::str::contains("Total Inventory Value: 47.00"))
        .stdout(predicate::str::contains("Product with Highest Stock Quantity: 15"));
}

#[test]
fn test_shell_with_load_flag_and_delete() {
    let tmp = setup_inventory("name,price,quantity\nWidget,2.5,10\nGizmo,1.0,2\n");

    invtrack(&tmp)
        .args(["shell", "--load"])
        .write_stdin("4\nwidget\ny\n7\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("has been removed successfully"));

    assert_eq!(read_inventory(&tmp), "name,price,quantity\nGizmo,1.0,2\n");
}

#[test]
fn test_shell_search_not_found() {
    let tmp = TempDir::new().unwrap();

    invtrack(&tmp)
        .write_stdin("1\nwidget\n2.5\n10\n2\ngizmo\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Product 'Gizmo' not found"));
}

#[test]
fn test_shell_empty_inventory_messages() {
    let tmp = TempDir::new().unwrap();

    invtrack(&tmp)
        .write_stdin("5\n6\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory is empty"))
        .stdout(predicate::str::contains("Most Expensive Product Price: N/A"));
}

#[test]
fn test_shell_closed_input_exits_cleanly() {
    let tmp = TempDir::new().unwrap();
    invtrack(&tmp).write_stdin("").assert().success();
}
