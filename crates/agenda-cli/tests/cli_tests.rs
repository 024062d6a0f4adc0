use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NOW: &str = "2024-06-17T09:00";

/// A fresh database directory plus a command builder bound to it.
struct CliTest {
    _temp_dir: TempDir,
    db_arg: String,
}

impl CliTest {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let db_arg = temp_dir
            .path()
            .join("cli_test.db")
            .to_str()
            .expect("temp path is UTF-8")
            .to_string();
        Self {
            _temp_dir: temp_dir,
            db_arg,
        }
    }

    /// `agenda --no-color --now NOW --database-file DB <args>`
    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("agenda").expect("Failed to find agenda binary");
        cmd.args(["--no-color", "--now", NOW, "--database-file", &self.db_arg]);
        cmd.args(args);
        cmd
    }

    fn add_client(&self, name: &str) {
        self.cmd(&["client", "add", name])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created client with ID:"));
    }
}

#[test]
fn test_cli_add_task_and_list() {
    let env = CliTest::new();
    env.add_client("Acme");

    env.cmd(&[
        "task",
        "add",
        "Kick-off",
        "--at",
        "2024-06-18T09:00",
        "--end",
        "2024-06-18T10:30",
        "--kind",
        "first-meeting",
        "--client",
        "1",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created task with ID: 1"))
    .stdout(predicate::str::contains("Kick-off"));

    env.cmd(&["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Tasks, 2024-06-17 to 2024-06-23"))
        .stdout(predicate::str::contains("## Tue 18 2024-06-18"))
        .stdout(predicate::str::contains("Kick-off (Acme, First meeting)"));
}

#[test]
fn test_cli_list_empty_range() {
    let env = CliTest::new();

    env.cmd(&["task", "list", "--from", "2024-01-01", "--to", "2024-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_rejects_inverted_extent() {
    let env = CliTest::new();

    env.cmd(&[
        "task",
        "add",
        "Backwards",
        "--at",
        "2024-06-18T10:00",
        "--end",
        "2024-06-18T09:00",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid input for field 'end_at'"));

    env.cmd(&["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_complete_reschedule_cancel() {
    let env = CliTest::new();
    env.cmd(&["task", "add", "Review", "--at", "2024-06-17T14:00"])
        .assert()
        .success();

    env.cmd(&["task", "done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked done"))
        .stdout(predicate::str::contains("✓ Done"));

    env.cmd(&["task", "reschedule", "1", "--at", "2024-06-19T08:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to 2024-06-19 08:00"))
        .stdout(predicate::str::contains("○ Pending"));

    env.cmd(&["task", "cancel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task 'Review' (ID: 1)"));

    env.cmd(&["task", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID 1 not found"));
}

#[test]
fn test_cli_week_view() {
    let env = CliTest::new();
    env.cmd(&[
        "task",
        "add",
        "Workshop",
        "--at",
        "2024-06-19T09:00",
        "--end",
        "2024-06-19T11:00",
    ])
    .assert()
    .success();

    env.cmd(&["calendar", "week", "--hours", "8-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Week of 2024-06-17 (08:00-12:00)"))
        .stdout(predicate::str::contains("| 09:00 |  |  | 1. Workshop |"))
        .stdout(predicate::str::contains("| 10:00 |  |  | 1. Workshop |"))
        .stdout(predicate::str::contains("| 11:00 |  |  |  |"));
}

#[test]
fn test_cli_month_json() {
    let env = CliTest::new();
    env.cmd(&["task", "add", "Review", "--at", "2024-06-17T14:00"])
        .assert()
        .success();

    let output = env
        .cmd(&["calendar", "month", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("month output should be JSON");
    assert_eq!(json["year"], 2024);
    assert_eq!(json["month"], 6);
    assert_eq!(json["entries"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_cli_orders_and_deadlines() {
    let env = CliTest::new();
    env.add_client("Acme");

    env.cmd(&[
        "order",
        "add",
        "1",
        "Website",
        "--price",
        "2500",
        "--start",
        "2024-06-01",
        "--due",
        "2024-06-20",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created order with ID: 1"));

    env.cmd(&["deadlines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("due in 3 days"));

    env.cmd(&["order", "list", "--status", "on-time"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On time (3d)"));

    env.cmd(&["order", "deliver", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delivery set to delivered"));

    env.cmd(&["deadlines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No deadlines in sight."));
}

#[test]
fn test_cli_order_delete_requires_confirmation() {
    let env = CliTest::new();
    env.add_client("Acme");
    env.cmd(&[
        "order", "add", "1", "Audit", "--start", "2024-06-01", "--due", "2024-06-30",
    ])
    .assert()
    .success();
    env.cmd(&[
        "task",
        "add",
        "Audit day",
        "--at",
        "2024-06-18T09:00",
        "--client",
        "1",
        "--order",
        "1",
    ])
    .assert()
    .success();

    env.cmd(&["order", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-run with --confirm"));

    env.cmd(&["order", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted order 1 and 1 linked tasks"));

    env.cmd(&["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_callback_for_unknown_client() {
    let env = CliTest::new();

    env.cmd(&["task", "callback", "4", "--at", "2024-06-18T16:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client with ID 4 not found"));
}

#[test]
fn test_cli_default_command_is_dashboard() {
    let env = CliTest::new();

    env.cmd(&[])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Today, 2024-06-17"))
        .stdout(predicate::str::contains("Nothing scheduled."));
}

#[test]
fn test_cli_kpi_report() {
    let env = CliTest::new();
    env.cmd(&["task", "add", "Prospecting", "--at", "2024-06-17T10:00"])
        .assert()
        .success();

    env.cmd(&["kpi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Today | 1 |"))
        .stdout(predicate::str::contains("- Calls: +100%"));

    env.cmd(&["kpi", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"week_over_week\""))
        .stdout(predicate::str::contains("\"saturated\""));
}
