use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_roster, rsb, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rsb()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_employee_list_shows_derived_roles() {
    let db_path = setup_test_db("cli_employee_list");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "employee", "add", "Hidden Hal", "--title", "Cook", "--hidden"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(
            contains("Sam Stone")
                .and(contains("supervisor"))
                .and(contains("police"))
                .and(contains("security"))
                .and(contains("Hidden Hal").not()),
        );

    rsb()
        .args(["--db", &db_path, "employee", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Hidden Hal"));
}

#[test]
fn test_employee_add_rejects_unknown_role() {
    let db_path = setup_test_db("cli_employee_bad_role");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "employee", "add", "X", "--title", "T", "--role", "pilot"])
        .assert()
        .failure()
        .stderr(contains("Invalid role"));
}

#[test]
fn test_shift_add_and_grid() {
    let db_path = setup_test_db("cli_shift_grid");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "shift", "add", "2", "2025-09-03", "--text", "CRT"])
        .assert()
        .success()
        .stdout(contains("Shift 1 added").and(contains("[1]")));

    rsb()
        .args([
            "--db",
            &db_path,
            "shift",
            "add",
            "2",
            "2025-09-04",
            "--start",
            "23:00",
            "--end",
            "07:00",
            "--next-day",
        ])
        .assert()
        .success()
        .stdout(contains("2025-09-05 07:00").and(contains("[3]")));

    rsb()
        .args(["--db", &db_path, "grid", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(
            contains("Sam Stone")
                .and(contains("Paula Reed"))
                .and(contains("Gus Hale"))
                .and(contains("CRT")),
        );
}

#[test]
fn test_shift_end_before_start_is_rejected() {
    let db_path = setup_test_db("cli_shift_invalid");
    init_db_with_roster(&db_path);

    rsb()
        .args([
            "--db",
            &db_path,
            "shift",
            "add",
            "2",
            "2025-09-03",
            "--start",
            "23:00",
            "--end",
            "07:00",
        ])
        .assert()
        .failure()
        .stderr(contains("must be later than"));
}

#[test]
fn test_shift_for_unknown_employee_fails() {
    let db_path = setup_test_db("cli_shift_unknown_emp");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "shift", "add", "42", "2025-09-03"])
        .assert()
        .failure()
        .stderr(contains("Employee 42 not found"));
}

#[test]
fn test_shift_edit_and_delete() {
    let db_path = setup_test_db("cli_shift_edit_del");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "shift", "add", "2", "2025-09-03"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "shift", "edit", "1", "--start", "15:00", "--end", "23:00"])
        .assert()
        .success()
        .stdout(contains("Shift 1 updated").and(contains("[2]")));

    rsb()
        .args(["--db", &db_path, "shift", "del", "1", "--force"])
        .assert()
        .success()
        .stdout(contains("Shift 1 deleted"));

    rsb()
        .args(["--db", &db_path, "shift", "del", "1", "--force"])
        .assert()
        .failure()
        .stderr(contains("Shift 1 not found"));
}

#[test]
fn test_read_only_blocks_edits() {
    let db_path = setup_test_db("cli_read_only");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "--read-only", "shift", "add", "2", "2025-09-03"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rsb()
        .args([
            "--db",
            &db_path,
            "--read-only",
            "bulk",
            "--employee",
            "2",
            "--template",
            "morning",
            "--dates",
            "2025-09-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rsb()
        .args(["--db", &db_path, "--read-only", "grid", "--month", "2025-09"])
        .assert()
        .success();
}

#[test]
fn test_bulk_then_conflicts() {
    let db_path = setup_test_db("cli_bulk_conflicts");
    init_db_with_roster(&db_path);

    rsb()
        .args([
            "--db",
            &db_path,
            "bulk",
            "--employee",
            "2",
            "--template",
            "night",
            "--dates",
            "2025-09-01,2025-09-02,2025-10-01",
            "--text",
            "N",
        ])
        .assert()
        .success()
        .stdout(contains("3 succeeded, 0 failed"));

    // re-applying updates instead of duplicating
    rsb()
        .args([
            "--db",
            &db_path,
            "bulk",
            "--employee",
            "2",
            "--template",
            "morning",
            "--dates",
            "2025-09-01",
        ])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "conflicts", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("2025-09-01").and(contains("uncovered slot")));

    let out = temp_out("cli_bulk_conflicts", "csv");
    rsb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--month", "2025-09",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let rows: Vec<&str> = content.lines().collect();
    // header + two shifts in September
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("employee_id,employee,role,date"));
    assert!(content.contains("2025-09-01"));
    assert!(content.contains("Paula Reed"));
}

#[test]
fn test_bulk_with_bad_date_fails() {
    let db_path = setup_test_db("cli_bulk_bad_date");
    init_db_with_roster(&db_path);

    rsb()
        .args([
            "--db",
            &db_path,
            "bulk",
            "--employee",
            "2",
            "--template",
            "morning",
            "--dates",
            "2025-09-01,2025-13-40",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_export_json_and_overwrite_guard() {
    let db_path = setup_test_db("cli_export_json");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "shift", "add", "1", "2025-09-10", "--notes", "7A7P cover"])
        .assert()
        .success();

    let out = temp_out("cli_export_json", "json");
    rsb()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--month", "2025-09",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(json["month"], "2025-09-01");
    assert_eq!(json["days"].as_array().map(|d| d.len()), Some(30));
    assert!(content.contains("7a7p"));

    // existing file, no --force, "no" on stdin
    rsb()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--month", "2025-09",
        ])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    rsb()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--month", "2025-09",
            "--force",
        ])
        .assert()
        .success();
}

#[test]
fn test_snapshot_save_list_restore() {
    let db_path = setup_test_db("cli_snapshot");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "shift", "add", "2", "2025-09-03"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "snapshot", "--save", "baseline"])
        .assert()
        .success()
        .stdout(contains("Snapshot 1 saved"));

    rsb()
        .args(["--db", &db_path, "shift", "del", "1", "--force"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "snapshot", "--list"])
        .assert()
        .success()
        .stdout(contains("baseline"));

    rsb()
        .args(["--db", &db_path, "snapshot", "--restore", "1"])
        .assert()
        .success()
        .stdout(contains("1 shifts"));

    rsb()
        .args(["--db", &db_path, "grid", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("Paula Reed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "shift", "add", "2", "2025-09-03"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("init")
                .and(contains("employee_add"))
                .and(contains("shift_add")),
        );
}

#[test]
fn test_invalid_month_is_reported() {
    let db_path = setup_test_db("cli_bad_month");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "grid", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_employee_edit_and_delete() {
    let db_path = setup_test_db("cli_employee_edit_del");
    init_db_with_roster(&db_path);

    rsb()
        .args(["--db", &db_path, "employee", "edit", "3", "--title", "Police Officer", "--hide"])
        .assert()
        .success()
        .stdout(contains("Employee 3 updated").and(contains("police")).and(contains("hidden")));

    rsb()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Gus Hale").not());

    rsb()
        .args(["--db", &db_path, "employee", "edit", "3", "--show", "--role", "security"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Gus Hale").and(contains("security")));

    rsb()
        .args(["--db", &db_path, "shift", "add", "3", "2025-09-03"])
        .assert()
        .success();

    rsb()
        .args(["--db", &db_path, "--read-only", "employee", "del", "3", "--force"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rsb()
        .args(["--db", &db_path, "employee", "del", "3", "--force"])
        .assert()
        .success()
        .stdout(contains("Employee 3 deleted (1 shift(s) removed)"));

    rsb()
        .args(["--db", &db_path, "employee", "edit", "3", "--name", "Gus"])
        .assert()
        .failure()
        .stderr(contains("Employee 3 not found"));

    rsb()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("employee_edit").and(contains("employee_del")));
}

#[test]
fn test_bulk_repeated_date_writes_one_shift() {
    let db_path = setup_test_db("cli_bulk_repeated");
    init_db_with_roster(&db_path);

    rsb()
        .args([
            "--db",
            &db_path,
            "bulk",
            "--employee",
            "2",
            "--template",
            "morning",
            "--dates",
            "2025-05-01,2025-05-01",
        ])
        .assert()
        .success()
        .stdout(contains("1 succeeded, 0 failed"));

    let out = temp_out("cli_bulk_repeated", "csv");
    rsb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--month", "2025-05",
        ])
        .assert()
        .success();
    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_eq!(content.lines().count(), 2);
}
