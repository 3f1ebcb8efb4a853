mod common;
use common::{at, date};

use rshiftboard::core::view::{LoadStatus, ScheduleView};
use rshiftboard::db::initialize::init_db;
use rshiftboard::db::pool::DbPool;
use rshiftboard::db::queries;
use rshiftboard::db::repo::SqliteStore;
use rshiftboard::db::snapshots::{list_snapshots, restore_snapshot, save_snapshot};
use rshiftboard::errors::AppError;
use rshiftboard::models::{EmployeeChanges, Role, ShiftInput, ShiftTiming};
use rshiftboard::repository::ShiftRepository;
use rshiftboard::utils::date::DateRange;
use rusqlite::{Connection, params};

const ORDER: [Role; 3] = [Role::Supervisor, Role::Police, Role::Security];

fn store() -> SqliteStore {
    SqliteStore::new(DbPool::in_memory().expect("in-memory db"))
}

#[test]
fn test_add_employee_derives_role_from_title() {
    let mut s = store();
    let conn = &s.pool().conn;

    let a = queries::add_employee(conn, "Ann", "Senior Police Officer", None, &ORDER, true).unwrap();
    let b = queries::add_employee(conn, "Bo", "Janitor", None, &ORDER, false).unwrap();
    let c = queries::add_employee(conn, "Cy", "Guard", Some(Role::Security), &ORDER, true).unwrap();

    assert_eq!(a.role, Role::Police);
    assert_eq!(b.role, Role::Other);
    assert_eq!(c.role, Role::Security);

    let visible = queries::list_employees(conn, true).unwrap();
    assert_eq!(visible.iter().map(|e| e.id).collect::<Vec<_>>(), vec![a.id, c.id]);
    assert_eq!(queries::list_employees(conn, false).unwrap().len(), 3);
}

#[test]
fn test_month_listing_uses_half_open_range() {
    let mut s = store();
    let emp = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();

    for d in [date(2025, 2, 28), date(2025, 3, 1), date(2025, 3, 31), date(2025, 4, 1)] {
        s.create(&ShiftInput::new(emp.id, at(d, 7, 0), at(d, 15, 0))).unwrap();
    }
    // night shift starting on the last day belongs to March
    let last = date(2025, 3, 31);
    s.create(&ShiftInput::new(emp.id, at(last, 23, 0), at(date(2025, 4, 1), 7, 0)))
        .unwrap();

    let march = ShiftRepository::list(&mut s, &DateRange::month_of(date(2025, 3, 15))).unwrap();
    let days: Vec<String> = march
        .iter()
        .map(|sh| sh.start().unwrap().format("%m-%d %H").to_string())
        .collect();
    assert_eq!(days, vec!["03-01 07", "03-31 07", "03-31 23"]);
}

#[test]
fn test_update_and_delete_round_trip_through_store() {
    let mut s = store();
    let emp = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();
    let d = date(2025, 3, 3);

    let created = s
        .create(&ShiftInput::new(emp.id, at(d, 7, 0), at(d, 15, 0)))
        .unwrap();

    let mut input = created.to_input().unwrap();
    input.notes = Some("court".into());
    s.update(created.id, &input).unwrap();

    let loaded = queries::load_shift(&s.pool().conn, created.id).unwrap().unwrap();
    assert_eq!(loaded.notes.as_deref(), Some("court"));

    s.delete(created.id).unwrap();
    assert!(queries::load_shift(&s.pool().conn, created.id).unwrap().is_none());
}

#[test]
fn test_null_times_load_as_free_form() {
    let mut s = store();
    let emp = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();
    s.pool()
        .conn
        .execute(
            "INSERT INTO shifts (employee_id, cell_text, created_at) VALUES (?1, 'OFF', 'x')",
            params![emp.id],
        )
        .unwrap();

    let all = queries::load_all_shifts(&s.pool().conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].timing, ShiftTiming::FreeForm);
    assert_eq!(all[0].cell_text.as_deref(), Some("OFF"));
}

#[test]
fn test_view_loads_from_sqlite() {
    let mut s = store();
    let emp = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();
    let d = date(2025, 3, 3);
    s.create(&ShiftInput::new(emp.id, at(d, 7, 0), at(d, 15, 0))).unwrap();

    let mut view = ScheduleView::new(d);
    assert_eq!(view.load(d, &mut s), LoadStatus::Applied);
    assert_eq!(view.employees().len(), 1);
    assert!(view.lookup().get(emp.id, d).is_some());
}

#[test]
fn test_snapshot_restore_replaces_shifts() {
    let mut s = store();
    let emp = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();
    let d = date(2025, 3, 3);
    let kept = s
        .create(&ShiftInput::new(emp.id, at(d, 7, 0), at(d, 15, 0)))
        .unwrap();

    let snap = save_snapshot(s.pool(), "before changes").unwrap();

    s.delete(kept.id).unwrap();
    let d2 = date(2025, 3, 4);
    s.create(&ShiftInput::new(emp.id, at(d2, 15, 0), at(d2, 23, 0)))
        .unwrap();

    let restored = restore_snapshot(s.pool(), snap).unwrap();
    assert_eq!(restored, 1);

    let all = queries::load_all_shifts(&s.pool().conn).unwrap();
    assert_eq!(all, vec![kept]);

    let listed = list_snapshots(s.pool()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "before changes");
    assert_eq!(listed[0].shift_count, 1);

    assert!(matches!(
        restore_snapshot(s.pool(), 999),
        Err(AppError::SnapshotNotFound(999))
    ));
}

#[test]
fn test_legacy_roster_gets_role_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE employees (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            job_title        TEXT NOT NULL DEFAULT '',
            show_on_schedule INTEGER NOT NULL DEFAULT 1,
            created_at       TEXT NOT NULL
        );
        INSERT INTO employees (name, job_title, created_at) VALUES ('Ann', 'Police Sergeant', 'x');
        INSERT INTO employees (name, job_title, created_at) VALUES ('Bo', 'Dispatcher', 'x');
        INSERT INTO employees (name, job_title, created_at) VALUES ('Cy', 'Cook', 'x');
        "#,
    )
    .unwrap();

    init_db(&conn).unwrap();
    // a second run is a no-op
    init_db(&conn).unwrap();

    let roles: Vec<Role> = queries::list_employees(&conn, false)
        .unwrap()
        .into_iter()
        .map(|e| e.role)
        .collect();
    assert_eq!(roles, vec![Role::Police, Role::Dispatcher, Role::Other]);

    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(applied, 1);
}

#[test]
fn test_update_employee_changes_visibility_and_role() {
    let mut s = store();
    let conn = &s.pool().conn;
    let emp = queries::add_employee(conn, "Ann", "Security Guard", None, &ORDER, true).unwrap();

    let changes = EmployeeChanges {
        job_title: Some("Police Officer".into()),
        show_on_schedule: Some(false),
        ..Default::default()
    };
    let updated = changes.apply(&emp, &ORDER);
    assert_eq!(queries::update_employee(conn, &updated).unwrap(), 1);

    let loaded = queries::load_employee(conn, emp.id).unwrap().unwrap();
    assert_eq!(loaded.role, Role::Police);
    assert!(!loaded.show_on_schedule);
    assert!(queries::list_employees(conn, true).unwrap().is_empty());
    assert!(queries::load_employee(conn, 999).unwrap().is_none());
}

#[test]
fn test_delete_employee_removes_their_shifts() {
    let mut s = store();
    let ann = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();
    let bo = queries::add_employee(&s.pool().conn, "Bo", "Police", None, &ORDER, true).unwrap();
    let d = date(2025, 3, 3);
    s.create(&ShiftInput::new(ann.id, at(d, 7, 0), at(d, 15, 0))).unwrap();
    s.create(&ShiftInput::new(ann.id, at(d, 15, 0), at(d, 23, 0))).unwrap();
    let kept = s
        .create(&ShiftInput::new(bo.id, at(d, 7, 0), at(d, 15, 0)))
        .unwrap();

    let conn = &s.pool().conn;
    assert_eq!(queries::delete_employee(conn, ann.id).unwrap(), Some(2));
    assert_eq!(queries::load_all_shifts(conn).unwrap(), vec![kept]);
    assert!(!queries::employee_exists(conn, ann.id).unwrap());

    assert_eq!(queries::delete_employee(conn, ann.id).unwrap(), None);
}

#[test]
fn test_snapshot_skips_shifts_of_deleted_employees() {
    let mut s = store();
    let ann = queries::add_employee(&s.pool().conn, "Ann", "Police", None, &ORDER, true).unwrap();
    let bo = queries::add_employee(&s.pool().conn, "Bo", "Police", None, &ORDER, true).unwrap();
    let d = date(2025, 3, 3);
    s.create(&ShiftInput::new(ann.id, at(d, 7, 0), at(d, 15, 0))).unwrap();
    let kept = s
        .create(&ShiftInput::new(bo.id, at(d, 7, 0), at(d, 15, 0)))
        .unwrap();

    let snap = save_snapshot(s.pool(), "").unwrap();
    queries::delete_employee(&s.pool().conn, ann.id).unwrap();

    assert_eq!(restore_snapshot(s.pool(), snap).unwrap(), 1);
    assert_eq!(queries::load_all_shifts(&s.pool().conn).unwrap(), vec![kept]);
}
