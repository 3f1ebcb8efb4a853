use crate::models::Role;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Roles backfilled from free-text titles when the `role` column is added.
const LEGACY_ROLE_ORDER: [Role; 4] = [
    Role::Supervisor,
    Role::Police,
    Role::Security,
    Role::Dispatcher,
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Employees table. `role` is stored explicitly; older databases only had
/// the free-text `job_title` (see `migrate_add_role_column`).
fn create_employees_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            job_title        TEXT NOT NULL DEFAULT '',
            role             TEXT NOT NULL DEFAULT 'other'
                             CHECK(role IN ('supervisor','police','security','dispatcher','other')),
            show_on_schedule INTEGER NOT NULL DEFAULT 1,
            created_at       TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Shifts table. Times are local wall clock `YYYY-MM-DD HH:MM`; both may be
/// NULL for label-only rows coming from imports.
fn create_shifts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER REFERENCES employees(id) ON DELETE CASCADE,
            start_time   TEXT,
            end_time     TEXT,
            notes        TEXT,
            cell_text    TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_shifts_start ON shifts(start_time);
        CREATE INDEX IF NOT EXISTS idx_shifts_employee ON shifts(employee_id, start_time);
        "#,
    )?;
    Ok(())
}

fn create_snapshots_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS snapshots (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT 'Snapshot',
            data        TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Databases created before explicit roles: add the column and derive each
/// employee's role once from the job title.
fn migrate_add_role_column(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_add_employee_role";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !has_column(conn, "employees", "role")? {
        warning("Adding 'role' column to employees table...");
        conn.execute(
            "ALTER TABLE employees ADD COLUMN role TEXT NOT NULL DEFAULT 'other'",
            [],
        )?;

        let rows: Vec<(i64, String)> = {
            let mut stmt = conn.prepare("SELECT id, job_title FROM employees")?;
            stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<_>>()?
        };

        for (id, title) in rows {
            let role = Role::from_job_title(&title, &LEGACY_ROLE_ORDER);
            conn.execute(
                "UPDATE employees SET role = ?1 WHERE id = ?2",
                params![role.to_db_str(), id],
            )?;
        }

        success(format!(
            "Migration applied: {} → added 'role' to employees table",
            version
        ));
    }

    mark_applied(conn, version, "Added explicit role to employees")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Employees: fresh table or legacy upgrade
    if table_exists(conn, "employees")? {
        migrate_add_role_column(conn)?;
    } else {
        create_employees_table(conn)?;
        mark_applied(
            conn,
            "20250301_0001_add_employee_role",
            "Created employees table (modern schema)",
        )?;
        success("Created employees table.");
    }

    // 3) Shifts and snapshots
    if !table_exists(conn, "shifts")? {
        create_shifts_table(conn)?;
        success("Created shifts table.");
    }
    create_snapshots_table(conn)?;

    Ok(())
}
