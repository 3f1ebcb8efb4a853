use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring a schedule database up to date. Schema lives in the migrations;
/// this only runs them and reports what the store holds.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    let employees: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))?;
    let shifts: i64 = conn.query_row("SELECT COUNT(*) FROM shifts", [], |r| r.get(0))?;
    tracing::debug!(employees, shifts, "schedule store ready");

    Ok(())
}
