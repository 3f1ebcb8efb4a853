use crate::errors::{AppError, AppResult};
use crate::models::{Employee, Role, Shift, ShiftInput, ShiftTiming};
use crate::utils::date::DateRange;
use crate::utils::time::{format_datetime, parse_datetime};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SHIFT_COLUMNS: &str = "id, employee_id, start_time, end_time, notes, cell_text";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_employee(row: &Row) -> Result<Employee> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(AppError::InvalidRole(role_str.clone())))?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        job_title: row.get("job_title")?,
        role,
        show_on_schedule: row.get::<_, i32>("show_on_schedule")? == 1,
    })
}

pub fn map_shift(row: &Row) -> Result<Shift> {
    let start: Option<String> = row.get("start_time")?;
    let end: Option<String> = row.get("end_time")?;

    let parse = |s: &str| {
        parse_datetime(s).ok_or_else(|| conversion_error(AppError::InvalidTime(s.to_string())))
    };

    let timing = match (start.as_deref(), end.as_deref()) {
        (Some(s), Some(e)) => ShiftTiming::Timed {
            start: parse(s)?,
            end: parse(e)?,
        },
        _ => ShiftTiming::FreeForm,
    };

    Ok(Shift {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        timing,
        notes: row.get("notes")?,
        cell_text: row.get("cell_text")?,
    })
}

// ---------------------------
// Employees
// ---------------------------

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (name, job_title, role, show_on_schedule, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            emp.name,
            emp.job_title,
            emp.role.to_db_str(),
            if emp.show_on_schedule { 1 } else { 0 },
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Employees in roster order (insertion order); `visible_only` keeps the
/// ones shown on the schedule.
pub fn list_employees(conn: &Connection, visible_only: bool) -> AppResult<Vec<Employee>> {
    let sql = if visible_only {
        "SELECT * FROM employees WHERE show_on_schedule = 1 ORDER BY id ASC"
    } else {
        "SELECT * FROM employees ORDER BY id ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a new employee. Without an explicit role, the role is derived
/// once from the job title.
pub fn add_employee(
    conn: &Connection,
    name: &str,
    job_title: &str,
    role: Option<Role>,
    role_order: &[Role],
    show_on_schedule: bool,
) -> AppResult<Employee> {
    let mut emp = match role {
        Some(r) => Employee::new(0, name.trim(), job_title.trim(), r),
        None => Employee::from_legacy(0, name.trim(), job_title.trim(), role_order),
    };
    emp.show_on_schedule = show_on_schedule;
    emp.id = insert_employee(conn, &emp)?;
    Ok(emp)
}

pub fn load_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row("SELECT * FROM employees WHERE id = ?1", [id], map_employee)
        .optional()?;
    Ok(emp)
}

/// Overwrite name, title, role and visibility. Returns the rows touched.
pub fn update_employee(conn: &Connection, emp: &Employee) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE employees
         SET name = ?1, job_title = ?2, role = ?3, show_on_schedule = ?4
         WHERE id = ?5",
        params![
            emp.name,
            emp.job_title,
            emp.role.to_db_str(),
            if emp.show_on_schedule { 1 } else { 0 },
            emp.id,
        ],
    )?;
    Ok(n)
}

/// Delete an employee and every shift assigned to them, in one
/// transaction. Returns the number of shifts removed, `None` when the
/// employee does not exist (nothing is changed then).
pub fn delete_employee(conn: &Connection, id: i64) -> AppResult<Option<usize>> {
    let tx = conn.unchecked_transaction()?;
    let shifts = tx.execute("DELETE FROM shifts WHERE employee_id = ?1", [id])?;
    if tx.execute("DELETE FROM employees WHERE id = ?1", [id])? == 0 {
        return Ok(None);
    }
    tx.commit()?;
    Ok(Some(shifts))
}

pub fn employee_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM employees WHERE id = ?1", [id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

// ---------------------------
// Shifts
// ---------------------------

/// Shifts whose start falls in `[range.start, range.end)`, ordered by start.
pub fn load_shifts_in_range(conn: &Connection, range: &DateRange) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts
         WHERE start_time >= ?1 AND start_time < ?2
         ORDER BY start_time ASC, id ASC"
    ))?;

    let from = format!("{} 00:00", range.start.format("%Y-%m-%d"));
    let to = format!("{} 00:00", range.end.format("%Y-%m-%d"));

    let rows = stmt.query_map(params![from, to], map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_shifts(conn: &Connection) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare(&format!("SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_shift(conn: &Connection, id: i64) -> AppResult<Option<Shift>> {
    let shift = conn
        .query_row(
            &format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1"),
            [id],
            map_shift,
        )
        .optional()?;
    Ok(shift)
}

pub fn insert_shift(conn: &Connection, input: &ShiftInput) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO shifts (employee_id, start_time, end_time, notes, cell_text, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.employee_id,
            format_datetime(&input.start),
            format_datetime(&input.end),
            input.notes,
            input.cell_text,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update all fields except id. Returns the number of rows touched.
pub fn update_shift(conn: &Connection, id: i64, input: &ShiftInput) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE shifts
         SET employee_id = ?1, start_time = ?2, end_time = ?3,
             notes = ?4, cell_text = ?5
         WHERE id = ?6",
        params![
            input.employee_id,
            format_datetime(&input.start),
            format_datetime(&input.end),
            input.notes,
            input.cell_text,
            id,
        ],
    )?;
    Ok(n)
}

pub fn delete_shift(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM shifts WHERE id = ?1", [id])?;
    Ok(n)
}

/// Insert a shift keeping its id (snapshot restore).
pub fn insert_shift_with_id(conn: &Connection, shift: &Shift) -> AppResult<()> {
    let (start, end) = match &shift.timing {
        ShiftTiming::Timed { start, end } => (Some(format_datetime(start)), Some(format_datetime(end))),
        ShiftTiming::FreeForm => (None, None),
    };

    conn.execute(
        "INSERT INTO shifts (id, employee_id, start_time, end_time, notes, cell_text, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            shift.id,
            shift.employee_id,
            start,
            end,
            shift.notes,
            shift.cell_text,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}
