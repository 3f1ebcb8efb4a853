//! Point-in-time copies of the whole shift table, stored as JSON.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::Shift;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub id: i64,
    pub created_at: String,
    pub description: String,
    pub shift_count: usize,
}

/// Serialize every shift into a new snapshot row. Returns its id.
pub fn save_snapshot(pool: &mut DbPool, description: &str) -> AppResult<i64> {
    let shifts = queries::load_all_shifts(&pool.conn)?;
    let data = serde_json::to_string(&shifts)?;

    let description = if description.trim().is_empty() {
        "Snapshot"
    } else {
        description.trim()
    };

    pool.conn.execute(
        "INSERT INTO snapshots (created_at, description, data) VALUES (?1, ?2, ?3)",
        params![Local::now().to_rfc3339(), description, data],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

/// Newest first.
pub fn list_snapshots(pool: &mut DbPool) -> AppResult<Vec<SnapshotInfo>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, created_at, description, data FROM snapshots ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let data: String = row.get(3)?;
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, data))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, created_at, description, data): (i64, String, String, String) = r?;
        let shift_count = serde_json::from_str::<Vec<Shift>>(&data)
            .map(|v| v.len())
            .unwrap_or(0);
        out.push(SnapshotInfo {
            id,
            created_at,
            description,
            shift_count,
        });
    }
    Ok(out)
}

/// Replace all shifts with the snapshot's content. Runs in one transaction:
/// either every shift is restored or nothing changes. Shifts of employees
/// deleted since the snapshot was taken are skipped.
pub fn restore_snapshot(pool: &mut DbPool, id: i64) -> AppResult<usize> {
    let data: Option<String> = pool
        .conn
        .query_row("SELECT data FROM snapshots WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .optional()?;

    let data = data.ok_or(AppError::SnapshotNotFound(id))?;
    let shifts: Vec<Shift> = serde_json::from_str(&data)?;

    let tx = pool.conn.transaction()?;
    tx.execute("DELETE FROM shifts", [])?;

    let mut restored = 0;
    for shift in &shifts {
        if let Some(emp) = shift.employee_id
            && !queries::employee_exists(&tx, emp)?
        {
            tracing::warn!(shift = shift.id, employee = emp, "employee gone, shift not restored");
            continue;
        }
        queries::insert_shift_with_id(&tx, shift)?;
        restored += 1;
    }
    tx.commit()?;

    tracing::info!(snapshot = id, restored, skipped = shifts.len() - restored, "snapshot restored");
    Ok(restored)
}
