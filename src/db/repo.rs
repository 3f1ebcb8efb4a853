//! SQLite-backed implementations of the repository seams.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, RepositoryError};
use crate::models::{Employee, Shift, ShiftInput};
use crate::repository::{EmployeeDirectory, RepoResult, ShiftRepository};
use crate::utils::date::DateRange;

pub struct SqliteStore {
    pool: DbPool,
}

fn repo_err(e: AppError) -> RepositoryError {
    match e {
        AppError::Repository(r) => r,
        other => RepositoryError::new(other.to_string()),
    }
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    fn check_employee(&self, input: &ShiftInput) -> RepoResult<()> {
        if let Some(id) = input.employee_id
            && !queries::employee_exists(&self.pool.conn, id).map_err(repo_err)?
        {
            return Err(RepositoryError::new(format!(
                "Employee with ID {} not found",
                id
            )));
        }
        Ok(())
    }
}

impl ShiftRepository for SqliteStore {
    fn list(&mut self, range: &DateRange) -> RepoResult<Vec<Shift>> {
        queries::load_shifts_in_range(&self.pool.conn, range).map_err(repo_err)
    }

    fn create(&mut self, input: &ShiftInput) -> RepoResult<Shift> {
        self.check_employee(input)?;
        let id = queries::insert_shift(&self.pool.conn, input).map_err(repo_err)?;
        tracing::debug!(id, "shift created");
        Ok(input.clone().into_shift(id))
    }

    fn update(&mut self, id: i64, input: &ShiftInput) -> RepoResult<Shift> {
        self.check_employee(input)?;
        let n = queries::update_shift(&self.pool.conn, id, input).map_err(repo_err)?;
        if n == 0 {
            return Err(RepositoryError::new(format!("Shift {} not found", id)));
        }
        tracing::debug!(id, "shift updated");
        Ok(input.clone().into_shift(id))
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        let n = queries::delete_shift(&self.pool.conn, id).map_err(repo_err)?;
        if n == 0 {
            return Err(RepositoryError::new(format!("Shift {} not found", id)));
        }
        Ok(())
    }
}

impl EmployeeDirectory for SqliteStore {
    fn list(&mut self) -> RepoResult<Vec<Employee>> {
        queries::list_employees(&self.pool.conn, true).map_err(repo_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::NaiveDate;

    fn store_with_employee() -> (SqliteStore, i64) {
        let pool = DbPool::in_memory().unwrap();
        let emp = Employee::new(0, "Ada", "Officer", Role::Police);
        let id = queries::insert_employee(&pool.conn, &emp).unwrap();
        (SqliteStore::new(pool), id)
    }

    fn input(emp: i64, day: u32, h1: u32, h2: u32) -> ShiftInput {
        let d = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        ShiftInput::new(emp, d.and_hms_opt(h1, 0, 0).unwrap(), d.and_hms_opt(h2, 0, 0).unwrap())
    }

    #[test]
    fn create_then_list_in_month() {
        let (mut store, emp) = store_with_employee();
        let created = store.create(&input(emp, 4, 7, 15)).unwrap();

        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let listed = ShiftRepository::list(&mut store, &range).unwrap();
        assert_eq!(listed, vec![created]);

        let april = DateRange::month_of(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert!(ShiftRepository::list(&mut store, &april).unwrap().is_empty());
    }

    #[test]
    fn unknown_employee_is_rejected() {
        let (mut store, _) = store_with_employee();
        let err = store.create(&input(999, 4, 7, 15)).unwrap_err();
        assert_eq!(err.message(), Some("Employee with ID 999 not found"));
    }

    #[test]
    fn update_and_delete_missing_shift_fail() {
        let (mut store, emp) = store_with_employee();
        assert!(store.update(42, &input(emp, 4, 7, 15)).is_err());
        assert!(store.delete(42).is_err());
    }
}
