#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rshiftboard::errors::RepositoryError;
use rshiftboard::models::{Employee, Shift, ShiftInput};
use rshiftboard::repository::{EmployeeDirectory, RepoResult, ShiftRepository};
use rshiftboard::utils::date::DateRange;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsb() -> Command {
    cargo_bin_cmd!("rshiftboard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rshiftboard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small roster:
/// 1 = supervisor, 2 = police, 3 = security.
pub fn init_db_with_roster(db_path: &str) {
    rsb()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (name, title) in [
        ("Sam Stone", "Shift Supervisor"),
        ("Paula Reed", "Police Officer"),
        ("Gus Hale", "Security Guard"),
    ] {
        rsb()
            .args(["--db", db_path, "employee", "add", name, "--title", title])
            .assert()
            .success();
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(d: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
    d.and_hms_opt(h, min, 0).unwrap()
}

/// In-memory store used by engine tests. Individual calls can be made to
/// fail: `reject_dates` rejects writes for those start dates,
/// `fail_list` makes every listing fail.
#[derive(Default)]
pub struct FakeStore {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub next_id: i64,
    pub reject_dates: HashSet<NaiveDate>,
    pub fail_list: Option<String>,
    pub calls: Vec<String>,
}

impl FakeStore {
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        let next_id = shifts.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            employees,
            shifts,
            next_id,
            ..Self::default()
        }
    }

    pub fn shift(&self, id: i64) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    fn check(&self, input: &ShiftInput) -> RepoResult<()> {
        if self.reject_dates.contains(&input.start.date()) {
            return Err(RepositoryError::new(format!(
                "rejected write for {}",
                input.start.date()
            )));
        }
        Ok(())
    }
}

impl ShiftRepository for FakeStore {
    fn list(&mut self, range: &DateRange) -> RepoResult<Vec<Shift>> {
        self.calls.push("list".into());
        if let Some(msg) = &self.fail_list {
            return Err(RepositoryError::new(msg.clone()));
        }
        Ok(self
            .shifts
            .iter()
            .filter(|s| s.date_key().is_some_and(|d| range.contains(d)))
            .cloned()
            .collect())
    }

    fn create(&mut self, input: &ShiftInput) -> RepoResult<Shift> {
        self.calls.push("create".into());
        self.check(input)?;
        let shift = input.clone().into_shift(self.next_id);
        self.next_id += 1;
        self.shifts.push(shift.clone());
        Ok(shift)
    }

    fn update(&mut self, id: i64, input: &ShiftInput) -> RepoResult<Shift> {
        self.calls.push(format!("update {id}"));
        self.check(input)?;
        let slot = self
            .shifts
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepositoryError::new(format!("Shift {id} not found")))?;
        *slot = input.clone().into_shift(id);
        Ok(slot.clone())
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        self.calls.push(format!("delete {id}"));
        let before = self.shifts.len();
        self.shifts.retain(|s| s.id != id);
        if self.shifts.len() == before {
            return Err(RepositoryError::generic());
        }
        Ok(())
    }
}

impl EmployeeDirectory for FakeStore {
    fn list(&mut self) -> RepoResult<Vec<Employee>> {
        if let Some(msg) = &self.fail_list {
            return Err(RepositoryError::new(msg.clone()));
        }
        Ok(self
            .employees
            .iter()
            .filter(|e| e.show_on_schedule)
            .cloned()
            .collect())
    }
}
