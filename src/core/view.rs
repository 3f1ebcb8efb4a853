//! Caller-owned state for one displayed month.
//!
//! Holds the last roster, shift list and lookup that were loaded, plus a
//! generation counter: every load takes a ticket, and a response whose
//! ticket is no longer current is discarded instead of overwriting newer
//! state.

use crate::config::Config;
use crate::core::bulk::{BulkOutcome, BulkTarget, SharedFields, apply_bulk_shift};
use crate::core::classifier::Classifier;
use crate::core::conflicts::{ConflictMap, detect_conflicts};
use crate::core::grid::{GridBuilder, GridDescriptor};
use crate::core::lookup::ShiftLookup;
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::{CapabilitySet, Employee, Role, Shift, ShiftTemplate};
use crate::repository::{EmployeeDirectory, ScheduleStore, ShiftRepository};
use crate::utils::date::{DateRange, WeekStart, first_of_month, month_dates};
use chrono::NaiveDate;

/// Everything the grid and the conflict check need besides the data.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    pub classifier: Classifier,
    pub role_order: Vec<Role>,
    pub covering_role: Role,
    pub week_start: WeekStart,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            role_order: vec![Role::Supervisor, Role::Police, Role::Security],
            covering_role: Role::Police,
            week_start: WeekStart::default(),
        }
    }
}

impl From<&Config> for ScheduleSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            classifier: cfg.classifier(),
            role_order: cfg.role_order.clone(),
            covering_role: cfg.covering_role,
            week_start: cfg.week_start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    month: NaiveDate,
}

impl LoadTicket {
    pub fn month(&self) -> NaiveDate {
        self.month
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Nothing was ever loaded: the whole view shows the error and a retry.
    Full(String),
    /// A later load failed: previous data stays on screen.
    Inline(String),
}

impl ViewError {
    pub fn message(&self) -> &str {
        match self {
            ViewError::Full(m) | ViewError::Inline(m) => m,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewError::Full(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Applied,
    /// Superseded by a newer request; the response was ignored.
    Stale,
    Failed(ViewError),
}

#[derive(Debug, Clone)]
pub struct ScheduleView {
    month: NaiveDate,
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
    lookup: ShiftLookup,
    generation: u64,
    loaded: bool,
    error: Option<ViewError>,
}

impl ScheduleView {
    pub fn new(month: NaiveDate) -> Self {
        Self {
            month: first_of_month(month),
            employees: Vec::new(),
            shifts: Vec::new(),
            lookup: ShiftLookup::default(),
            generation: 0,
            loaded: false,
            error: None,
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        month_dates(self.month)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn lookup(&self) -> &ShiftLookup {
        &self.lookup
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Start a load for `month`; any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self, month: NaiveDate) -> LoadTicket {
        self.generation += 1;
        self.month = first_of_month(month);
        LoadTicket {
            generation: self.generation,
            month: self.month,
        }
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<(Vec<Employee>, Vec<Shift>), RepositoryError>,
    ) -> LoadStatus {
        if ticket.generation != self.generation || ticket.month != self.month {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale schedule response"
            );
            return LoadStatus::Stale;
        }

        match result {
            Ok((employees, shifts)) => {
                self.lookup = ShiftLookup::build(&shifts);
                self.employees = employees;
                self.shifts = shifts;
                self.loaded = true;
                self.error = None;
                LoadStatus::Applied
            }
            Err(e) => {
                let err = if self.loaded {
                    ViewError::Inline(e.to_string())
                } else {
                    ViewError::Full(e.to_string())
                };
                self.error = Some(err.clone());
                LoadStatus::Failed(err)
            }
        }
    }

    /// Fetch roster and shifts for `month` and apply them.
    pub fn load<S>(&mut self, month: NaiveDate, store: &mut S) -> LoadStatus
    where
        S: ScheduleStore + ?Sized,
    {
        let ticket = self.begin_load(month);
        let range = DateRange::month_of(ticket.month());
        let result = match EmployeeDirectory::list(&mut *store) {
            Ok(employees) => ShiftRepository::list(&mut *store, &range).map(|shifts| (employees, shifts)),
            Err(e) => Err(e),
        };
        self.complete_load(ticket, result)
    }

    /// Reload the current month.
    pub fn refresh<S>(&mut self, store: &mut S) -> LoadStatus
    where
        S: ScheduleStore + ?Sized,
    {
        self.load(self.month, store)
    }

    pub fn conflicts(&self, settings: &ScheduleSettings) -> ConflictMap {
        detect_conflicts(
            &self.dates(),
            &self.lookup,
            &self.employees,
            settings.covering_role,
            &settings.classifier,
        )
    }

    /// Grid for the current month, annotated with coverage conflicts.
    pub fn grid(&self, settings: &ScheduleSettings, capabilities: &CapabilitySet) -> GridDescriptor {
        let conflicts = self.conflicts(settings);
        GridBuilder::new(&settings.classifier, &settings.role_order)
            .week_start(settings.week_start)
            .build(&self.employees, &self.dates(), &self.lookup, capabilities)
            .with_conflicts(&conflicts)
    }

    /// Bulk apply against the current lookup, then refresh whatever the
    /// outcome was.
    pub fn apply_bulk<S>(
        &mut self,
        store: &mut S,
        capabilities: &CapabilitySet,
        template: ShiftTemplate,
        targets: &[BulkTarget],
        employee_id: Option<i64>,
        shared: &SharedFields,
    ) -> AppResult<BulkOutcome>
    where
        S: ScheduleStore + ?Sized,
    {
        if !capabilities.can_edit_schedule() {
            return Err(AppError::PermissionDenied(
                "bulk apply requires the scheduling-edit capability".into(),
            ));
        }

        let mut outcome =
            apply_bulk_shift(&mut *store, &self.lookup, template, targets, employee_id, shared)?;

        match self.refresh(store) {
            LoadStatus::Failed(e) => {
                tracing::warn!(error = %e.message(), "refresh after bulk apply failed");
                outcome.refresh_error = Some(e.message().to_string());
            }
            LoadStatus::Applied | LoadStatus::Stale => {}
        }
        Ok(outcome)
    }
}
