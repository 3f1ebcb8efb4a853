//! Seams to the outside world: shift store, roster source, caller identity.

use crate::errors::RepositoryError;
use crate::models::{CapabilitySet, Employee, Shift, ShiftInput};
use crate::utils::date::DateRange;

pub type RepoResult<T> = Result<T, RepositoryError>;

pub trait ShiftRepository {
    /// Shifts whose start date falls inside `range`.
    fn list(&mut self, range: &DateRange) -> RepoResult<Vec<Shift>>;
    fn create(&mut self, input: &ShiftInput) -> RepoResult<Shift>;
    fn update(&mut self, id: i64, input: &ShiftInput) -> RepoResult<Shift>;
    fn delete(&mut self, id: i64) -> RepoResult<()>;
}

pub trait EmployeeDirectory {
    /// Employees flagged as visible on the schedule, in roster order.
    fn list(&mut self) -> RepoResult<Vec<Employee>>;
}

/// A store that serves both the roster and the shifts.
pub trait ScheduleStore: EmployeeDirectory + ShiftRepository {}

impl<T: EmployeeDirectory + ShiftRepository + ?Sized> ScheduleStore for T {}

pub trait AuthContext {
    fn capabilities(&self) -> CapabilitySet;

    fn can_edit_schedule(&self) -> bool {
        self.capabilities().can_edit_schedule()
    }
}

/// Capability set fixed at start-up (from the configuration file).
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    capabilities: CapabilitySet,
}

impl StaticAuth {
    pub fn new(capabilities: CapabilitySet) -> Self {
        Self { capabilities }
    }
}

impl AuthContext for StaticAuth {
    fn capabilities(&self) -> CapabilitySet {
        self.capabilities.clone()
    }
}
