use super::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub job_title: String, // ⇔ employees.job_title (free text, kept for display)
    pub role: Role,        // ⇔ employees.role
    pub show_on_schedule: bool,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>, job_title: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            job_title: job_title.into(),
            role,
            show_on_schedule: true,
        }
    }

    /// Build an employee from a legacy record that only has a free-text
    /// job title; the role is derived once, here.
    pub fn from_legacy(
        id: i64,
        name: impl Into<String>,
        job_title: impl Into<String>,
        role_order: &[Role],
    ) -> Self {
        let job_title = job_title.into();
        let role = Role::from_job_title(&job_title, role_order);
        Self::new(id, name, job_title, role)
    }
}

/// Field changes for an existing employee. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub role: Option<Role>,
    pub show_on_schedule: Option<bool>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to `emp`. A new title without an explicit role re-derives the
    /// role from the title; an explicit role always wins.
    pub fn apply(&self, emp: &Employee, role_order: &[Role]) -> Employee {
        let mut out = emp.clone();

        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            out.name = name.to_string();
        }
        if let Some(title) = &self.job_title {
            out.job_title = title.trim().to_string();
            out.role = Role::from_job_title(&out.job_title, role_order);
        }
        if let Some(role) = self.role {
            out.role = role;
        }
        if let Some(show) = self.show_on_schedule {
            out.show_on_schedule = show;
        }
        out
    }
}
