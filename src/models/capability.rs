use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Create, edit, delete and bulk-apply shifts.
    #[serde(rename = "scheduling-edit")]
    SchedulingEdit,
    #[serde(rename = "employee-admin")]
    EmployeeAdmin,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SchedulingEdit => "scheduling-edit",
            Capability::EmployeeAdmin => "employee-admin",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "scheduling-edit" => Some(Capability::SchedulingEdit),
            "employee-admin" => Some(Capability::EmployeeAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn editor() -> Self {
        [Capability::SchedulingEdit].into_iter().collect()
    }

    pub fn has(&self, cap: Capability) -> bool {
        self.0.contains(&cap)
    }

    pub fn can_edit_schedule(&self) -> bool {
        self.has(Capability::SchedulingEdit)
    }

    pub fn revoke(&mut self, cap: Capability) {
        self.0.remove(&cap);
    }

    /// Configuration strings, in a stable order.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }

    /// Parse configuration strings; unknown names are ignored.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        names
            .iter()
            .filter_map(|n| Capability::from_str_opt(n.as_ref()))
            .collect()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
