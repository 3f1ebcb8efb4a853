use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Supervisor,
    Police,
    Security,
    Dispatcher,
    Other,
}

impl Role {
    pub const NAMED: [Role; 4] = [
        Role::Supervisor,
        Role::Police,
        Role::Security,
        Role::Dispatcher,
    ];

    /// Token searched for in legacy job titles, also the DB value.
    pub fn token(&self) -> &'static str {
        match self {
            Role::Supervisor => "supervisor",
            Role::Police => "police",
            Role::Security => "security",
            Role::Dispatcher => "dispatcher",
            Role::Other => "other",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.token()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "supervisor" => Some(Role::Supervisor),
            "police" => Some(Role::Police),
            "security" => Some(Role::Security),
            "dispatcher" => Some(Role::Dispatcher),
            "other" => Some(Role::Other),
            _ => None,
        }
    }

    /// Helper: parse user input (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(code.trim().to_lowercase().as_str())
    }

    /// One-time adapter for free-text job titles: the first role of `order`
    /// whose token appears (case-insensitively) in the title, `Other` if none.
    pub fn from_job_title(title: &str, order: &[Role]) -> Self {
        let lowered = title.to_lowercase();
        order
            .iter()
            .copied()
            .filter(|r| *r != Role::Other)
            .find(|r| lowered.contains(r.token()))
            .unwrap_or(Role::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Supervisor => "Supervisors",
            Role::Police => "Police",
            Role::Security => "Security",
            Role::Dispatcher => "Dispatch",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
