use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Canonical shift windows offered by the bulk editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftTemplate {
    Morning,   // 07:00 → 15:00
    Afternoon, // 15:00 → 23:00
    Night,     // 23:00 → 07:00 (+1 day)
}

impl ShiftTemplate {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "morning" | "m" | "1" => Some(ShiftTemplate::Morning),
            "afternoon" | "a" | "2" => Some(ShiftTemplate::Afternoon),
            "night" | "n" | "3" => Some(ShiftTemplate::Night),
            _ => None,
        }
    }

    /// (start hour, end hour)
    pub fn hours(&self) -> (u32, u32) {
        match self {
            ShiftTemplate::Morning => (7, 15),
            ShiftTemplate::Afternoon => (15, 23),
            ShiftTemplate::Night => (23, 7),
        }
    }

    /// Concrete start/end instants for a shift starting on `date`.
    pub fn window(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let (sh, eh) = self.hours();
        let start = date.and_time(NaiveTime::from_hms_opt(sh, 0, 0).unwrap_or(NaiveTime::MIN));
        let mut end = date.and_time(NaiveTime::from_hms_opt(eh, 0, 0).unwrap_or(NaiveTime::MIN));
        if end <= start {
            end += Duration::days(1);
        }
        (start, end)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftTemplate::Morning => "morning",
            ShiftTemplate::Afternoon => "afternoon",
            ShiftTemplate::Night => "night",
        }
    }
}
