use crate::errors::ValidationError;
use crate::utils::time::format_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Time component of a shift. Instants are viewer-local wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftTiming {
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Imported rows carrying only a label (no times).
    FreeForm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub employee_id: Option<i64>, // ⇔ shifts.employee_id (NULL = unassigned)
    pub timing: ShiftTiming,      // ⇔ shifts.start_time / shifts.end_time
    pub notes: Option<String>,    // ⇔ shifts.notes
    pub cell_text: Option<String>, // ⇔ shifts.cell_text
}

impl Shift {
    pub fn timed(
        id: i64,
        employee_id: Option<i64>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            employee_id,
            timing: ShiftTiming::Timed { start, end },
            notes: None,
            cell_text: None,
        }
    }

    pub fn free_form(id: i64, employee_id: Option<i64>, cell_text: Option<String>) -> Self {
        Self {
            id,
            employee_id,
            timing: ShiftTiming::FreeForm,
            notes: None,
            cell_text,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_cell_text(mut self, text: impl Into<String>) -> Self {
        self.cell_text = Some(text.into());
        self
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        match self.timing {
            ShiftTiming::Timed { start, .. } => Some(start),
            ShiftTiming::FreeForm => None,
        }
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        match self.timing {
            ShiftTiming::Timed { end, .. } => Some(end),
            ShiftTiming::FreeForm => None,
        }
    }

    /// Calendar date the shift is filed under (its start date).
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.start().map(|s| s.date())
    }

    pub fn to_input(&self) -> Option<ShiftInput> {
        match self.timing {
            ShiftTiming::Timed { start, end } => Some(ShiftInput {
                employee_id: self.employee_id,
                start,
                end,
                notes: self.notes.clone(),
                cell_text: self.cell_text.clone(),
            }),
            ShiftTiming::FreeForm => None,
        }
    }
}

/// Payload for create/update calls against a `ShiftRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    pub employee_id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub notes: Option<String>,
    pub cell_text: Option<String>,
}

impl ShiftInput {
    pub fn new(employee_id: i64, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            employee_id: Some(employee_id),
            start,
            end,
            notes: None,
            cell_text: None,
        }
    }

    /// Local checks run before anything is sent to the repository.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.employee_id.is_none() {
            return Err(ValidationError::NoEmployeeSelected);
        }
        if self.end <= self.start {
            return Err(ValidationError::EndNotAfterStart {
                start: format_datetime(&self.start),
                end: format_datetime(&self.end),
            });
        }
        Ok(())
    }

    pub fn into_shift(self, id: i64) -> Shift {
        Shift {
            id,
            employee_id: self.employee_id,
            timing: ShiftTiming::Timed {
                start: self.start,
                end: self.end,
            },
            notes: self.notes,
            cell_text: self.cell_text,
        }
    }
}

/// Trim a free-text field; empty strings count as absent.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}
