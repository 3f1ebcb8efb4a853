//! Single-shift editor.
//!
//! ```text
//! Unsaved ──open──▶ Editing ──submit ok──▶ Persisted
//!                    │  ▲
//!                    │  └── submit/delete failed (error kept on the form)
//!                    ├──cancel──▶ Cancelled
//!                    └──delete ok──▶ Deleted
//! ```

use crate::core::classifier::{CoverageSlot, slot_for};
use crate::errors::{AppError, AppResult};
use crate::models::shift::normalize_text;
use crate::models::{Shift, ShiftInput, ShiftTemplate};
use crate::repository::ShiftRepository;
use chrono::{NaiveDate, NaiveDateTime};

/// Window proposed for a brand new shift.
pub const DEFAULT_TEMPLATE: ShiftTemplate = ShiftTemplate::Morning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    /// `None` while creating.
    pub shift_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub notes: Option<String>,
    pub cell_text: Option<String>,
    /// Last validation or repository error, shown inline.
    pub error: Option<String>,
}

impl EditForm {
    fn to_input(&self) -> ShiftInput {
        ShiftInput {
            employee_id: self.employee_id,
            start: self.start,
            end: self.end,
            notes: normalize_text(self.notes.clone()),
            cell_text: normalize_text(self.cell_text.clone()),
        }
    }

    pub fn is_new(&self) -> bool {
        self.shift_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Unsaved {
        employee_id: Option<i64>,
        date: NaiveDate,
    },
    Editing(EditForm),
    Persisted(Shift),
    Cancelled,
    Deleted(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftEditor {
    state: EditorState,
}

impl ShiftEditor {
    /// Editor for an empty cell.
    pub fn new(employee_id: Option<i64>, date: NaiveDate) -> Self {
        Self {
            state: EditorState::Unsaved { employee_id, date },
        }
    }

    /// Editor already populated with an existing shift.
    pub fn for_shift(shift: &Shift) -> Self {
        let date = shift.date_key().unwrap_or(NaiveDate::MIN);
        let mut editor = Self::new(shift.employee_id, date);
        editor.open(Some(shift));
        editor
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Unsaved → Editing. Existing values are copied into the form; a new
    /// shift starts from the morning window of the cell's date.
    pub fn open(&mut self, existing: Option<&Shift>) {
        let EditorState::Unsaved { employee_id, date } = self.state else {
            return;
        };

        let form = match existing.and_then(|s| s.to_input().map(|i| (s.id, i))) {
            Some((id, input)) => EditForm {
                shift_id: Some(id),
                employee_id: input.employee_id,
                start: input.start,
                end: input.end,
                notes: input.notes,
                cell_text: input.cell_text,
                error: None,
            },
            None => {
                let (start, end) = DEFAULT_TEMPLATE.window(date);
                EditForm {
                    shift_id: existing.map(|s| s.id),
                    employee_id,
                    start,
                    end,
                    notes: existing.and_then(|s| s.notes.clone()),
                    cell_text: existing.and_then(|s| s.cell_text.clone()),
                    error: None,
                }
            }
        };

        self.state = EditorState::Editing(form);
    }

    pub fn form(&self) -> Option<&EditForm> {
        match &self.state {
            EditorState::Editing(f) => Some(f),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        match &mut self.state {
            EditorState::Editing(f) => Some(f),
            _ => None,
        }
    }

    /// Replace start/end with one of the canonical windows.
    pub fn apply_template(&mut self, template: ShiftTemplate) {
        if let Some(form) = self.form_mut() {
            let (start, end) = template.window(form.start.date());
            form.start = start;
            form.end = end;
        }
    }

    /// Editing → Persisted on success; on failure the editor stays in
    /// Editing with the error on the form and the store untouched.
    pub fn submit<R>(&mut self, repo: &mut R) -> AppResult<Shift>
    where
        R: ShiftRepository + ?Sized,
    {
        let EditorState::Editing(form) = &mut self.state else {
            return Err(AppError::Other("editor is not open".into()));
        };

        let input = form.to_input();
        if let Err(e) = input.validate() {
            form.error = Some(e.to_string());
            return Err(e.into());
        }

        let result = match form.shift_id {
            Some(id) => repo.update(id, &input),
            None => repo.create(&input),
        };

        match result {
            Ok(shift) => {
                self.state = EditorState::Persisted(shift.clone());
                Ok(shift)
            }
            Err(e) => {
                form.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Editing → Cancelled. Nothing is written.
    pub fn cancel(&mut self) {
        if matches!(
            self.state,
            EditorState::Unsaved { .. } | EditorState::Editing(_)
        ) {
            self.state = EditorState::Cancelled;
        }
    }

    /// Editing → Deleted once the store confirms. A new (never saved) shift
    /// has nothing to delete.
    pub fn delete<R>(&mut self, repo: &mut R) -> AppResult<()>
    where
        R: ShiftRepository + ?Sized,
    {
        let EditorState::Editing(form) = &mut self.state else {
            return Err(AppError::Other("editor is not open".into()));
        };

        let Some(id) = form.shift_id else {
            let msg = "Nothing to delete: the shift was never saved".to_string();
            form.error = Some(msg.clone());
            return Err(AppError::Other(msg));
        };

        match repo.delete(id) {
            Ok(()) => {
                self.state = EditorState::Deleted(id);
                Ok(())
            }
            Err(e) => {
                form.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// The caller re-fetches after a save or a confirmed deletion only.
    pub fn needs_refresh(&self) -> bool {
        matches!(
            self.state,
            EditorState::Persisted(_) | EditorState::Deleted(_)
        )
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    pub fn error(&self) -> Option<&str> {
        self.form().and_then(|f| f.error.as_deref())
    }

    /// Coverage slot the form currently falls in, if any.
    pub fn slot_preview(&self) -> Option<CoverageSlot> {
        self.form().and_then(|f| slot_for(&f.start, &f.end))
    }
}
