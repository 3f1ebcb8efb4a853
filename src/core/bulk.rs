//! Bulk application of a canonical shift template to many grid cells.
//!
//! Two steps: `BulkPlan::prepare` validates the request and turns every
//! target into a create or update item against the current lookup, then
//! `run_plan` dispatches the items one at a time and accumulates the
//! outcome. A failing item never stops the others and nothing is rolled back.

use crate::core::lookup::ShiftLookup;
use crate::errors::ValidationError;
use crate::models::{Shift, ShiftInput, ShiftTemplate};
use crate::models::shift::normalize_text;
use crate::repository::ShiftRepository;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// One selected cell. A missing employee means "the selected employee".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkTarget {
    pub employee_id: Option<i64>,
    pub date: NaiveDate,
}

impl BulkTarget {
    pub fn new(employee_id: i64, date: NaiveDate) -> Self {
        Self {
            employee_id: Some(employee_id),
            date,
        }
    }

    pub fn for_selected(date: NaiveDate) -> Self {
        Self {
            employee_id: None,
            date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedFields {
    pub notes: Option<String>,
    pub cell_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Create,
    Update(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub action: BulkAction,
    pub input: ShiftInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPlan {
    pub template: ShiftTemplate,
    pub items: Vec<WorkItem>,
}

impl BulkPlan {
    pub fn prepare(
        lookup: &ShiftLookup,
        template: ShiftTemplate,
        targets: &[BulkTarget],
        employee_id: Option<i64>,
        shared: &SharedFields,
    ) -> Result<Self, ValidationError> {
        let selected = employee_id.ok_or(ValidationError::NoEmployeeSelected)?;
        if targets.is_empty() {
            return Err(ValidationError::EmptyTargets);
        }

        let notes = normalize_text(shared.notes.clone());
        let cell_text = normalize_text(shared.cell_text.clone());

        let mut items = Vec::with_capacity(targets.len());
        let mut planned: HashSet<(i64, NaiveDate)> = HashSet::new();
        for target in targets {
            let employee_id = target.employee_id.unwrap_or(selected);
            // one item per cell; the first mention wins
            if !planned.insert((employee_id, target.date)) {
                tracing::debug!(employee_id, date = %target.date, "repeated bulk target skipped");
                continue;
            }
            let (start, end) = template.window(target.date);
            let existing = lookup.get(employee_id, target.date);

            // shared fields win; otherwise an update keeps what the shift had
            let input = ShiftInput {
                employee_id: Some(employee_id),
                start,
                end,
                notes: notes
                    .clone()
                    .or_else(|| existing.and_then(|s| s.notes.clone())),
                cell_text: cell_text
                    .clone()
                    .or_else(|| existing.and_then(|s| s.cell_text.clone())),
            };
            input.validate()?;

            items.push(WorkItem {
                employee_id,
                date: target.date,
                action: existing.map_or(BulkAction::Create, |s| BulkAction::Update(s.id)),
                input,
            });
        }

        Ok(Self { template, items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetError {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<TargetError>,
    pub written: Vec<Shift>,
    /// Set when the reload after the writes failed; the view keeps its
    /// previous data and shows this inline.
    pub refresh_error: Option<String>,
}

impl BulkOutcome {
    fn record(&mut self, item: &WorkItem, result: Result<Shift, String>) {
        match result {
            Ok(shift) => {
                self.succeeded += 1;
                self.written.push(shift);
            }
            Err(message) => {
                self.failed += 1;
                self.errors.push(TargetError {
                    employee_id: item.employee_id,
                    date: item.date,
                    message,
                });
            }
        }
    }

    /// The editing surface closes only when something was written.
    pub fn should_close_editor(&self) -> bool {
        self.succeeded > 0
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed == 0 && self.succeeded > 0
    }
}

/// Dispatch every item sequentially, awaiting each before the next.
pub fn run_plan<R>(repo: &mut R, plan: &BulkPlan) -> BulkOutcome
where
    R: ShiftRepository + ?Sized,
{
    let mut outcome = BulkOutcome::default();

    for item in &plan.items {
        let result = match item.action {
            BulkAction::Create => repo.create(&item.input),
            BulkAction::Update(id) => repo.update(id, &item.input),
        };
        outcome.record(item, result.map_err(|e| e.to_string()));
    }

    if outcome.failed > 0 {
        tracing::warn!(
            template = plan.template.as_str(),
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "bulk apply finished with failures"
        );
    } else {
        tracing::info!(
            template = plan.template.as_str(),
            succeeded = outcome.succeeded,
            "bulk apply finished"
        );
    }

    outcome
}

/// Validate, plan and run in one call.
pub fn apply_bulk_shift<R>(
    repo: &mut R,
    lookup: &ShiftLookup,
    template: ShiftTemplate,
    targets: &[BulkTarget],
    employee_id: Option<i64>,
    shared: &SharedFields,
) -> Result<BulkOutcome, ValidationError>
where
    R: ShiftRepository + ?Sized,
{
    let plan = BulkPlan::prepare(lookup, template, targets, employee_id, shared)?;
    Ok(run_plan(repo, &plan))
}
