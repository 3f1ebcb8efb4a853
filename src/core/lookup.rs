//! `employee id → date → shift` index, rebuilt from scratch on every refresh.

use crate::models::Shift;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftLookup {
    by_employee: BTreeMap<i64, BTreeMap<NaiveDate, Shift>>,
    dropped: usize,
    replaced: usize,
}

impl ShiftLookup {
    /// Single pass over the flat list. Shifts without an employee or a start
    /// time are skipped; a later shift for the same (employee, date) replaces
    /// an earlier one.
    pub fn build(shifts: &[Shift]) -> Self {
        let mut lookup = ShiftLookup::default();

        for shift in shifts {
            let (Some(employee_id), Some(date)) = (shift.employee_id, shift.date_key()) else {
                tracing::warn!(
                    shift_id = shift.id,
                    "shift has no employee or start time, left out of the grid"
                );
                lookup.dropped += 1;
                continue;
            };

            let previous = lookup
                .by_employee
                .entry(employee_id)
                .or_default()
                .insert(date, shift.clone());

            if let Some(prev) = previous {
                tracing::debug!(
                    employee_id,
                    %date,
                    replaced = prev.id,
                    by = shift.id,
                    "duplicate shift for the same day, keeping the later one"
                );
                lookup.replaced += 1;
            }
        }

        tracing::debug!(
            employees = lookup.by_employee.len(),
            shifts = lookup.len(),
            dropped = lookup.dropped,
            "shift lookup rebuilt"
        );
        lookup
    }

    pub fn get(&self, employee_id: i64, date: NaiveDate) -> Option<&Shift> {
        self.by_employee.get(&employee_id)?.get(&date)
    }

    /// All indexed shifts starting on `date`, with their employee id.
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = (i64, &Shift)> + '_ {
        self.by_employee
            .iter()
            .filter_map(move |(emp, days)| days.get(&date).map(|s| (*emp, s)))
    }

    pub fn employee_days(&self, employee_id: i64) -> Option<&BTreeMap<NaiveDate, Shift>> {
        self.by_employee.get(&employee_id)
    }

    pub fn len(&self) -> usize {
        self.by_employee.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shifts skipped while building (no employee or no start time).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Shifts shadowed by a later duplicate.
    pub fn replaced(&self) -> usize {
        self.replaced
    }
}
