//! Render-agnostic grid plan for one displayed month.
//!
//! Layout:
//! - rows 0 and 1 are headers (day numbers, weekday abbreviations);
//! - every employee takes two rows (classification label, literal cell text);
//! - a separator row is inserted where the role group changes.
//!
//! The builder is a pure function of its inputs, so a month switch simply
//! builds a new descriptor.

use crate::core::classifier::{Classifier, CoverageSlot, ShiftLabel};
use crate::core::conflicts::ConflictMap;
use crate::core::lookup::ShiftLookup;
use crate::models::{CapabilitySet, Employee, Role};
use crate::utils::date::{WeekStart, first_of_month, weekday_abbrev};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const HEADER_ROWS: usize = 2;
pub const TOOLTIP_ADD: &str = "Click to add shift";
pub const TOOLTIP_EMPTY: &str = "No shift";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Even,
    Odd,
}

impl WeekParity {
    pub fn class(&self) -> &'static str {
        match self {
            WeekParity::Even => "even",
            WeekParity::Odd => "odd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub day: u32,
    pub weekday: &'static str,
    pub parity: WeekParity,
    pub conflicts: Vec<CoverageSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub date: NaiveDate,
    pub shift_id: Option<i64>,
    pub label: ShiftLabel,
    pub text: String,
    pub tooltip: String,
    pub interactive: bool,
    pub parity: WeekParity,
    pub conflict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowBlock {
    pub employee_id: i64,
    pub name: String,
    pub job_title: String,
    pub group: Role,
    /// Grid row holding the classification labels.
    pub label_row: usize,
    /// Grid row holding the literal cell text.
    pub text_row: usize,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridRow {
    Separator { row: usize, group: Role },
    Employee(RowBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridDescriptor {
    pub month: NaiveDate,
    /// First day of the calendar week containing day 1. Informational only:
    /// parity bands are counted from day 1, not from this anchor.
    pub week_anchor: NaiveDate,
    pub days: Vec<DayHeader>,
    pub rows: Vec<GridRow>,
    pub row_count: usize,
    pub editable: bool,
}

impl GridDescriptor {
    pub fn employee_blocks(&self) -> impl Iterator<Item = &RowBlock> {
        self.rows.iter().filter_map(|r| match r {
            GridRow::Employee(b) => Some(b),
            GridRow::Separator { .. } => None,
        })
    }

    pub fn separator_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, GridRow::Separator { .. }))
            .count()
    }

    pub fn block(&self, employee_id: i64) -> Option<&RowBlock> {
        self.employee_blocks().find(|b| b.employee_id == employee_id)
    }

    pub fn cell(&self, employee_id: i64, date: NaiveDate) -> Option<&Cell> {
        self.block(employee_id)?.cells.iter().find(|c| c.date == date)
    }

    /// Mark conflicted slots on the day headers and flag the cells of
    /// covering-role employees on those dates.
    pub fn annotate(&mut self, conflicts: &ConflictMap) {
        for day in &mut self.days {
            day.conflicts = conflicts.conflicted_slots(day.date);
        }

        let Some(covering) = conflicts.covering_role() else {
            return;
        };

        for row in &mut self.rows {
            let GridRow::Employee(block) = row else {
                continue;
            };
            if block.group != covering {
                continue;
            }
            for cell in &mut block.cells {
                cell.conflict = conflicts.has_conflict_on(cell.date);
            }
        }
    }

    pub fn with_conflicts(mut self, conflicts: &ConflictMap) -> Self {
        self.annotate(conflicts);
        self
    }
}

pub struct GridBuilder<'a> {
    classifier: &'a Classifier,
    role_order: &'a [Role],
    week_start: WeekStart,
}

impl<'a> GridBuilder<'a> {
    pub fn new(classifier: &'a Classifier, role_order: &'a [Role]) -> Self {
        Self {
            classifier,
            role_order,
            week_start: WeekStart::default(),
        }
    }

    pub fn week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Group used for ordering: roles missing from the precedence list fall
    /// into `Other`.
    fn group_of(&self, employee: &Employee) -> (usize, Role) {
        match self
            .role_order
            .iter()
            .position(|r| *r == employee.role && *r != Role::Other)
        {
            Some(rank) => (rank, employee.role),
            None => (self.role_order.len(), Role::Other),
        }
    }

    pub fn build(
        &self,
        employees: &[Employee],
        dates: &[NaiveDate],
        lookup: &ShiftLookup,
        capabilities: &CapabilitySet,
    ) -> GridDescriptor {
        let month = dates
            .first()
            .map(|d| first_of_month(*d))
            .unwrap_or(NaiveDate::MIN);
        let editable = capabilities.can_edit_schedule();

        let days: Vec<DayHeader> = dates
            .iter()
            .map(|d| DayHeader {
                date: *d,
                day: d.day(),
                weekday: weekday_abbrev(*d),
                parity: week_parity(*d, month),
                conflicts: Vec::new(),
            })
            .collect();

        let mut ordered: Vec<(usize, Role, &Employee)> = employees
            .iter()
            .map(|e| {
                let (rank, group) = self.group_of(e);
                (rank, group, e)
            })
            .collect();
        // stable: roster order is kept inside a group
        ordered.sort_by_key(|(rank, _, _)| *rank);

        let mut rows = Vec::with_capacity(ordered.len() + self.role_order.len());
        let mut next_row = HEADER_ROWS;
        let mut previous_group: Option<Role> = None;

        for (_, group, employee) in ordered {
            if previous_group.is_some_and(|g| g != group) {
                rows.push(GridRow::Separator {
                    row: next_row,
                    group,
                });
                next_row += 1;
            }
            previous_group = Some(group);

            let cells = days
                .iter()
                .map(|day| self.cell(employee, day, lookup, editable))
                .collect();

            rows.push(GridRow::Employee(RowBlock {
                employee_id: employee.id,
                name: employee.name.clone(),
                job_title: employee.job_title.clone(),
                group,
                label_row: next_row,
                text_row: next_row + 1,
                cells,
            }));
            next_row += 2;
        }

        GridDescriptor {
            month,
            week_anchor: self.week_start.week_of(month),
            days,
            rows,
            row_count: next_row,
            editable,
        }
    }

    fn cell(
        &self,
        employee: &Employee,
        day: &DayHeader,
        lookup: &ShiftLookup,
        editable: bool,
    ) -> Cell {
        let shift = lookup.get(employee.id, day.date);
        let label = self.classifier.classify(shift);

        let notes = shift.and_then(|s| non_empty(s.notes.as_deref()));
        let text = shift.and_then(|s| non_empty(s.cell_text.as_deref()));

        let tooltip = match (notes, text) {
            (Some(n), _) => n.to_string(),
            (None, Some(t)) => t.to_string(),
            (None, None) if editable => TOOLTIP_ADD.to_string(),
            (None, None) => TOOLTIP_EMPTY.to_string(),
        };

        Cell {
            date: day.date,
            shift_id: shift.map(|s| s.id),
            label,
            text: text.unwrap_or_default().to_string(),
            tooltip,
            interactive: editable,
            parity: day.parity,
            conflict: false,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Zebra striping in 7-day bands starting at day 1 of the displayed month:
/// days 1–7 are even, 8–14 odd, and so on; days before the month continue
/// the alternation backwards.
pub fn week_parity(date: NaiveDate, month: NaiveDate) -> WeekParity {
    let offset = (date - first_of_month(month)).num_days();
    if offset.div_euclid(7).rem_euclid(2) == 0 {
        WeekParity::Even
    } else {
        WeekParity::Odd
    }
}

/// Convenience wrapper with the default classifier and a Sunday week start.
pub fn build_grid(
    employees: &[Employee],
    dates: &[NaiveDate],
    lookup: &ShiftLookup,
    role_order: &[Role],
    capabilities: &CapabilitySet,
) -> GridDescriptor {
    let classifier = Classifier::default();
    GridBuilder::new(&classifier, role_order).build(employees, dates, lookup, capabilities)
}
