//! Coverage check: which (date, slot) pairs have nobody of the covering role.

use crate::core::classifier::{Classifier, CoverageSlot};
use crate::core::lookup::ShiftLookup;
use crate::models::{Employee, Role};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictMap {
    covering_role: Option<Role>,
    /// `true` = slot covered.
    presence: BTreeMap<NaiveDate, [bool; 3]>,
}

impl ConflictMap {
    pub fn covering_role(&self) -> Option<Role> {
        self.covering_role
    }

    pub fn is_conflicted(&self, date: NaiveDate, slot: CoverageSlot) -> bool {
        self.presence
            .get(&date)
            .is_some_and(|p| !p[slot.index()])
    }

    pub fn conflicted_slots(&self, date: NaiveDate) -> Vec<CoverageSlot> {
        CoverageSlot::ALL
            .into_iter()
            .filter(|s| self.is_conflicted(date, *s))
            .collect()
    }

    pub fn has_conflict_on(&self, date: NaiveDate) -> bool {
        !self.conflicted_slots(date).is_empty()
    }

    /// Conflicted (date, slot) pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, CoverageSlot)> + '_ {
        self.presence.iter().flat_map(|(date, p)| {
            CoverageSlot::ALL
                .into_iter()
                .filter(move |s| !p[s.index()])
                .map(move |s| (*date, s))
        })
    }

    pub fn total(&self) -> usize {
        self.iter().count()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.presence.keys()
    }
}

/// For every date and slot, flag the slot when no employee of
/// `covering_role` holds a shift classified into it. Only canonical-window
/// labels count; overrides, time ranges and free-form labels never do.
pub fn detect_conflicts(
    dates: &[NaiveDate],
    lookup: &ShiftLookup,
    roster: &[Employee],
    covering_role: Role,
    classifier: &Classifier,
) -> ConflictMap {
    let covering: HashSet<i64> = roster
        .iter()
        .filter(|e| e.role == covering_role)
        .map(|e| e.id)
        .collect();

    let mut presence = BTreeMap::new();

    for date in dates {
        let mut present = [false; 3];

        for (employee_id, shift) in lookup.on_date(*date) {
            if !covering.contains(&employee_id) {
                continue;
            }
            if let Some(slot) = classifier.classify(Some(shift)).coverage_slot() {
                present[slot.index()] = true;
            }
        }

        presence.insert(*date, present);
    }

    ConflictMap {
        covering_role: Some(covering_role),
        presence,
    }
}
