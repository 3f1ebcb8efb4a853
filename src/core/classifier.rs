//! Shift classification: turns a shift (or an empty cell) into the short
//! label shown in the grid and, for canonical windows, a coverage slot.

use crate::config::default_override_tokens;
use crate::models::{Shift, ShiftTiming};
use crate::utils::time::compact_range;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;

/// One of the three canonical coverage windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CoverageSlot {
    One,   // 07:00 → 15:00
    Two,   // 15:00 → 23:00
    Three, // 23:00 → 07:00
}

impl CoverageSlot {
    pub const ALL: [CoverageSlot; 3] = [CoverageSlot::One, CoverageSlot::Two, CoverageSlot::Three];

    pub fn id(&self) -> &'static str {
        match self {
            CoverageSlot::One => "1",
            CoverageSlot::Two => "2",
            CoverageSlot::Three => "3",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            CoverageSlot::One => 0,
            CoverageSlot::Two => 1,
            CoverageSlot::Three => 2,
        }
    }
}

impl fmt::Display for CoverageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ShiftLabel {
    /// No shift in the cell.
    Empty,
    /// Override token found in the notes, lower-cased.
    Override(String),
    /// Canonical window; the only coverage-eligible label.
    Slot(CoverageSlot),
    /// Timed shift outside the canonical windows.
    TimeRange(String),
    /// No times: truncated cell text / notes, or the placeholder.
    Fallback(String),
}

impl ShiftLabel {
    pub fn text(&self) -> &str {
        match self {
            ShiftLabel::Empty => "",
            ShiftLabel::Override(t) | ShiftLabel::TimeRange(t) | ShiftLabel::Fallback(t) => t,
            ShiftLabel::Slot(s) => s.id(),
        }
    }

    pub fn coverage_slot(&self) -> Option<CoverageSlot> {
        match self {
            ShiftLabel::Slot(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

const NIGHT_MIN_MINUTES: i64 = 6 * 60;
const NIGHT_MAX_MINUTES: i64 = 10 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    /// Upper-cased, longest first.
    override_tokens: Vec<String>,
    fallback_width: usize,
    placeholder: char,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&default_override_tokens(), 4, '*')
    }
}

impl Classifier {
    pub fn new<S: AsRef<str>>(tokens: &[S], fallback_width: usize, placeholder: char) -> Self {
        let mut override_tokens: Vec<String> = Vec::new();
        for t in tokens {
            let t = t.as_ref().trim().to_uppercase();
            if !t.is_empty() && !override_tokens.contains(&t) {
                override_tokens.push(t);
            }
        }
        // stable: equal lengths keep configuration order
        override_tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));

        Self {
            override_tokens,
            fallback_width: fallback_width.max(1),
            placeholder,
        }
    }

    pub fn classify(&self, shift: Option<&Shift>) -> ShiftLabel {
        let Some(shift) = shift else {
            return ShiftLabel::Empty;
        };

        if let Some(token) = shift.notes.as_deref().and_then(|n| self.override_token(n)) {
            return ShiftLabel::Override(token);
        }

        match &shift.timing {
            ShiftTiming::Timed { start, end } => match slot_for(start, end) {
                Some(slot) => ShiftLabel::Slot(slot),
                None => ShiftLabel::TimeRange(compact_range(start, end)),
            },
            ShiftTiming::FreeForm => ShiftLabel::Fallback(self.fallback(shift)),
        }
    }

    fn override_token(&self, notes: &str) -> Option<String> {
        let upper = notes.to_uppercase();
        self.override_tokens
            .iter()
            .find(|t| upper.contains(t.as_str()))
            .map(|t| t.to_lowercase())
    }

    fn fallback(&self, shift: &Shift) -> String {
        let source = [shift.cell_text.as_deref(), shift.notes.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty());

        match source {
            Some(text) => text.chars().take(self.fallback_width).collect(),
            None => self.placeholder.to_string(),
        }
    }
}

/// Canonical window check. Slots 1 and 2 compare clock hours only; slot 3
/// also requires the duration to fall strictly between 6 and 10 hours.
pub fn slot_for(start: &NaiveDateTime, end: &NaiveDateTime) -> Option<CoverageSlot> {
    match (start.hour(), end.hour()) {
        (7, 15) => Some(CoverageSlot::One),
        (15, 23) => Some(CoverageSlot::Two),
        (23, 7) => {
            let minutes = (*end - *start).num_minutes();
            (minutes > NIGHT_MIN_MINUTES && minutes < NIGHT_MAX_MINUTES)
                .then_some(CoverageSlot::Three)
        }
        _ => None,
    }
}
