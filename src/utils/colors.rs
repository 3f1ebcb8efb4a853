/// ANSI color helper utilities for terminal output.
use crate::core::classifier::{CoverageSlot, ShiftLabel};
use crate::core::grid::WeekParity;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Colour of a classification label:
/// slot 1 → green, slot 2 → yellow, slot 3 → blue,
/// override → magenta, other times → cyan, fallback → grey.
pub fn color_for_label(label: &ShiftLabel) -> &'static str {
    match label {
        ShiftLabel::Slot(CoverageSlot::One) => GREEN,
        ShiftLabel::Slot(CoverageSlot::Two) => YELLOW,
        ShiftLabel::Slot(CoverageSlot::Three) => BLUE,
        ShiftLabel::Override(_) => MAGENTA,
        ShiftLabel::TimeRange(_) => CYAN,
        ShiftLabel::Fallback(_) | ShiftLabel::Empty => GREY,
    }
}

/// Odd weeks are dimmed, even weeks use the terminal default.
pub fn color_for_parity(parity: WeekParity) -> &'static str {
    match parity {
        WeekParity::Even => RESET,
        WeekParity::Odd => GREY,
    }
}

/// Wrap `value` in `color`; empty strings are returned as they are.
pub fn paint(value: &str, color: &str) -> String {
    if value.is_empty() || color == RESET {
        value.to_string()
    } else {
        format!("{color}{value}{RESET}")
    }
}
