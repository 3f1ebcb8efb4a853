mod common;
use common::{at, date};

use rshiftboard::core::lookup::ShiftLookup;
use rshiftboard::models::Shift;

fn sample() -> Vec<Shift> {
    let d1 = date(2025, 3, 1);
    let d2 = date(2025, 3, 2);
    vec![
        Shift::timed(1, Some(10), at(d1, 7, 0), at(d1, 15, 0)),
        Shift::timed(2, Some(10), at(d2, 15, 0), at(d2, 23, 0)),
        Shift::timed(3, Some(20), at(d1, 23, 0), at(d2, 7, 0)),
        // unassigned and time-less rows are left out
        Shift::timed(4, None, at(d1, 7, 0), at(d1, 15, 0)),
        Shift::free_form(5, Some(20), Some("OFF".into())),
    ]
}

#[test]
fn test_get_returns_exact_shift() {
    let lookup = ShiftLookup::build(&sample());

    assert_eq!(lookup.get(10, date(2025, 3, 1)).map(|s| s.id), Some(1));
    assert_eq!(lookup.get(10, date(2025, 3, 2)).map(|s| s.id), Some(2));
    // night shift is filed under its start date
    assert_eq!(lookup.get(20, date(2025, 3, 1)).map(|s| s.id), Some(3));
    assert!(lookup.get(20, date(2025, 3, 2)).is_none());
    assert!(lookup.get(99, date(2025, 3, 1)).is_none());
}

#[test]
fn test_incomplete_shifts_are_dropped() {
    let lookup = ShiftLookup::build(&sample());
    assert_eq!(lookup.len(), 3);
    assert_eq!(lookup.dropped(), 2);
}

#[test]
fn test_build_is_idempotent() {
    let shifts = sample();
    assert_eq!(ShiftLookup::build(&shifts), ShiftLookup::build(&shifts));
}

#[test]
fn test_duplicate_day_keeps_last() {
    let d = date(2025, 3, 5);
    let shifts = vec![
        Shift::timed(1, Some(10), at(d, 7, 0), at(d, 15, 0)),
        Shift::timed(2, Some(10), at(d, 9, 0), at(d, 17, 0)),
    ];
    let lookup = ShiftLookup::build(&shifts);

    assert_eq!(lookup.get(10, d).map(|s| s.id), Some(2));
    assert_eq!(lookup.replaced(), 1);
    assert_eq!(lookup.len(), 1);
}

#[test]
fn test_on_date_lists_every_employee() {
    let lookup = ShiftLookup::build(&sample());
    let mut ids: Vec<i64> = lookup.on_date(date(2025, 3, 1)).map(|(e, _)| e).collect();
    ids.sort();
    assert_eq!(ids, vec![10, 20]);
    assert!(ShiftLookup::build(&[]).is_empty());
}

#[test]
fn test_employee_days_are_ordered() {
    let lookup = ShiftLookup::build(&sample());
    let days: Vec<_> = lookup
        .employee_days(10)
        .map(|m| m.keys().copied().collect())
        .unwrap_or_default();
    assert_eq!(days, vec![date(2025, 3, 1), date(2025, 3, 2)]);
    assert!(lookup.employee_days(99).is_none());
}
