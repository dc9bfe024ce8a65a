use super::*;
use crate::helpers::models::*;

#[test]
fn can_create_calendar_with_flags() {
    let holiday = test_date(7, 3);
    let calendar = create_test_calendar_with_holidays(7, &[holiday]);

    assert_eq!(calendar.len(), 7);
    assert_eq!(calendar.start(), test_date(7, 1));
    assert_eq!(calendar.end(), test_date(7, 7));
    assert_eq!(calendar.days().iter().filter(|day| day.is_weekend).count(), 2);
    assert!(calendar.days()[2].is_holiday);
    assert!(!calendar.days()[2].is_workday());
    assert!(calendar.days()[5].is_weekend_or_holiday());
    assert_eq!(calendar.days()[6].weekday(), Weekday::Sunday);
}

#[test]
fn can_reject_invalid_range() {
    let result = Calendar::new(test_date(7, 2), test_date(7, 1), &[]);

    assert!(matches!(result, Err(RosterError::InvalidRange { .. })));
}

#[test]
fn can_create_single_day_calendar() {
    let calendar = Calendar::new(test_date(7, 1), test_date(7, 1), &[]).unwrap();

    assert_eq!(calendar.len(), 1);
    assert!(calendar.weekend_units().is_empty());
}

#[test]
fn can_find_day_index() {
    let calendar = create_test_calendar(7);

    assert_eq!(calendar.index_of(test_date(7, 1)), Some(0));
    assert_eq!(calendar.index_of(test_date(7, 7)), Some(6));
    assert_eq!(calendar.index_of(test_date(7, 8)), None);
    assert_eq!(calendar.index_of(test_date(6, 30)), None);
}

#[test]
fn can_group_days_by_months() {
    let calendar = Calendar::new(test_date(6, 28), test_date(7, 2), &[]).unwrap();

    assert_eq!(calendar.months().len(), 2);
    assert_eq!(calendar.months()[0].month, time::Month::June);
    assert_eq!(calendar.month_days(0), 0..=2);
    assert_eq!(calendar.month_days(1), 3..=4);
    assert_eq!(calendar.days()[3].month, 1);
}

parameterized_test! {can_build_weekend_units, (start, end, expected), {
    can_build_weekend_units_impl(start, end, expected);
}}

can_build_weekend_units! {
    case01_full_weekend: ((7, 1), (7, 7), vec![(5, 6)]),
    case02_lone_sunday_at_start: ((7, 7), (7, 10), vec![(0, 0)]),
    case03_lone_saturday_at_end: ((7, 1), (7, 6), vec![(5, 5)]),
    case04_two_weekends: ((7, 6), (7, 14), vec![(0, 1), (7, 8)]),
    case05_no_weekend: ((7, 1), (7, 5), vec![]),
}

fn can_build_weekend_units_impl(start: (u8, u8), end: (u8, u8), expected: Vec<(usize, usize)>) {
    let calendar = Calendar::new(test_date(start.0, start.1), test_date(end.0, end.1), &[]).unwrap();

    let units = calendar.weekend_units().iter().map(|unit| (unit.first, unit.last)).collect::<Vec<_>>();

    assert_eq!(units, expected);
    expected.iter().enumerate().for_each(|(unit_idx, (first, last))| {
        (*first..=*last).for_each(|day| assert_eq!(calendar.weekend_unit_of(day), Some(unit_idx)));
    });
}
