use super::*;
use crate::helpers::*;
use roster_core::models::{Preference, Workplace};
use time::Month;

parameterized_test! {can_parse_date, (value, expected), {
    can_parse_date_impl(value, expected);
}}

can_parse_date! {
    case01_iso: ("2024-07-01", Some((2024, Month::July, 1))),
    case02_dotted: ("15.03.2025", Some((2025, Month::March, 15))),
    case03_spaces: (" 2024-12-31 ", Some((2024, Month::December, 31))),
    case04_invalid_day: ("2024-02-30", None),
    case05_unknown_format: ("07/01/2024", None),
    case06_empty: ("", None),
}

fn can_parse_date_impl(value: &str, expected: Option<(i32, Month, u8)>) {
    let result = parse_date(value).ok();

    assert_eq!(result, expected.map(|(year, month, day)| Date::from_calendar_date(year, month, day).unwrap()));
}

#[test]
fn can_read_problem_from_test_files() {
    let config = read_test_config();

    let problem = read_problem(
        open_test_file(MASTER_SHEET_PATH),
        Some(open_test_file(PREFERENCES_PATH)),
        Some(open_test_file(PARTIAL_ROSTER_PATH)),
        &config,
    )
    .unwrap();

    assert_eq!(problem.calendar.len(), 7);
    assert_eq!(problem.physicians.len(), 3);
    assert_eq!(problem.anchors.len(), 1);
    // five working days of day post and two weekend nights
    assert_eq!(problem.catalogue.len(), 7);
    assert_eq!(problem.catalogue.slots().iter().filter(|slot| slot.workplace == Workplace::KrgB).count(), 5);

    let a = problem.physicians.iter().find(|physician| physician.id == "a").unwrap();
    let date = Date::from_calendar_date(2024, Month::July, 3).unwrap();
    assert_eq!(a.preference_on(date), Some(Preference::DayOff));
}

#[test]
fn can_read_problem_without_optional_inputs() {
    let config = read_test_config();

    let problem = read_problem(open_test_file(MASTER_SHEET_PATH), None, None, &config).unwrap();

    assert!(problem.anchors.is_empty());
    assert!(problem.physicians.iter().all(|physician| physician.preferences.is_empty()));
}

#[test]
fn can_reject_problem_with_unknown_anchor_physician() {
    let config = read_test_config();
    let partial_roster = BufReader::new("DATE\tKRG-B\n2024-07-01\tzz\n".as_bytes());
    let master_sheet = BufReader::new("ID\tWORKPLACES\tYEAR\na\tKRG-B\t3\n".as_bytes());

    let result = read_problem(master_sheet, None, Some(partial_roster), &config);

    assert!(result.is_err());
}

#[test]
fn can_reject_problem_with_inverted_period() {
    let mut config = read_test_config();
    config.end_date = "2024-06-01".to_string();

    let result = read_problem(open_test_file(MASTER_SHEET_PATH), None, None, &config);

    assert!(result.is_err());
}
