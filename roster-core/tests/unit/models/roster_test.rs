use super::*;
use crate::helpers::models::*;

parameterized_test! {can_check_coverage, (coverage, day, expected), {
    let calendar = create_test_calendar_with_holidays(7, &[test_date(7, 2)]);

    assert_eq!(coverage.is_covered(&calendar.days()[day]), expected);
}}

can_check_coverage! {
    case01_daily_workday: (Coverage::Daily, 0, true),
    case02_workdays_only_workday: (Coverage::WorkdaysOnly, 0, true),
    case03_workdays_only_holiday: (Coverage::WorkdaysOnly, 1, false),
    case04_workdays_only_weekend: (Coverage::WorkdaysOnly, 5, false),
    case05_weekends_only_holiday: (Coverage::WeekendsAndHolidaysOnly, 1, true),
    case06_weekends_only_workday: (Coverage::WeekendsAndHolidaysOnly, 0, false),
    case07_never: (Coverage::Never, 6, false),
}

#[test]
fn can_create_catalogue_with_required_cells() {
    let calendar = create_test_calendar(7);
    let mut coverage = [Coverage::Never; 9];
    coverage[Workplace::KrgB.index()] = Coverage::WorkdaysOnly;

    let catalogue = SlotCatalogue::new(&calendar, &coverage, &[(5, Workplace::AbdPrip)]);

    assert_eq!(catalogue.len(), 6);
    assert_eq!(catalogue.find(5, Workplace::AbdPrip), Some(5));
    assert_eq!(catalogue.find(5, Workplace::KrgB), None);
    assert_eq!(catalogue.day_slots(0).count(), 1);
    assert!(catalogue.slots().iter().enumerate().all(|(idx, slot)| slot.index == idx));
}

#[test]
fn can_assign_and_unassign_free_slots() {
    let problem = TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .coverage(Workplace::KrgB, Coverage::Daily)
        .build();
    let mut roster = create_test_roster(&problem);
    let slot = get_slot(&problem, 2, Workplace::KrgB);

    assert_eq!(roster.unassigned_count(), 7);

    roster.assign(&slot, 0);

    assert_eq!(roster.assignee(slot.index), Some(0));
    assert_eq!(roster.duties_on(0, 2), &[Duty { slot: slot.index, workplace: Workplace::KrgB }]);
    assert!(roster.is_working(0, 2));
    assert_eq!(roster.duty_count(0), 1);
    assert_eq!(roster.unassigned_count(), 6);

    assert_eq!(roster.unassign(&slot), Some(0));
    assert_eq!(roster.unassign(&slot), None);
    assert!(!roster.is_working(0, 2));
    assert_eq!(roster.unassigned_count(), 7);
}

#[test]
fn can_keep_anchors_untouched() {
    let problem = TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .anchor(test_date(7, 1), Workplace::KrgB, "a")
        .build();
    let mut roster = create_test_roster(&problem);
    let slot = get_slot(&problem, 0, Workplace::KrgB);

    assert!(roster.is_anchored(slot.index));
    assert_eq!(roster.unassign(&slot), None);
    assert_eq!(roster.assignee(slot.index), Some(0));
    assert_eq!(roster.unassigned_count(), 0);
    assert_eq!(roster.duties_of(0).map(|(day, _)| day).collect::<Vec<_>>(), vec![0]);
}
