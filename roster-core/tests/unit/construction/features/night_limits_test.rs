use super::*;
use crate::helpers::models::*;

fn create_problem(days: usize) -> Problem {
    TestProblemBuilder::default()
        .days(days)
        .physician(create_test_physician("a", 6, 2, &[Workplace::KrgB, Workplace::KrgBN]))
        .coverage(Workplace::KrgB, Coverage::Daily)
        .coverage(Workplace::KrgBN, Coverage::Daily)
        .build()
}

fn create_feature() -> Feature {
    create_night_limits_feature("night_limits", MAX_NIGHTS_CODE, MIN_NIGHTS_CODE).unwrap()
}

#[test]
fn can_block_night_above_maximum() {
    let problem = create_problem(7);
    let mut roster = create_test_roster(&problem);
    [0, 2, 4].iter().for_each(|day| assign_test_slot(&problem, &mut roster, *day, Workplace::KrgBN, 0));
    let feature = create_feature();

    assert_eq!(
        evaluate_test_feature(&feature, &problem, &roster, 6, Workplace::KrgBN, 0),
        ConstraintViolation::fail(MAX_NIGHTS_CODE)
    );
    assert_eq!(evaluate_test_feature(&feature, &problem, &roster, 6, Workplace::KrgB, 0), None);
}

#[test]
fn can_count_nights_per_month() {
    let problem = create_problem(35);
    let mut roster = create_test_roster(&problem);
    [0, 2, 4].iter().for_each(|day| assign_test_slot(&problem, &mut roster, *day, Workplace::KrgBN, 0));
    let feature = create_feature();

    assert_eq!(evaluate_test_feature(&feature, &problem, &roster, 31, Workplace::KrgBN, 0), None);
}

#[test]
fn can_audit_missing_nights() {
    let problem = create_problem(7);
    let roster = create_test_roster(&problem);

    let violations = audit_test_feature(&create_feature(), &problem, &roster, 0);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, MIN_NIGHTS_CODE);
    assert_eq!(violations[0].amount, 1);
    assert!(violations[0].slots.is_empty());
}

#[test]
fn can_audit_excessive_nights() {
    let problem = create_problem(7);
    let mut roster = create_test_roster(&problem);
    [0, 1, 2, 3].iter().for_each(|day| assign_test_slot(&problem, &mut roster, *day, Workplace::KrgBN, 0));

    let violations = audit_test_feature(&create_feature(), &problem, &roster, 0);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, MAX_NIGHTS_CODE);
    assert_eq!(violations[0].amount, 1);
    assert_eq!(violations[0].slots.len(), 4);
}
