use super::*;
use crate::helpers::models::*;

fn create_problem() -> Problem {
    TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .coverage(Workplace::KrgB, Coverage::Daily)
        .coverage(Workplace::KrgBN, Coverage::Daily)
        .anchor(test_date(7, 3), Workplace::KrgMop, "a")
        .build()
}

parameterized_test! {can_evaluate_eligibility, (workplace, expected), {
    let problem = create_problem();
    let roster = create_test_roster(&problem);
    let feature = create_eligibility_feature("eligibility", ELIGIBILITY_CODE).unwrap();

    let result = evaluate_test_feature(&feature, &problem, &roster, 0, workplace, 0);

    assert_eq!(result, expected);
}}

can_evaluate_eligibility! {
    case01_eligible: (Workplace::KrgB, None),
    case02_not_eligible: (Workplace::KrgBN, ConstraintViolation::fail(ELIGIBILITY_CODE)),
}

#[test]
fn can_audit_anchor_with_wrong_workplace() {
    let problem = create_problem();
    let roster = create_test_roster(&problem);
    let feature = create_eligibility_feature("eligibility", ELIGIBILITY_CODE).unwrap();

    let violations = audit_test_feature(&feature, &problem, &roster, 0);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].day, Some(2));
    assert_eq!(violations[0].slots, vec![get_slot(&problem, 2, Workplace::KrgMop).index]);
    assert!(violations[0].details.contains("KRG-MOP"));
}
