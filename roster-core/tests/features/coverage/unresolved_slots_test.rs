use crate::helpers::models::*;
use crate::helpers::solver::*;
use crate::models::*;
use crate::utils::RosterError;

#[test]
fn can_report_slots_nobody_can_take() {
    let problem = TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgBN]))
        .preference("a", test_date(7, 2), Preference::Unavailable)
        .preference("a", test_date(7, 4), Preference::Unavailable)
        .coverage(Workplace::KrgBN, Coverage::WorkdaysOnly)
        .build_shared();

    let solution = solve_test_problem(problem, 0, create_test_search_config(200));

    let unresolved = solution.unresolved.iter().map(|slot| slot.date).collect::<Vec<_>>();
    assert_eq!(unresolved, vec![test_date(7, 2), test_date(7, 4)]);
    assert!(solution.unresolved.iter().all(|slot| {
        slot.blockers.first().is_some_and(|blocker| blocker.rule == "availability" && blocker.physicians == 1)
    }));

    let min_nights = solution.violations.iter().find(|violation| violation.rule == "min_nights").expect("no min nights");
    assert_eq!(min_nights.physician, "a");
    assert_eq!(min_nights.amount, 1);
    assert!(!min_nights.is_anchored);

    match solution.ensure_complete() {
        Err(RosterError::InfeasibleSlot { slots }) => {
            assert_eq!(slots, vec!["2024-07-02 KRG-B-N".to_string(), "2024-07-04 KRG-B-N".to_string()])
        }
        other => unreachable!("unexpected result: {other:?}"),
    }
}
