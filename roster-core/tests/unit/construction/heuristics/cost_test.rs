use super::*;
use crate::helpers::models::*;

parameterized_test! {can_aggregate_values, (values, removed, expected), {
    let mut aggregate = Aggregate::default();
    values.iter().for_each(|value| aggregate.add(*value));
    removed.iter().for_each(|value| aggregate.remove(*value));

    let (sum, variance, range) = expected;

    assert_eq!(aggregate.value(Measure::Sum), sum);
    assert!((aggregate.value(Measure::Variance) - variance).abs() < 1E-9);
    assert_eq!(aggregate.value(Measure::Range), range);
}}

can_aggregate_values! {
    case01_empty: (Vec::<i64>::new(), Vec::<i64>::new(), (0., 0., 0.)),
    case02_same_values: (vec![2, 2, 2], Vec::<i64>::new(), (6., 0., 0.)),
    case03_spread: (vec![1, 3], Vec::<i64>::new(), (4., 1., 2.)),
    case04_removed_extreme: (vec![1, 3, 9], vec![9], (4., 1., 2.)),
    case05_duplicate_extreme: (vec![1, 9, 9], vec![9], (10., 16., 8.)),
    case06_all_removed: (vec![5], vec![5], (0., 0., 0.)),
}

fn create_problem() -> Problem {
    TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .physician(create_test_physician("b", 3, 0, &[Workplace::KrgB]))
        .preference("a", test_date(7, 1), Preference::Workplace(Workplace::KrgB))
        .coverage(Workplace::KrgB, Coverage::WorkdaysOnly)
        .build()
}

#[test]
fn can_update_cost_incrementally() {
    let problem = create_problem();
    let mut roster = create_test_roster(&problem);
    let mut state = CostState::new(&problem, &roster);

    [(0, 0), (1, 1), (2, 0), (3, 0)].iter().for_each(|&(day, physician)| {
        assign_test_slot(&problem, &mut roster, day, Workplace::KrgB, physician);
        state.update(&problem, &roster, physician);
    });

    let expected = CostState::new(&problem, &roster).total(&problem, &roster);

    assert!((state.total(&problem, &roster) - expected).abs() < 1E-9);
}

#[test]
fn can_calculate_cost_breakdown() {
    let problem = create_problem();
    let mut roster = create_test_roster(&problem);
    assign_test_slot(&problem, &mut roster, 0, Workplace::KrgB, 0);
    assign_test_slot(&problem, &mut roster, 1, Workplace::KrgB, 0);
    let state = CostState::new(&problem, &roster);

    let breakdown = state.breakdown(&problem, &roster);
    let get_term = |name: &str| breakdown.iter().find(|term| term.name == name).cloned().unwrap();

    // workloads are 2 and 0, preference of 'a' is met
    assert_eq!(get_term("preferences").cost, -10.);
    assert_eq!(get_term("workload_balance").value, 1.);
    assert_eq!(get_term(UNASSIGNED_TERM).value, 3.);
    assert_eq!(get_term(UNASSIGNED_TERM).cost, 30_000.);
    assert_eq!(get_term(VIOLATIONS_TERM).value, 0.);

    let total = breakdown.iter().map(|term| term.cost).sum::<Cost>();
    assert!((state.total(&problem, &roster) - total).abs() < 1E-9);
}

#[test]
fn can_count_hard_violations() {
    let problem = TestProblemBuilder::default()
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .anchor(test_date(7, 1), Workplace::KrgMop, "a")
        .anchor(test_date(7, 2), Workplace::KrgMop, "a")
        .build();
    let roster = create_test_roster(&problem);

    let state = CostState::new(&problem, &roster);

    assert_eq!(state.violations(), 2);
}

#[test]
fn can_aggregate_large_values_without_overflow() {
    let mut aggregate = Aggregate::default();
    aggregate.add(i64::MAX);
    aggregate.add(i64::MIN);
    aggregate.remove(i64::MIN);

    assert_eq!(aggregate.value(Measure::Sum), i64::MAX as Cost);
    assert_eq!(aggregate.value(Measure::Range), 0.);
    assert!(aggregate.value(Measure::Variance).is_finite());
}

fn create_two_months_problem() -> Problem {
    TestProblemBuilder::default()
        .days(62)
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .physician(create_test_physician("b", 3, 0, &[Workplace::KrgB]))
        .coverage(Workplace::KrgB, Coverage::WorkdaysOnly)
        .build()
}

#[test]
fn can_measure_workload_balance_within_each_month() {
    let problem = create_two_months_problem();
    let mut roster = create_test_roster(&problem);
    // 'a' works four July days, 'b' works four August days: equal over the period, not per month
    [0, 1, 2, 3].iter().for_each(|&day| assign_test_slot(&problem, &mut roster, day, Workplace::KrgB, 0));
    [31, 32, 35, 36].iter().for_each(|&day| assign_test_slot(&problem, &mut roster, day, Workplace::KrgB, 1));

    let state = CostState::new(&problem, &roster);
    let breakdown = state.breakdown(&problem, &roster);
    let workload = breakdown.iter().find(|term| term.name == "workload_balance").cloned().unwrap();

    // workloads are (4, 0) in July and (0, 4) in August, variance is 4 in each month
    assert_eq!(workload.value, 8.);
}

#[test]
fn can_update_month_scoped_cost_incrementally() {
    let problem = create_two_months_problem();
    let mut roster = create_test_roster(&problem);
    let mut state = CostState::new(&problem, &roster);

    [(0, 0), (30, 1), (31, 0), (35, 1), (36, 1)].iter().for_each(|&(day, physician)| {
        assign_test_slot(&problem, &mut roster, day, Workplace::KrgB, physician);
        state.update(&problem, &roster, physician);
    });

    let expected = CostState::new(&problem, &roster);

    assert!((state.total(&problem, &roster) - expected.total(&problem, &roster)).abs() < 1E-9);
    assert_eq!(state.breakdown(&problem, &roster), expected.breakdown(&problem, &roster));
}
