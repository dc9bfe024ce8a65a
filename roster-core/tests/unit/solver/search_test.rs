use super::*;
use crate::helpers::models::*;
use crate::helpers::utils::{FakeRandom, create_test_environment};
use crate::models::*;
use crate::utils::DefaultRandom;

fn create_two_physician_problem(days: usize) -> Arc<Problem> {
    TestProblemBuilder::default()
        .days(days)
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .physician(create_test_physician("b", 3, 0, &[Workplace::KrgB]))
        .preference("b", test_date(7, 3), Preference::Unavailable)
        .coverage(Workplace::KrgB, Coverage::WorkdaysOnly)
        .build_shared()
}

fn create_context(problem: Arc<Problem>, assignees: &[(usize, usize)]) -> RosterContext {
    let mut ctx = RosterContext::new(problem, Arc::new(DefaultRandom::new_with_seed(0)));
    assignees.iter().for_each(|&(slot, physician)| ctx.assign(slot, physician));

    ctx
}

fn create_config(max_iterations: usize) -> SearchConfig {
    SearchConfig { max_iterations: Some(max_iterations), max_stagnation: None, log_interval: 0, ..SearchConfig::default() }
}

#[test]
fn can_apply_and_revert_reassign_move() {
    let mut ctx = create_context(create_two_physician_problem(3), &[(0, 0)]);
    let initial_cost = ctx.total_cost();
    let roster_move = RosterMove::Reassign { slot: 0, from: Some(0), to: 1 };

    assert!(apply_move(&mut ctx, &roster_move));
    assert_eq!(ctx.roster.assignee(0), Some(1));

    revert_move(&mut ctx, &roster_move);
    assert_eq!(ctx.roster.assignee(0), Some(0));
    assert!((ctx.total_cost() - initial_cost).abs() < 1E-9);
}

#[test]
fn can_reject_reassign_move_breaking_hard_rule() {
    let mut ctx = create_context(create_two_physician_problem(3), &[(2, 0)]);

    assert!(!apply_move(&mut ctx, &RosterMove::Reassign { slot: 2, from: Some(0), to: 1 }));
    assert_eq!(ctx.roster.assignee(2), Some(0));
}

#[test]
fn can_apply_and_revert_swap_move() {
    let mut ctx = create_context(create_two_physician_problem(3), &[(0, 0), (1, 1)]);
    let roster_move = RosterMove::Swap { first: 0, second: 1, first_physician: 0, second_physician: 1 };

    assert!(apply_move(&mut ctx, &roster_move));
    assert_eq!((ctx.roster.assignee(0), ctx.roster.assignee(1)), (Some(1), Some(0)));

    revert_move(&mut ctx, &roster_move);
    assert_eq!((ctx.roster.assignee(0), ctx.roster.assignee(1)), (Some(0), Some(1)));
}

#[test]
fn can_restore_roster_when_swap_breaks_hard_rule() {
    let mut ctx = create_context(create_two_physician_problem(3), &[(1, 1), (2, 0)]);
    let roster_move = RosterMove::Swap { first: 1, second: 2, first_physician: 1, second_physician: 0 };

    assert!(!apply_move(&mut ctx, &roster_move));
    assert_eq!((ctx.roster.assignee(1), ctx.roster.assignee(2)), (Some(1), Some(0)));
    assert_eq!(ctx.violations(), 0);
}

#[test]
fn can_select_moves() {
    let problem = create_two_physician_problem(3);
    let mut ctx = create_context(problem.clone(), &[(0, 0), (1, 1)]);
    let free_slots = ctx.free_slots();

    ctx.random = Arc::new(FakeRandom::new(vec![2, 0], vec![0.9]));
    assert_eq!(
        select_move(&ctx, free_slots.as_slice(), 0.5),
        Some(RosterMove::Reassign { slot: 2, from: None, to: 0 })
    );

    ctx.random = Arc::new(FakeRandom::new(vec![0, 1], vec![0.1]));
    assert_eq!(
        select_move(&ctx, free_slots.as_slice(), 0.5),
        Some(RosterMove::Swap { first: 0, second: 1, first_physician: 0, second_physician: 1 })
    );

    ctx.random = Arc::new(FakeRandom::new(vec![0, 0], vec![0.9]));
    assert_eq!(select_move(&ctx, free_slots.as_slice(), 0.5), None);
}

#[test]
fn can_run_search_without_worsening_constructed_roster() {
    let environment = create_test_environment();

    let (ctx, metrics) = run_search(create_two_physician_problem(7), environment.as_ref(), &create_config(200), 0).unwrap();

    assert_eq!(metrics.phase, SearchPhase::TimedOut);
    assert_eq!(metrics.iterations, 200);
    assert_eq!(metrics.constructed_unassigned, 0);
    assert!(metrics.final_cost <= metrics.construction_cost + 1E-9);
    assert!((ctx.total_cost() - metrics.final_cost).abs() < 1E-6);
    assert_eq!(ctx.roster.unassigned_count(), 0);
    assert_eq!(ctx.violations(), 0);
}

#[test]
fn can_converge_immediately_when_no_free_slots() {
    let problem = TestProblemBuilder::default()
        .days(1)
        .physician(create_test_physician("a", 3, 0, &[Workplace::KrgB]))
        .anchor(test_date(7, 1), Workplace::KrgB, "a")
        .coverage(Workplace::KrgB, Coverage::Daily)
        .build_shared();

    let (ctx, metrics) = run_search(problem, create_test_environment().as_ref(), &create_config(100), 0).unwrap();

    assert_eq!(metrics.phase, SearchPhase::Converged);
    assert_eq!(metrics.iterations, 0);
    assert_eq!(ctx.roster.assignee(0), Some(0));
}

#[test]
fn can_reject_search_without_termination() {
    let config = SearchConfig { max_iterations: None, max_stagnation: None, max_time: None, ..SearchConfig::default() };

    let result = run_search(create_two_physician_problem(3), create_test_environment().as_ref(), &config, 0);

    assert!(result.is_err());
}
