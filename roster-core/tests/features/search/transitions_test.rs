use crate::helpers::models::*;
use crate::helpers::solver::*;
use crate::models::*;

#[test]
fn can_avoid_day_post_after_night_post() {
    let workplaces = [Workplace::KrgB, Workplace::KrgBN];
    let problem = (0..6)
        .fold(TestProblemBuilder::default().days(14), |builder, idx| {
            builder.physician(create_test_physician(format!("p{idx}").as_str(), 7, 0, &workplaces))
        })
        .coverage(Workplace::KrgB, Coverage::WorkdaysOnly)
        .coverage(Workplace::KrgBN, Coverage::Daily)
        .build_shared();

    let solution = solve_test_problem(problem, 5, create_test_search_config(1000));

    let nights = solution.assignments.iter().filter(|assignment| assignment.workplace.is_night());
    nights.for_each(|night| {
        let next_day = night.date.next_day();
        let has_day_post_next = solution.assignments.iter().any(|assignment| {
            Some(assignment.date) == next_day
                && assignment.workplace.is_day()
                && assignment.physician.is_some()
                && assignment.physician == night.physician
        });

        assert!(!has_day_post_next, "{:?} works a day post after the night on {}", night.physician, night.date);
    });

    let same_day = solution.assignments.iter().filter(|assignment| assignment.workplace.is_day()).any(|day_post| {
        solution.assignments.iter().any(|night| {
            night.workplace.is_night()
                && night.date == day_post.date
                && night.physician.is_some()
                && night.physician == day_post.physician
        })
    });
    assert!(!same_day);
}
