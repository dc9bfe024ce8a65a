#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/greedy_test.rs"]
mod greedy_test;

use super::RosterContext;
use crate::construction::features::get_workload_within;
use crate::utils::compare_floats;

/// Fills free empty slots in calendar order. For each slot, every physician who can take it
/// without breaking a hard rule is tried and the one with the smallest resulting cost wins.
/// Ties are broken by workload within the slot's month and then by physician order. A slot without any legal
/// candidate is left empty.
///
/// Returns indices of slots left empty.
pub fn construct_roster(ctx: &mut RosterContext) -> Vec<usize> {
    let physicians = ctx.problem.physicians.len();
    let mut unassigned = Vec::new();

    for slot in ctx.free_slots() {
        if ctx.roster.assignee(slot).is_some() {
            continue;
        }

        let candidates = (0..physicians).filter(|&physician| ctx.evaluate(slot, physician).is_none()).collect::<Vec<_>>();
        let month = {
            let day = ctx.problem.slot_day(ctx.problem.slot(slot));
            ctx.problem.calendar.month_days(day.month)
        };

        let best = candidates
            .into_iter()
            .map(|physician| {
                let workload = get_workload_within(ctx.problem.as_ref(), &ctx.roster, physician, month.clone());

                ctx.assign(slot, physician);
                let cost = ctx.total_cost();
                ctx.unassign(slot);

                (physician, cost, workload)
            })
            .min_by(|(a_idx, a_cost, a_load), (b_idx, b_cost, b_load)| {
                compare_floats(*a_cost, *b_cost).then(a_load.cmp(b_load)).then(a_idx.cmp(b_idx))
            });

        match best {
            Some((physician, ..)) => ctx.assign(slot, physician),
            None => unassigned.push(slot),
        }
    }

    unassigned
}
