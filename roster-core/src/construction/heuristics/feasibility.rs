#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/feasibility_test.rs"]
mod feasibility_test;

use crate::models::*;

/// Checks whether the physician can take the slot without breaking any hard rule which can be
/// checked for a single move. An occupied free slot is checked as if its assignee were removed,
/// an anchored slot can never be reassigned.
pub fn is_slot_assignment_valid(problem: &Problem, roster: &Roster, slot: usize, physician: usize) -> bool {
    if roster.is_anchored(slot) || physician >= problem.physicians.len() {
        return false;
    }

    let slot = problem.slot(slot);

    match roster.assignee(slot.index) {
        Some(_) => {
            let mut roster = roster.clone();
            roster.unassign(slot);
            problem.goal.evaluate(&MoveContext::new(problem, &roster, slot, physician)).is_none()
        }
        None => problem.goal.evaluate(&MoveContext::new(problem, roster, slot, physician)).is_none(),
    }
}

/// Returns all hard rule violations of the roster ordered by physician.
pub fn hard_violations(problem: &Problem, roster: &Roster) -> Vec<RuleViolation> {
    (0..problem.physicians.len()).flat_map(|physician| problem.goal.audit(problem, roster, physician)).collect()
}
