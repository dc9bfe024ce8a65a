#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/context_test.rs"]
mod context_test;

use super::cost::{CostState, CostTerm};
use crate::models::*;
use crate::utils::Random;
use std::sync::Arc;

/// Keeps a roster together with its cost state and all what is needed to modify it.
///
/// All modifications go through this type, so that cost state is always in sync with the roster.
#[derive(Clone)]
pub struct RosterContext {
    /// A problem definition.
    pub problem: Arc<Problem>,
    /// A current roster.
    pub roster: Roster,
    /// A random generator.
    pub random: Arc<dyn Random + Send + Sync>,
    cost: CostState,
}

impl RosterContext {
    /// Creates a new context with an empty roster which has only anchors placed.
    pub fn new(problem: Arc<Problem>, random: Arc<dyn Random + Send + Sync>) -> Self {
        let roster = Roster::new(
            &problem.catalogue,
            problem.physicians.len(),
            problem.calendar.len(),
            problem.anchors.as_slice(),
        );

        Self::new_with_roster(problem, roster, random)
    }

    /// Creates a new context for the given roster.
    pub fn new_with_roster(problem: Arc<Problem>, roster: Roster, random: Arc<dyn Random + Send + Sync>) -> Self {
        let cost = CostState::new(problem.as_ref(), &roster);

        Self { problem, roster, random, cost }
    }

    /// Checks whether the physician can be assigned to the slot which has to be empty.
    pub fn evaluate(&self, slot: usize, physician: usize) -> Option<ConstraintViolation> {
        let slot = self.problem.slot(slot);
        let move_ctx = MoveContext::new(self.problem.as_ref(), &self.roster, slot, physician);

        self.problem.goal.evaluate(&move_ctx)
    }

    /// Returns all rules which prevent the physician from being assigned to the empty slot.
    pub fn evaluate_all(&self, slot: usize, physician: usize) -> Vec<ConstraintViolation> {
        let slot = self.problem.slot(slot);
        let move_ctx = MoveContext::new(self.problem.as_ref(), &self.roster, slot, physician);

        self.problem.goal.evaluate_all(&move_ctx)
    }

    /// Assigns the physician to the empty free slot without checking hard rules.
    pub fn assign(&mut self, slot: usize, physician: usize) {
        let slot = *self.problem.slot(slot);
        self.roster.assign(&slot, physician);
        self.cost.update(self.problem.as_ref(), &self.roster, physician);
    }

    /// Removes an assignment from the free slot and returns previous assignee.
    pub fn unassign(&mut self, slot: usize) -> Option<usize> {
        let slot = *self.problem.slot(slot);
        let physician = self.roster.unassign(&slot)?;
        self.cost.update(self.problem.as_ref(), &self.roster, physician);

        Some(physician)
    }

    /// Returns total cost of the current roster.
    pub fn total_cost(&self) -> Cost {
        self.cost.total(self.problem.as_ref(), &self.roster)
    }

    /// Returns amount of hard rule violation units in the current roster.
    pub fn violations(&self) -> usize {
        self.cost.violations()
    }

    /// Returns a per term breakdown of the current cost.
    pub fn cost_breakdown(&self) -> Vec<CostTerm> {
        self.cost.breakdown(self.problem.as_ref(), &self.roster)
    }

    /// Returns indices of slots which are not pre-filled.
    pub fn free_slots(&self) -> Vec<usize> {
        (0..self.roster.len()).filter(|&slot| !self.roster.is_anchored(slot)).collect()
    }
}
