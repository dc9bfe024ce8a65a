#[cfg(test)]
#[path = "../../tests/unit/solver/search_test.rs"]
mod search_test;

use super::acceptance::{CoolingSchedule, GeometricCooling, is_accepted};
use super::telemetry::{SearchMetrics, Telemetry};
use super::termination::*;
use super::{SearchConfig, SearchPhase};
use crate::construction::heuristics::{RosterContext, construct_roster};
use crate::models::Problem;
use crate::utils::{Environment, GenericResult, compare_floats};
use std::cmp::Ordering;
use std::sync::Arc;

/// A local search move over free slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterMove {
    /// Moves a slot from its current assignee (if any) to another physician.
    Reassign {
        /// A slot index.
        slot: usize,
        /// A previous assignee.
        from: Option<usize>,
        /// A new assignee.
        to: usize,
    },
    /// Exchanges assignees of two slots.
    Swap {
        /// A first slot index.
        first: usize,
        /// A second slot index.
        second: usize,
        /// An assignee of the first slot.
        first_physician: usize,
        /// An assignee of the second slot.
        second_physician: usize,
    },
}

/// Applies the move if it keeps all hard rules satisfied for the moved slots.
/// Returns false and leaves the roster untouched otherwise.
pub fn apply_move(ctx: &mut RosterContext, roster_move: &RosterMove) -> bool {
    match *roster_move {
        RosterMove::Reassign { slot, from, to } => {
            ctx.unassign(slot);
            if ctx.evaluate(slot, to).is_none() {
                ctx.assign(slot, to);
                return true;
            }

            if let Some(from) = from {
                ctx.assign(slot, from);
            }

            false
        }
        RosterMove::Swap { first, second, first_physician, second_physician } => {
            ctx.unassign(first);
            ctx.unassign(second);

            if ctx.evaluate(first, second_physician).is_none() {
                ctx.assign(first, second_physician);
                if ctx.evaluate(second, first_physician).is_none() {
                    ctx.assign(second, first_physician);
                    return true;
                }
                ctx.unassign(first);
            }

            ctx.assign(first, first_physician);
            ctx.assign(second, second_physician);

            false
        }
    }
}

/// Reverts a previously applied move.
pub fn revert_move(ctx: &mut RosterContext, roster_move: &RosterMove) {
    match *roster_move {
        RosterMove::Reassign { slot, from, .. } => {
            ctx.unassign(slot);
            if let Some(from) = from {
                ctx.assign(slot, from);
            }
        }
        RosterMove::Swap { first, second, first_physician, second_physician } => {
            ctx.unassign(first);
            ctx.unassign(second);
            ctx.assign(first, first_physician);
            ctx.assign(second, second_physician);
        }
    }
}

/// Picks a random move over given free slots, returns `None` when a picked move changes nothing.
fn select_move(ctx: &RosterContext, free_slots: &[usize], swap_probability: f64) -> Option<RosterMove> {
    let random = ctx.random.as_ref();
    let physicians = ctx.problem.physicians.len();
    if free_slots.is_empty() || physicians == 0 {
        return None;
    }

    let pick_slot = || free_slots[random.uniform_int(0, free_slots.len() as i32 - 1) as usize];

    if free_slots.len() > 1 && random.is_hit(swap_probability) {
        let (first, second) = (pick_slot(), pick_slot());
        match (ctx.roster.assignee(first), ctx.roster.assignee(second)) {
            (Some(first_physician), Some(second_physician)) if first_physician != second_physician => {
                Some(RosterMove::Swap { first, second, first_physician, second_physician })
            }
            _ => None,
        }
    } else {
        let slot = pick_slot();
        let from = ctx.roster.assignee(slot);
        let to = random.uniform_int(0, physicians as i32 - 1) as usize;

        (from != Some(to)).then_some(RosterMove::Reassign { slot, from, to })
    }
}

fn create_termination(environment: &Environment, config: &SearchConfig) -> CompositeTermination {
    let mut terminations: Vec<Box<dyn Termination + Send + Sync>> = vec![];

    if let Some(limit) = config.max_iterations {
        terminations.push(Box::new(MaxIterations::new(limit)));
    }
    if let Some(limit) = config.max_time {
        terminations.push(Box::new(MaxTime::new(limit)));
    }
    if let Some(limit) = config.max_stagnation {
        terminations.push(Box::new(MaxStagnation::new(limit)));
    }
    if let Some(quota) = environment.quota.clone() {
        terminations.push(Box::new(QuotaTermination::new(quota)));
    }

    CompositeTermination::new(terminations)
}

/// Runs a single search restart: builds a roster greedily and then improves it with simulated
/// annealing over reassign and swap moves. Returns the best roster seen together with metrics.
pub fn run_search(
    problem: Arc<Problem>,
    environment: &Environment,
    config: &SearchConfig,
    restart: usize,
) -> GenericResult<(RosterContext, SearchMetrics)> {
    let termination = create_termination(environment, config);
    if termination.is_empty() {
        return Err("at least one termination criteria should be set".into());
    }

    let mut cooling = GeometricCooling::new(config.initial_temperature, config.cooling_rate, config.min_temperature)?;
    let mut telemetry = Telemetry::new(restart, environment.logger.clone(), config.log_interval);

    telemetry.on_phase(SearchPhase::Constructing);
    let mut ctx = RosterContext::new(problem, environment.create_random(restart));
    let unassigned = construct_roster(&mut ctx);

    let mut current_cost = ctx.total_cost();
    telemetry.on_construction(current_cost, unassigned.len());

    let free_slots = ctx.free_slots();
    let mut best_roster = ctx.roster.clone();
    let mut best_cost = current_cost;
    let mut statistics = SearchStatistics::default();

    telemetry.on_phase(SearchPhase::Improving);

    let phase = if free_slots.is_empty() {
        SearchPhase::Converged
    } else {
        loop {
            if let Some(phase) = termination.is_termination(&statistics) {
                break phase;
            }

            statistics.iteration += 1;

            let (is_feasible, is_accepted_move, is_improved) =
                match select_move(&ctx, free_slots.as_slice(), config.swap_probability) {
                    Some(roster_move) if apply_move(&mut ctx, &roster_move) => {
                        let new_cost = ctx.total_cost();
                        if is_accepted(new_cost - current_cost, &cooling, ctx.random.as_ref()) {
                            current_cost = new_cost;
                            let is_improved = compare_floats(new_cost, best_cost) == Ordering::Less;
                            if is_improved {
                                best_cost = new_cost;
                                best_roster = ctx.roster.clone();
                            }
                            (true, true, is_improved)
                        } else {
                            revert_move(&mut ctx, &roster_move);
                            (true, false, false)
                        }
                    }
                    Some(_) => (false, false, false),
                    None => (true, false, false),
                };

            statistics.stagnation = if is_improved { 0 } else { statistics.stagnation + 1 };
            cooling.update();

            telemetry.on_iteration(is_feasible, is_accepted_move, is_improved);
            telemetry.on_progress(current_cost, best_cost, cooling.current());
        }
    };

    let metrics = telemetry.on_result(phase, best_cost);
    let ctx = RosterContext::new_with_roster(ctx.problem.clone(), best_roster, ctx.random.clone());

    Ok((ctx, metrics))
}
