//! The solution module contains a roster representation which is reported back to the caller.

#[cfg(test)]
#[path = "../../tests/unit/solution/solution_test.rs"]
mod solution_test;

use crate::construction::features::{get_rule_name, get_workload};
use crate::construction::heuristics::{CostTerm, RosterContext, hard_violations};
use crate::models::*;
use crate::solver::SearchMetrics;
use crate::utils::RosterError;
use rustc_hash::FxHashMap;
use time::Date;

/// A single cell of the completed roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// A date.
    pub date: Date,
    /// A workplace.
    pub workplace: Workplace,
    /// Physician id, `None` when the slot is left empty.
    pub physician: Option<String>,
    /// True if the assignment is taken from the partial roster as is.
    pub is_anchor: bool,
}

/// A rule which prevents physicians from taking an empty slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blocker {
    /// A rule name.
    pub rule: String,
    /// Amount of physicians blocked by the rule.
    pub physicians: usize,
}

/// A free slot which is left empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedSlot {
    /// A date.
    pub date: Date,
    /// A workplace.
    pub workplace: Workplace,
    /// Rules which blocked candidates, ordered by amount of blocked physicians.
    pub blockers: Vec<Blocker>,
}

/// A hard rule violation of the final roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViolationRecord {
    /// A rule name.
    pub rule: String,
    /// Physician id.
    pub physician: String,
    /// A date of the violation, if it is bound to a date.
    pub date: Option<Date>,
    /// Involved cells.
    pub slots: Vec<(Date, Workplace)>,
    /// Violation severity, e.g. amount of missing nights.
    pub amount: usize,
    /// True if every involved cell is pre-filled, so the violation comes from the partial roster.
    pub is_anchored: bool,
    /// A human readable explanation.
    pub details: String,
}

/// Per physician statistics of the final roster.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicianStatistics {
    /// Physician id.
    pub physician: String,
    /// Amount of duties per workplace.
    pub workplaces: Vec<(Workplace, usize)>,
    /// Amount of night posts per month.
    pub nights: Vec<usize>,
    /// Monthly night limits as (min, max).
    pub night_limits: (u32, u32),
    /// Amount of duties on weekends and public holidays.
    pub weekend_duties: usize,
    /// Weighted workload.
    pub workload: i64,
}

/// Represents a final roster with diagnostics.
#[derive(Clone, Debug)]
pub struct Solution {
    /// All cells of the roster in date, then workplace order.
    pub assignments: Vec<Assignment>,
    /// Free slots left empty.
    pub unresolved: Vec<UnresolvedSlot>,
    /// Hard rule violations.
    pub violations: Vec<ViolationRecord>,
    /// A total cost.
    pub cost: Cost,
    /// A cost per term.
    pub cost_breakdown: Vec<CostTerm>,
    /// Per physician statistics.
    pub statistics: Vec<PhysicianStatistics>,
    /// Search metrics of every restart.
    pub metrics: Vec<SearchMetrics>,
}

impl Solution {
    /// Creates a solution from the roster kept by the context.
    pub fn new(ctx: &RosterContext, metrics: Vec<SearchMetrics>) -> Self {
        let (problem, roster) = (ctx.problem.as_ref(), &ctx.roster);
        let physician_id = |physician: usize| problem.physicians[physician].id.clone();
        let cell = |slot: usize| {
            let slot = problem.slot(slot);
            (problem.slot_day(slot).date, slot.workplace)
        };

        let assignments = problem
            .catalogue
            .slots()
            .iter()
            .map(|slot| Assignment {
                date: problem.slot_day(slot).date,
                workplace: slot.workplace,
                physician: roster.assignee(slot.index).map(physician_id),
                is_anchor: roster.is_anchored(slot.index),
            })
            .collect();

        let unresolved = problem
            .catalogue
            .slots()
            .iter()
            .filter(|slot| roster.assignee(slot.index).is_none())
            .map(|slot| UnresolvedSlot {
                date: problem.slot_day(slot).date,
                workplace: slot.workplace,
                blockers: get_blockers(ctx, slot.index),
            })
            .collect();

        let violations = hard_violations(problem, roster)
            .into_iter()
            .map(|violation| ViolationRecord {
                rule: get_rule_name(violation.code).to_string(),
                physician: physician_id(violation.physician),
                date: violation.day.map(|day| problem.calendar.days()[day].date),
                slots: violation.slots.iter().map(|&slot| cell(slot)).collect(),
                amount: violation.amount,
                is_anchored: !violation.slots.is_empty()
                    && violation.slots.iter().all(|&slot| roster.is_anchored(slot)),
                details: violation.details,
            })
            .collect();

        let statistics = (0..problem.physicians.len()).map(|physician| get_statistics(problem, roster, physician)).collect();

        Self {
            assignments,
            unresolved,
            violations,
            cost: ctx.total_cost(),
            cost_breakdown: ctx.cost_breakdown(),
            statistics,
            metrics,
        }
    }

    /// Returns an error if any free slot is left empty.
    pub fn ensure_complete(&self) -> Result<(), RosterError> {
        if self.unresolved.is_empty() {
            Ok(())
        } else {
            Err(RosterError::InfeasibleSlot {
                slots: self.unresolved.iter().map(|slot| format!("{} {}", slot.date, slot.workplace)).collect(),
            })
        }
    }

    /// Returns violations caused by the partial roster alone.
    pub fn anchor_violations(&self) -> impl Iterator<Item = &ViolationRecord> + '_ {
        self.violations.iter().filter(|violation| violation.is_anchored)
    }

    /// Returns id of the physician assigned to the cell.
    pub fn assignee(&self, date: Date, workplace: Workplace) -> Option<&str> {
        self.assignments
            .iter()
            .find(|assignment| assignment.date == date && assignment.workplace == workplace)
            .and_then(|assignment| assignment.physician.as_deref())
    }
}

fn get_blockers(ctx: &RosterContext, slot: usize) -> Vec<Blocker> {
    let mut counts = FxHashMap::<ViolationCode, usize>::default();

    (0..ctx.problem.physicians.len())
        .flat_map(|physician| ctx.evaluate_all(slot, physician))
        .for_each(|violation| *counts.entry(violation.code).or_insert(0) += 1);

    let mut counts = counts.into_iter().collect::<Vec<_>>();
    counts.sort_by(|(a_code, a_count), (b_code, b_count)| b_count.cmp(a_count).then(a_code.cmp(b_code)));

    counts.into_iter().map(|(code, physicians)| Blocker { rule: get_rule_name(code).to_string(), physicians }).collect()
}

fn get_statistics(problem: &Problem, roster: &Roster, physician: usize) -> PhysicianStatistics {
    let candidate = &problem.physicians[physician];
    let mut per_workplace = [0_usize; Workplace::ALL.len()];
    let mut nights = vec![0_usize; problem.calendar.months().len()];
    let mut weekend_duties = 0;

    roster.duties_of(physician).for_each(|(day, duty)| {
        let day = &problem.calendar.days()[day];
        per_workplace[duty.workplace.index()] += 1;

        if duty.workplace.is_night() {
            nights[day.month] += 1;
        }
        if day.is_weekend_or_holiday() {
            weekend_duties += 1;
        }
    });

    PhysicianStatistics {
        physician: candidate.id.clone(),
        workplaces: Workplace::ALL.iter().map(|workplace| (*workplace, per_workplace[workplace.index()])).collect(),
        nights,
        night_limits: (problem.night_limits.min_nights(candidate), problem.night_limits.max_nights(candidate)),
        weekend_duties,
        workload: get_workload(problem, roster, physician),
    }
}
