#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/cost_test.rs"]
mod cost_test;

use crate::models::*;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Keeps running aggregates of contributions, so that a term value is updated in constant or
/// logarithmic time when a single physician changes. Sums are kept in a wide integer type, so
/// that squares of large contributions cannot overflow.
#[derive(Clone, Debug, Default)]
pub struct Aggregate {
    count: usize,
    sum: i128,
    sum_squares: i128,
    ordered: BTreeMap<i64, usize>,
}

impl Aggregate {
    /// Adds a value.
    pub fn add(&mut self, value: i64) {
        let wide = value as i128;

        self.count += 1;
        self.sum = self.sum.saturating_add(wide);
        self.sum_squares = self.sum_squares.saturating_add(wide * wide);
        *self.ordered.entry(value).or_insert(0) += 1;
    }

    /// Removes a previously added value.
    pub fn remove(&mut self, value: i64) {
        let wide = value as i128;

        self.count -= 1;
        self.sum = self.sum.saturating_sub(wide);
        self.sum_squares = self.sum_squares.saturating_sub(wide * wide);

        if let Some(entries) = self.ordered.get_mut(&value) {
            *entries -= 1;
            if *entries == 0 {
                self.ordered.remove(&value);
            }
        }
    }

    /// Returns the aggregate value using the measure.
    pub fn value(&self, measure: Measure) -> Cost {
        match measure {
            Measure::Sum => self.sum as Cost,
            Measure::Variance if self.count == 0 => 0.,
            Measure::Variance => {
                let count = self.count as Cost;
                let mean = self.sum as Cost / count;

                (self.sum_squares as Cost / count - mean * mean).max(0.)
            }
            Measure::Range => match (self.ordered.first_key_value(), self.ordered.last_key_value()) {
                (Some((min, _)), Some((max, _))) => (*max as i128 - *min as i128) as Cost,
                _ => 0.,
            },
        }
    }
}

/// Contributions of all physicians within a group of days: a single month or the whole period.
#[derive(Clone, Debug)]
struct GroupState {
    days: RangeInclusive<usize>,
    values: Vec<Option<i64>>,
    aggregate: Aggregate,
}

impl GroupState {
    fn update(&mut self, physician: usize, new_value: Option<i64>) {
        let old_value = std::mem::replace(&mut self.values[physician], new_value);

        if old_value != new_value {
            if let Some(old_value) = old_value {
                self.aggregate.remove(old_value);
            }
            if let Some(new_value) = new_value {
                self.aggregate.add(new_value);
            }
        }
    }
}

#[derive(Clone, Debug)]
struct TermState {
    groups: Vec<GroupState>,
    measure: Measure,
    weight: Cost,
}

impl TermState {
    fn value(&self) -> Cost {
        self.groups.iter().map(|group| group.aggregate.value(self.measure)).sum()
    }
}

/// A single entry of the cost breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct CostTerm {
    /// Term name.
    pub name: String,
    /// An unweighted term value.
    pub value: Cost,
    /// A weighted term cost.
    pub cost: Cost,
}

/// Evaluates total roster cost incrementally: every term keeps per physician contributions for
/// each month (or for the whole period), so a change of a physician's duties requires
/// recalculating their contributions only. Balance terms are measured within a month and
/// month values are summed.
#[derive(Clone, Debug)]
pub struct CostState {
    terms: Vec<TermState>,
    violations: Vec<usize>,
    total_violations: usize,
}

/// A name of the term which counts free slots left without assignee.
pub const UNASSIGNED_TERM: &str = "unassigned";
/// A name of the term which counts hard rule violations.
pub const VIOLATIONS_TERM: &str = "hard_violations";

impl CostState {
    /// Creates a cost state for the roster.
    pub fn new(problem: &Problem, roster: &Roster) -> Self {
        let physicians = problem.physicians.len();

        let terms = problem
            .goal
            .objectives()
            .map(|(_, objective)| {
                let groups = get_scope_days(problem, objective.scope())
                    .into_iter()
                    .map(|days| {
                        let values = (0..physicians)
                            .map(|idx| objective.contribution(problem, roster, idx, days.clone()))
                            .collect::<Vec<_>>();
                        let aggregate = values.iter().flatten().fold(Aggregate::default(), |mut acc, value| {
                            acc.add(*value);
                            acc
                        });

                        GroupState { days, values, aggregate }
                    })
                    .collect();

                TermState { groups, measure: objective.measure(), weight: objective.weight() }
            })
            .collect();

        let violations = (0..physicians).map(|idx| count_violations(problem, roster, idx)).collect::<Vec<_>>();
        let total_violations = violations.iter().sum();

        Self { terms, violations, total_violations }
    }

    /// Recalculates contributions of the physician after their duties have changed.
    pub fn update(&mut self, problem: &Problem, roster: &Roster, physician: usize) {
        problem.goal.objectives().zip(self.terms.iter_mut()).for_each(|((_, objective), term)| {
            term.groups.iter_mut().for_each(|group| {
                let new_value = objective.contribution(problem, roster, physician, group.days.clone());
                group.update(physician, new_value);
            });
        });

        let violations = count_violations(problem, roster, physician);
        self.total_violations = self.total_violations + violations - self.violations[physician];
        self.violations[physician] = violations;
    }

    /// Returns total cost of the roster.
    pub fn total(&self, problem: &Problem, roster: &Roster) -> Cost {
        let penalties = problem.goal.penalties();

        self.terms.iter().map(|term| term.weight * term.value()).sum::<Cost>()
            + penalties.violation * self.total_violations as Cost
            + penalties.unassigned * roster.unassigned_count() as Cost
    }

    /// Returns total amount of hard rule violation units.
    pub fn violations(&self) -> usize {
        self.total_violations
    }

    /// Returns a per term breakdown of the cost.
    pub fn breakdown(&self, problem: &Problem, roster: &Roster) -> Vec<CostTerm> {
        let penalties = problem.goal.penalties();
        let unassigned = roster.unassigned_count() as Cost;
        let violations = self.total_violations as Cost;

        problem
            .goal
            .objectives()
            .zip(self.terms.iter())
            .map(|((name, _), term)| {
                let value = term.value();
                CostTerm { name: name.to_string(), value, cost: term.weight * value }
            })
            .chain([
                CostTerm { name: UNASSIGNED_TERM.to_string(), value: unassigned, cost: penalties.unassigned * unassigned },
                CostTerm { name: VIOLATIONS_TERM.to_string(), value: violations, cost: penalties.violation * violations },
            ])
            .collect()
    }
}

/// Returns day ranges of the scope: one per calendar month or a single one for the period.
fn get_scope_days(problem: &Problem, scope: Scope) -> Vec<RangeInclusive<usize>> {
    match scope {
        _ if problem.calendar.is_empty() => vec![],
        Scope::Month => (0..problem.calendar.months().len()).map(|month| problem.calendar.month_days(month)).collect(),
        Scope::Period => vec![0..=problem.calendar.len() - 1],
    }
}

fn count_violations(problem: &Problem, roster: &Roster, physician: usize) -> usize {
    problem.goal.audit(problem, roster, physician).iter().map(|violation| violation.amount).sum()
}
