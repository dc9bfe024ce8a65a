#[cfg(test)]
#[path = "../../tests/unit/models/goal_test.rs"]
mod goal_test;

use crate::models::{CalendarDay, Physician, Problem, Roster, Slot};
use crate::utils::GenericError;
use rustc_hash::FxHashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Specifies a type for cost values.
pub type Cost = f64;

/// Specifies a type for constraint violation code.
pub type ViolationCode = i32;

/// Defines the rostering variant by hard rules and soft cost terms.
///
/// Both are specified by individual **features**. A feature encapsulates a single aspect of the
/// roster, such as night shift limits, weekend policy or workload balance.
#[derive(Clone, Default)]
pub struct GoalContext {
    pub(crate) constraints: Vec<Arc<dyn FeatureConstraint + Send + Sync>>,
    pub(crate) objectives: Vec<(String, Arc<dyn FeatureObjective + Send + Sync>)>,
    pub(crate) penalties: Penalties,
}

/// Penalties which steer the search away from incomplete rosters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Penalties {
    /// A cost of each free slot left without assignee.
    pub unassigned: Cost,
    /// A cost of each unit of a hard rule violation.
    pub violation: Cost,
}

impl Default for Penalties {
    fn default() -> Self {
        Self { unassigned: 10_000., violation: 1_000. }
    }
}

impl GoalContext {
    /// Creates a new instance of `GoalContext` from given features.
    pub fn new(features: &[Feature], penalties: Penalties) -> Result<Self, GenericError> {
        let mut names = FxHashSet::default();
        if let Some(feature) = features.iter().find(|feature| !names.insert(feature.name.as_str())) {
            return Err(format!("feature is defined more than once: '{}'", feature.name).into());
        }

        let constraints = features.iter().filter_map(|feature| feature.constraint.clone()).collect();
        let objectives = features
            .iter()
            .filter_map(|feature| feature.objective.clone().map(|objective| (feature.name.clone(), objective)))
            .collect();

        Ok(Self { constraints, objectives, penalties })
    }

    /// Evaluates feasibility of the move, returning the first violation found.
    pub fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        self.constraints.iter().find_map(|constraint| constraint.evaluate(move_ctx))
    }

    /// Evaluates feasibility of the move using all constraints.
    pub fn evaluate_all(&self, move_ctx: &MoveContext<'_>) -> Vec<ConstraintViolation> {
        self.constraints.iter().filter_map(|constraint| constraint.evaluate(move_ctx)).collect()
    }

    /// Collects all hard rule violations of the physician in the roster.
    pub fn audit(&self, problem: &Problem, roster: &Roster, physician: usize) -> Vec<RuleViolation> {
        let mut violations = Vec::new();
        self.constraints.iter().for_each(|constraint| constraint.audit(problem, roster, physician, &mut violations));

        violations
    }

    /// Returns named objectives.
    pub fn objectives(&self) -> impl Iterator<Item = (&str, &(dyn FeatureObjective + Send + Sync))> + '_ {
        self.objectives.iter().map(|(name, objective)| (name.as_str(), objective.as_ref()))
    }

    /// Returns penalties.
    pub fn penalties(&self) -> &Penalties {
        &self.penalties
    }
}

/// An individual feature which is used to build a specific rostering variant. Each feature
/// consists of two optional parts (but at least one should be defined):
/// * **constraint**: a hard rule which should hold to have a feasible roster.
/// * **objective**: a soft cost term which guides the search.
#[derive(Clone, Default)]
pub struct Feature {
    /// An unique id of the feature.
    pub name: String,
    /// A hard constraint.
    pub constraint: Option<Arc<dyn FeatureConstraint + Send + Sync>>,
    /// An objective which models soft constraints.
    pub objective: Option<Arc<dyn FeatureObjective + Send + Sync>>,
}

/// Provides a way to build feature with some checks.
#[derive(Default)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    /// Sets given name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.feature.name = name.to_string();
        self
    }

    /// Adds given constraint.
    pub fn with_constraint<T: FeatureConstraint + Send + Sync + 'static>(mut self, constraint: T) -> Self {
        self.feature.constraint = Some(Arc::new(constraint));
        self
    }

    /// Adds given objective.
    pub fn with_objective<T: FeatureObjective + Send + Sync + 'static>(mut self, objective: T) -> Self {
        self.feature.objective = Some(Arc::new(objective));
        self
    }

    /// Tries to builds a feature.
    pub fn build(self) -> Result<Feature, GenericError> {
        let feature = self.feature;

        if feature.name.is_empty() {
            return Err("features with default id are not allowed".into());
        }

        if feature.constraint.is_none() && feature.objective.is_none() {
            Err("empty feature is not allowed".into())
        } else {
            Ok(feature)
        }
    }
}

/// Describes a single move: assignment of the physician to the slot which is currently empty.
pub struct MoveContext<'a> {
    /// A problem definition.
    pub problem: &'a Problem,
    /// A current roster, the target slot is empty in it.
    pub roster: &'a Roster,
    /// A target slot.
    pub slot: &'a Slot,
    /// A candidate physician index.
    pub physician: usize,
}

impl<'a> MoveContext<'a> {
    /// Creates a new instance of `MoveContext`.
    pub fn new(problem: &'a Problem, roster: &'a Roster, slot: &'a Slot, physician: usize) -> Self {
        Self { problem, roster, slot, physician }
    }

    /// Returns the day of the target slot.
    pub fn day(&self) -> &'a CalendarDay {
        &self.problem.calendar.days()[self.slot.day]
    }

    /// Returns the candidate physician.
    pub fn physician(&self) -> &'a Physician {
        &self.problem.physicians[self.physician]
    }
}

/// Specifies result of hard constraint check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintViolation {
    /// Violation code which is used as marker of specific constraint violated.
    pub code: ViolationCode,
}

impl ConstraintViolation {
    /// A constraint violation failure.
    pub fn fail(code: ViolationCode) -> Option<Self> {
        Some(ConstraintViolation { code })
    }

    /// No constraint violation.
    pub fn success() -> Option<Self> {
        None
    }
}

/// A hard rule violation found in a roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleViolation {
    /// Violation code of the broken rule.
    pub code: ViolationCode,
    /// Physician index.
    pub physician: usize,
    /// A day where the violation is observed, if it is bound to a day.
    pub day: Option<usize>,
    /// Slots which are involved.
    pub slots: Vec<usize>,
    /// How severe the violation is, e.g. amount of missing nights.
    pub amount: usize,
    /// A human readable explanation.
    pub details: String,
}

/// Defines feature constraint behavior.
pub trait FeatureConstraint {
    /// Evaluates whether assignment described by the move context breaks the rule.
    /// Rules which can be satisfied only by further assignments are not checked here.
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation>;

    /// Collects all violations of the rule for the physician, including the ones which can be
    /// resolved only by further assignments.
    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>);
}

/// Specifies how physicians' contributions are folded into a term value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
    /// A plain sum.
    Sum,
    /// A population variance.
    Variance,
    /// A difference between maximum and minimum.
    Range,
}

/// Specifies over which days contributions are folded together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    /// Each calendar month is measured separately and month values are summed.
    #[default]
    Month,
    /// The whole period is measured at once.
    Period,
}

/// Defines feature objective behavior. An objective is decomposed by physicians and by scope
/// (usually a month), so that a move has to recalculate contributions of affected physicians only.
pub trait FeatureObjective {
    /// Returns a contribution of the physician within the given days or `None` when the physician
    /// is not a part of the term there.
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64>;

    /// Returns the scope of the term.
    fn scope(&self) -> Scope {
        Scope::Month
    }

    /// Returns the way contributions are aggregated.
    fn measure(&self) -> Measure;

    /// Returns a term weight.
    fn weight(&self) -> Cost;
}
