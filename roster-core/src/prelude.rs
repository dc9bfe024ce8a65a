//! This module reimports commonly used types.

pub use crate::construction::goal::{GoalConfig, create_goal_context};
pub use crate::construction::heuristics::{RosterContext, hard_violations, is_slot_assignment_valid};

pub use crate::models::{
    Anchor, Calendar, Category, Coverage, GoalContext, Penalties, Physician, Preference, PreferenceRecord, Problem,
    ProblemBuilder, Workplace, WorkplaceSet,
};

pub use crate::solution::Solution;
pub use crate::solver::{SearchConfig, SearchPhase, Solver};

pub use crate::utils::{
    DefaultRandom, Environment, GenericError, GenericResult, InfoLogger, Quota, Random, RosterError, TimeQuota,
};
