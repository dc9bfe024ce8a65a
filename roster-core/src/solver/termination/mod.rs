//! The termination module contains criteria which define when the improvement phase stops.

#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/termination_test.rs"]
mod termination_test;

use super::SearchPhase;
use crate::utils::{Quota, Timer};
use std::sync::Arc;

/// Keeps track of search progress used by termination criteria.
pub struct SearchStatistics {
    /// Amount of performed iterations.
    pub iteration: usize,
    /// Amount of iterations since the best roster was improved last time.
    pub stagnation: usize,
    /// A timer started with the improvement phase.
    pub timer: Timer,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self { iteration: 0, stagnation: 0, timer: Timer::start() }
    }
}

/// A trait which specifies criteria when the search should stop improving a roster.
pub trait Termination {
    /// Returns a final phase when the termination condition is met.
    fn is_termination(&self, statistics: &SearchStatistics) -> Option<SearchPhase>;
}

/// Stops the search when the iteration limit is reached.
pub struct MaxIterations {
    limit: usize,
}

impl MaxIterations {
    /// Creates a new instance of `MaxIterations`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for MaxIterations {
    fn is_termination(&self, statistics: &SearchStatistics) -> Option<SearchPhase> {
        (statistics.iteration >= self.limit).then_some(SearchPhase::TimedOut)
    }
}

/// Stops the search when the time limit is reached.
pub struct MaxTime {
    limit_in_secs: f64,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { limit_in_secs }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, statistics: &SearchStatistics) -> Option<SearchPhase> {
        (statistics.timer.elapsed_secs_as_float() > self.limit_in_secs).then_some(SearchPhase::TimedOut)
    }
}

/// Stops the search when the best roster has not been improved for too long.
pub struct MaxStagnation {
    limit: usize,
}

impl MaxStagnation {
    /// Creates a new instance of `MaxStagnation`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for MaxStagnation {
    fn is_termination(&self, statistics: &SearchStatistics) -> Option<SearchPhase> {
        (statistics.stagnation >= self.limit).then_some(SearchPhase::Converged)
    }
}

/// Stops the search when an external quota is reached, e.g. on user interruption.
pub struct QuotaTermination {
    quota: Arc<dyn Quota + Send + Sync>,
}

impl QuotaTermination {
    /// Creates a new instance of `QuotaTermination`.
    pub fn new(quota: Arc<dyn Quota + Send + Sync>) -> Self {
        Self { quota }
    }
}

impl Termination for QuotaTermination {
    fn is_termination(&self, _: &SearchStatistics) -> Option<SearchPhase> {
        self.quota.is_reached().then_some(SearchPhase::TimedOut)
    }
}

/// Encapsulates multiple termination criteria, the first one met wins.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination + Send + Sync>>,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination`.
    pub fn new(terminations: Vec<Box<dyn Termination + Send + Sync>>) -> Self {
        Self { terminations }
    }

    /// Returns true if there is no criteria set.
    pub fn is_empty(&self) -> bool {
        self.terminations.is_empty()
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&self, statistics: &SearchStatistics) -> Option<SearchPhase> {
        self.terminations.iter().find_map(|termination| termination.is_termination(statistics))
    }
}
