//! The solver module contains the search which builds a roster and improves it.
//!
//! A search goes through `Constructing` and `Improving` phases and ends either `Converged` (no
//! improvement for too long) or `TimedOut` (iteration, time or external quota limit reached).
//! Independent restarts can run in parallel, each with its own roster and random generator
//! seeded from environment seed and restart index. The cheapest result wins, ties are broken by
//! restart index, so the outcome does not depend on thread scheduling.
//!
//! # Examples
//!
//! ```no_run
//! # use roster_core::prelude::*;
//! # use std::sync::Arc;
//! # fn run(problem: Arc<Problem>) -> GenericResult<()> {
//! let environment = Arc::new(Environment::new_silent(42));
//! let solution = Solver::new(problem, environment, SearchConfig::default()).solve()?;
//!
//! println!("cost: {}, empty slots: {}", solution.cost, solution.unresolved.len());
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

mod acceptance;
pub use self::acceptance::*;

mod search;
pub use self::search::*;

mod telemetry;
pub use self::telemetry::*;

pub mod termination;

use crate::construction::heuristics::RosterContext;
use crate::models::{Cost, Problem};
use crate::solution::Solution;
use crate::utils::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies a search phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    /// Free slots are filled greedily.
    Constructing,
    /// A constructed roster is improved by local search.
    Improving,
    /// The search stopped as the best roster has not been improved for too long.
    Converged,
    /// The search stopped as iteration, time or external quota limit is reached.
    TimedOut,
}

/// Specifies search parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Amount of independent restarts.
    pub restarts: usize,
    /// A maximum amount of improvement iterations per restart.
    pub max_iterations: Option<usize>,
    /// A maximum duration of improvement phase per restart in seconds.
    pub max_time: Option<f64>,
    /// A maximum amount of iterations without improving the best roster.
    pub max_stagnation: Option<usize>,
    /// An initial annealing temperature.
    pub initial_temperature: f64,
    /// A geometric cooling rate in `(0, 1)` range.
    pub cooling_rate: f64,
    /// A temperature below which worsening moves are never accepted.
    pub min_temperature: f64,
    /// A probability to try a swap move instead of a reassign one.
    pub swap_probability: f64,
    /// Specifies how often search progress is logged, zero disables progress logging.
    pub log_interval: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            restarts: 1,
            max_iterations: Some(20_000),
            max_time: None,
            max_stagnation: Some(5_000),
            initial_temperature: 10.,
            cooling_rate: 0.9995,
            min_temperature: 1E-3,
            swap_probability: 0.3,
            log_interval: 1_000,
        }
    }
}

impl SearchConfig {
    /// Checks that parameters are in valid ranges.
    pub fn validate(&self) -> GenericResult<()> {
        let mut errors = Vec::<GenericError>::new();

        if self.restarts == 0 {
            errors.push("restarts should be positive".into());
        }
        if !(0. ..=1.).contains(&self.swap_probability) {
            errors.push(format!("swap probability should be in [0, 1] range, got: {}", self.swap_probability).into());
        }
        if let Some(max_time) = self.max_time.filter(|max_time| *max_time < 0.) {
            errors.push(format!("max time should be non-negative, got: {max_time}").into());
        }
        if let Err(err) = GeometricCooling::new(self.initial_temperature, self.cooling_rate, self.min_temperature) {
            errors.push(err);
        }

        if errors.is_empty() { Ok(()) } else { Err(GenericError::join_many(errors.as_slice(), ", ").into()) }
    }
}

/// Solves a rostering problem.
pub struct Solver {
    problem: Arc<Problem>,
    environment: Arc<Environment>,
    config: SearchConfig,
}

impl Solver {
    /// Creates a new instance of `Solver`.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>, config: SearchConfig) -> Self {
        Self { problem, environment, config }
    }

    /// Runs all restarts and returns a solution built from the cheapest roster.
    pub fn solve(self) -> GenericResult<Solution> {
        self.config.validate()?;

        let logger = self.environment.logger.clone();
        self.problem
            .check_night_capacity()
            .iter()
            .chain(self.problem.check_weekend_capacity().iter())
            .for_each(|warning| (logger)(format!("warning: {warning}").as_str()));

        (logger)(
            format!(
                "solving roster for {} physicians, {} days and {} slots ({} anchored) with {} restart(s)",
                self.problem.physicians.len(),
                self.problem.calendar.len(),
                self.problem.catalogue.len(),
                self.problem.anchors.len(),
                self.config.restarts
            )
            .as_str(),
        );

        let timer = Timer::start();
        let results = self.run_restarts()?;
        let (restart, ctx, metrics) = select_best(results)?;

        (logger)(
            format!(
                "best roster found by restart {restart} with cost {:.3} in {}ms",
                ctx.total_cost(),
                timer.elapsed_millis()
            )
            .as_str(),
        );

        Ok(Solution::new(&ctx, metrics))
    }

    fn run_restarts(&self) -> GenericResult<Vec<(RosterContext, SearchMetrics)>> {
        let restarts = (0..self.config.restarts).collect::<Vec<_>>();
        let run = || {
            parallel_into_collect(restarts, |restart| {
                run_search(self.problem.clone(), self.environment.as_ref(), &self.config, restart)
            })
        };

        let results = match self.environment.parallelism {
            Some(threads) => ThreadPool::new(threads)?.execute(run),
            None => run(),
        };

        results.into_iter().collect()
    }
}

/// Selects the cheapest restart result, ties are broken by restart order.
fn select_best(
    results: Vec<(RosterContext, SearchMetrics)>,
) -> GenericResult<(usize, RosterContext, Vec<SearchMetrics>)> {
    let mut best: Option<(usize, RosterContext, Cost)> = None;
    let mut metrics = Vec::with_capacity(results.len());

    for (restart, (ctx, restart_metrics)) in results.into_iter().enumerate() {
        let cost = ctx.total_cost();
        metrics.push(restart_metrics);

        let is_better =
            best.as_ref().is_none_or(|(_, _, best_cost)| compare_floats(cost, *best_cost) == Ordering::Less);
        if is_better {
            best = Some((restart, ctx, cost));
        }
    }

    best.map(|(restart, ctx, _)| (restart, ctx, metrics)).ok_or_else(|| "cannot find any roster".into())
}
