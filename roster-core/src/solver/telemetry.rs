//! A module which collects metrics about the search and writes progress into the log.

use super::SearchPhase;
use crate::models::Cost;
use crate::utils::{InfoLogger, Timer};

/// Encapsulates measurements of a single search restart.
#[derive(Clone, Debug)]
pub struct SearchMetrics {
    /// A restart index.
    pub restart: usize,
    /// A phase in which the search ended.
    pub phase: SearchPhase,
    /// Total amount of improvement iterations.
    pub iterations: usize,
    /// Amount of accepted moves.
    pub accepted: usize,
    /// Amount of moves which improved the best known roster.
    pub improved: usize,
    /// Amount of moves rejected as they break a hard rule.
    pub rejected_infeasible: usize,
    /// Amount of free slots left empty by construction.
    pub constructed_unassigned: usize,
    /// A cost of the constructed roster.
    pub construction_cost: Cost,
    /// A cost of the best roster found.
    pub final_cost: Cost,
    /// Restart duration in milliseconds.
    pub duration: u128,
}

/// Provides a way to collect metrics and write information into log.
pub struct Telemetry {
    logger: InfoLogger,
    log_interval: usize,
    timer: Timer,
    metrics: SearchMetrics,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry` for the given restart.
    pub fn new(restart: usize, logger: InfoLogger, log_interval: usize) -> Self {
        Self {
            logger,
            log_interval,
            timer: Timer::start(),
            metrics: SearchMetrics {
                restart,
                phase: SearchPhase::Constructing,
                iterations: 0,
                accepted: 0,
                improved: 0,
                rejected_infeasible: 0,
                constructed_unassigned: 0,
                construction_cost: 0.,
                final_cost: 0.,
                duration: 0,
            },
        }
    }

    /// Reports a phase change.
    pub fn on_phase(&mut self, phase: SearchPhase) {
        self.metrics.phase = phase;
        self.log(format!("phase changed to {phase:?}").as_str());
    }

    /// Reports the roster built by construction.
    pub fn on_construction(&mut self, cost: Cost, unassigned: usize) {
        self.metrics.construction_cost = cost;
        self.metrics.final_cost = cost;
        self.metrics.constructed_unassigned = unassigned;
        self.log(
            format!(
                "constructed roster in {}ms, cost: {cost:.3}, empty slots: {unassigned}",
                self.timer.elapsed_millis()
            )
            .as_str(),
        );
    }

    /// Reports a result of a single iteration.
    pub fn on_iteration(&mut self, is_feasible: bool, is_accepted: bool, is_improved: bool) {
        self.metrics.iterations += 1;
        self.metrics.rejected_infeasible += usize::from(!is_feasible);
        self.metrics.accepted += usize::from(is_accepted);
        self.metrics.improved += usize::from(is_improved);
    }

    /// Writes search progress into log if the iteration matches the log interval.
    pub fn on_progress(&self, current_cost: Cost, best_cost: Cost, temperature: f64) {
        let iteration = self.metrics.iterations;
        if self.log_interval > 0 && iteration > 0 && iteration % self.log_interval == 0 {
            self.log(
                format!(
                    "iteration {iteration}: current cost {current_cost:.3}, best cost {best_cost:.3}, \
                     temperature {temperature:.4}, accepted {}, improved {}",
                    self.metrics.accepted, self.metrics.improved
                )
                .as_str(),
            );
        }
    }

    /// Finishes collecting metrics and returns them.
    pub fn on_result(mut self, phase: SearchPhase, best_cost: Cost) -> SearchMetrics {
        self.metrics.phase = phase;
        self.metrics.final_cost = best_cost;
        self.metrics.duration = self.timer.elapsed_millis();

        self.log(
            format!(
                "search finished as {phase:?} after {} iterations, cost: {:.3} -> {best_cost:.3}",
                self.metrics.iterations, self.metrics.construction_cost
            )
            .as_str(),
        );

        self.metrics
    }

    fn log(&self, message: &str) {
        (self.logger)(format!("[{}s] restart {}: {message}", self.timer.elapsed_secs(), self.metrics.restart).as_str())
    }
}
