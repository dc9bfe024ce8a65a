//! Contains logic which decides whether a candidate roster replaces the current one.

#[cfg(test)]
#[path = "../../tests/unit/solver/acceptance_test.rs"]
mod acceptance_test;

use crate::models::Cost;
use crate::utils::{GenericResult, Random};

/// Defines how temperature decreases during the search.
pub trait CoolingSchedule {
    /// Returns current temperature.
    fn current(&self) -> f64;

    /// Decreases temperature, called once per iteration.
    fn update(&mut self);

    /// Returns true when temperature is too low to accept any worsening move.
    fn is_frozen(&self) -> bool;
}

/// A geometric cooling schedule: `T(k+1) = T(k) * rate`.
#[derive(Clone, Debug)]
pub struct GeometricCooling {
    current: f64,
    rate: f64,
    min_temperature: f64,
}

impl GeometricCooling {
    /// Creates a new instance of `GeometricCooling`.
    pub fn new(initial: f64, rate: f64, min_temperature: f64) -> GenericResult<Self> {
        if !(rate > 0. && rate < 1.) {
            return Err(format!("cooling rate should be in (0, 1) range, got: {rate}").into());
        }

        if initial < 0. || min_temperature < 0. {
            return Err("temperature should be non-negative".into());
        }

        Ok(Self { current: initial, rate, min_temperature })
    }
}

impl CoolingSchedule for GeometricCooling {
    fn current(&self) -> f64 {
        self.current
    }

    fn update(&mut self) {
        self.current *= self.rate;
    }

    fn is_frozen(&self) -> bool {
        self.current <= self.min_temperature
    }
}

/// Decides whether a move changing cost by `delta` is accepted using Metropolis criterion:
/// a move which is not worse is always accepted, a worsening one with `exp(-delta / T)` probability.
pub fn is_accepted(delta: Cost, cooling: &dyn CoolingSchedule, random: &dyn Random) -> bool {
    if delta <= 0. {
        return true;
    }

    if cooling.is_frozen() || !delta.is_finite() {
        return false;
    }

    let probability = (-delta / cooling.current()).exp();

    random.uniform_real(0., 1.) < probability
}
