#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Random, Timer};
use std::sync::Arc;

/// A logger type which is called with various information.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Specifies a computational quota for executions. The main purpose is to allow to stop algorithm
/// in reaction to external events such as user cancellation, timer, etc.
pub trait Quota {
    /// Returns true when computation should be stopped.
    fn is_reached(&self) -> bool;
}

/// A time quota.
pub struct TimeQuota {
    start: Timer,
    limit_in_secs: f64,
}

impl TimeQuota {
    /// Creates a new instance of `TimeQuota`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }
}

impl Quota for TimeQuota {
    fn is_reached(&self) -> bool {
        self.start.elapsed_secs_as_float() > self.limit_in_secs
    }
}

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A seed for random generators, each search restart derives its own one from it.
    /// When not set, generators are seeded from system entropy.
    pub seed: Option<u64>,

    /// An external quota which can stop the search.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// Amount of threads used for independent restarts. When not set, rayon's global pool is used.
    pub parallelism: Option<usize>,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(
        seed: Option<u64>,
        quota: Option<Arc<dyn Quota + Send + Sync>>,
        parallelism: Option<usize>,
        logger: InfoLogger,
    ) -> Self {
        Self { seed, quota, parallelism, logger }
    }

    /// Creates an environment which does not log anything and uses a fixed seed.
    pub fn new_silent(seed: u64) -> Self {
        Self { seed: Some(seed), quota: None, parallelism: None, logger: Arc::new(|_| {}) }
    }

    /// Creates a random generator for the search restart with given index.
    pub fn create_random(&self, restart: usize) -> Arc<dyn Random + Send + Sync> {
        match self.seed {
            Some(seed) => Arc::new(DefaultRandom::new_with_seed(seed.wrapping_add(restart as u64))),
            None => Arc::new(DefaultRandom::new_from_entropy()),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(None, None, None, Arc::new(|msg| println!("{msg}")))
    }
}
