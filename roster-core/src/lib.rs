//! Core crate contains main building blocks to build a monthly duty roster for surgical trainee
//! physicians.
//!
//! A rostering problem consists of a calendar period, a set of physicians with their eligible
//! workplaces, specialization year and wishes, and a partial roster with pre-filled cells
//! (anchors). The goal is to assign exactly one physician to every free (date, workplace) slot,
//! so that hard rules hold and a weighted cost of soft terms is minimized.
//!
//! # Key points
//!
//! - **models**: calendar, workplaces, physicians, slots, roster and goal definitions
//! - **construction**: hard rules and soft terms expressed as features, greedy construction and
//!   incremental cost evaluation
//! - **solver**: simulated annealing local search with restarts and termination criteria
//! - **solution**: completed roster together with unresolved slots, violations and statistics
//!
//! Hard rules are split in two groups: the ones which can be checked for a single assignment
//! (eligibility, availability, transitions, maximum nights, weekend caps) block moves, while
//! completion requirements (minimum nights, fully worked weekend units) are reported when unmet.

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
pub mod features;

pub mod construction;
pub mod models;
pub mod prelude;
pub mod solution;
pub mod solver;
pub mod utils;
