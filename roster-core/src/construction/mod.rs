//! The construction module contains hard rules, soft terms and basic heuristics used to build
//! and modify rosters.

pub mod features;
pub mod goal;
pub mod heuristics;
