//! A command line interface library for the duty roster optimizer.
//!
//! It reads rostering inputs from tab separated files (a master sheet of physicians, a list of
//! preferences and a partial roster with pre-filled cells) together with a json configuration,
//! and writes the final roster and its diagnostics back.

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod extensions;
