//! A collection of models to represent a duty rostering problem and its roster.

mod calendar;
pub use self::calendar::*;

mod goal;
pub use self::goal::*;

mod physician;
pub use self::physician::*;

mod problem;
pub use self::problem::*;

mod roster;
pub use self::roster::*;

mod workplace;
pub use self::workplace::*;
