//! Contains building blocks shared by roster construction and improvement.

mod context;
pub use self::context::RosterContext;

mod cost;
pub use self::cost::*;

mod feasibility;
pub use self::feasibility::*;

mod greedy;
pub use self::greedy::construct_roster;
