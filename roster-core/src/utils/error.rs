use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use time::Date;

/// A basic error type which, essentially, a wrapper on String type.
#[derive(Clone, Debug)]
pub struct GenericError(String);

/// A type alias for result type with `GenericError`.
pub type GenericResult<T> = Result<T, GenericError>;

impl GenericError {
    /// Joins many errors with separator
    pub fn join_many(errs: &[GenericError], separator: &str) -> String {
        errs.iter().map(|err| err.0.as_str()).collect::<Vec<_>>().join(separator)
    }
}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl<'a> From<&'a str> for GenericError {
    fn from(value: &'a str) -> Self {
        Self(value.to_string())
    }
}

impl From<Box<dyn std::error::Error>> for GenericError {
    fn from(value: Box<dyn std::error::Error>) -> Self {
        Self(value.to_string())
    }
}

impl From<std::io::Error> for GenericError {
    fn from(value: std::io::Error) -> Self {
        Self(value.to_string())
    }
}

impl From<RosterError> for GenericError {
    fn from(value: RosterError) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<Self> for GenericError {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for GenericError {}

impl Hash for GenericError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Classifies failures which are reported back to the caller of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterError {
    /// The date range is malformed or empty.
    InvalidRange {
        /// First day of the range.
        start: Date,
        /// Last day of the range.
        end: Date,
    },

    /// Input records contradict each other.
    DataInconsistency(String),

    /// Free slots which have no assignee after the search has finished.
    InfeasibleSlot {
        /// Human readable slot descriptions, e.g. `2025-03-01 KRG-B`.
        slots: Vec<String>,
    },
}

impl RosterError {
    /// Creates a data inconsistency error from anything which can be displayed.
    pub fn inconsistency<T: Display>(message: T) -> Self {
        Self::DataInconsistency(message.to_string())
    }
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => write!(f, "invalid date range: start {start} is after end {end}"),
            Self::DataInconsistency(message) => write!(f, "inconsistent input data: {message}"),
            Self::InfeasibleSlot { slots } => {
                write!(f, "{} slot(s) cannot be assigned without breaking a hard rule: {}", slots.len(), slots.join(", "))
            }
        }
    }
}

impl std::error::Error for RosterError {}
