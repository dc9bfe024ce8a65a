#[cfg(test)]
#[path = "../../tests/unit/models/workplace_test.rs"]
mod workplace_test;

use crate::utils::GenericError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A shift kind of the workplace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shift {
    /// A day post.
    Day,
    /// A night post.
    Night,
    /// A standby post which excludes any other post on the same date.
    Standby,
}

/// A workplace which has to be staffed by exactly one physician per covered day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Workplace {
    /// `KRG-B` day post.
    #[default]
    KrgB,
    /// `KRG-ABD` day post.
    KrgAbd,
    /// `KRG-MOP` day post.
    KrgMop,
    /// `KRG4` day post.
    Krg4,
    /// `KRG5` day post.
    Krg5,
    /// `KRG-B-N` night post.
    KrgBN,
    /// `KRG-MOP-N` night post.
    KrgMopN,
    /// `KRG-ABD-N` night post.
    KrgAbdN,
    /// `ABD-PRIP` standby post.
    AbdPrip,
}

impl Workplace {
    /// All workplaces in the order they appear in the roster table.
    pub const ALL: [Workplace; 9] = [
        Workplace::KrgB,
        Workplace::KrgAbd,
        Workplace::KrgMop,
        Workplace::Krg4,
        Workplace::Krg5,
        Workplace::KrgBN,
        Workplace::KrgMopN,
        Workplace::KrgAbdN,
        Workplace::AbdPrip,
    ];

    /// Returns the workplace code used in input and output tables.
    pub fn code(&self) -> &'static str {
        match self {
            Workplace::KrgB => "KRG-B",
            Workplace::KrgAbd => "KRG-ABD",
            Workplace::KrgMop => "KRG-MOP",
            Workplace::Krg4 => "KRG4",
            Workplace::Krg5 => "KRG5",
            Workplace::KrgBN => "KRG-B-N",
            Workplace::KrgMopN => "KRG-MOP-N",
            Workplace::KrgAbdN => "KRG-ABD-N",
            Workplace::AbdPrip => "ABD-PRIP",
        }
    }

    /// Returns the shift kind.
    pub fn shift(&self) -> Shift {
        match self {
            Workplace::KrgB | Workplace::KrgAbd | Workplace::KrgMop | Workplace::Krg4 | Workplace::Krg5 => Shift::Day,
            Workplace::KrgBN | Workplace::KrgMopN | Workplace::KrgAbdN => Shift::Night,
            Workplace::AbdPrip => Shift::Standby,
        }
    }

    /// Returns true for the MOP day and night posts.
    pub fn is_mop(&self) -> bool {
        matches!(self, Workplace::KrgMop | Workplace::KrgMopN)
    }

    /// Returns true for day posts.
    pub fn is_day(&self) -> bool {
        self.shift() == Shift::Day
    }

    /// Returns true for night posts.
    pub fn is_night(&self) -> bool {
        self.shift() == Shift::Night
    }

    /// Returns a position of the workplace in [`Workplace::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Workplace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Workplace {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase().replace([' ', '_'], "-");

        Workplace::ALL
            .iter()
            .find(|workplace| workplace.code() == normalized)
            .copied()
            .ok_or_else(|| format!("unknown workplace: '{value}'").into())
    }
}

/// A compact set of workplaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorkplaceSet(u16);

impl WorkplaceSet {
    /// Creates a set with all workplaces.
    pub fn all() -> Self {
        Workplace::ALL.iter().copied().collect()
    }

    /// Adds a workplace to the set.
    pub fn insert(&mut self, workplace: Workplace) {
        self.0 |= 1 << workplace.index();
    }

    /// Checks whether the workplace is in the set.
    pub fn contains(&self, workplace: Workplace) -> bool {
        self.0 & (1 << workplace.index()) != 0
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns amount of workplaces in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over workplaces in table order.
    pub fn iter(&self) -> impl Iterator<Item = Workplace> + '_ {
        Workplace::ALL.iter().copied().filter(|workplace| self.contains(*workplace))
    }
}

impl FromIterator<Workplace> for WorkplaceSet {
    fn from_iter<T: IntoIterator<Item = Workplace>>(iter: T) -> Self {
        iter.into_iter().fold(WorkplaceSet::default(), |mut set, workplace| {
            set.insert(workplace);
            set
        })
    }
}
