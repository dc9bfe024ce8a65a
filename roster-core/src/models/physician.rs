#[cfg(test)]
#[path = "../../tests/unit/models/physician_test.rs"]
mod physician_test;

use crate::models::{Shift, Workplace, WorkplaceSet};
use crate::utils::GenericError;
use rustc_hash::FxHashMap;
use std::str::FromStr;
use time::Date;

/// A physician category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// A regular trainee.
    #[default]
    Trainee,
    /// A trainee on rotation which has an urgent care frequency target.
    Krozeci,
    /// A specialist who does not owe night shifts.
    Specialist,
}

impl FromStr for Category {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "trainee" | "specializant" => Ok(Category::Trainee),
            "krozeci" | "krožeči" => Ok(Category::Krozeci),
            "specialist" => Ok(Category::Specialist),
            _ => Err(format!("unknown physician category: '{value}'").into()),
        }
    }
}

/// A wish of the physician for a specific date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    /// Prefers to work at the given workplace.
    Workplace(Workplace),
    /// Prefers not to work at all.
    DayOff,
    /// Cannot work at all, e.g. annual leave.
    Unavailable,
    /// Cannot take a day post, night posts are fine.
    UnavailableDay,
    /// Cannot take a night post, day posts are fine.
    UnavailableNight,
}

impl FromStr for Preference {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "OFF" | "DAY-OFF" | "PROSTO" => Ok(Preference::DayOff),
            "UNAVAILABLE" | "LEAVE" | "LD" | "DOPUST" => Ok(Preference::Unavailable),
            "UNAVAILABLE-DAY" | "NO-DAY" => Ok(Preference::UnavailableDay),
            "UNAVAILABLE-NIGHT" | "NO-NIGHT" => Ok(Preference::UnavailableNight),
            _ => value.parse::<Workplace>().map(Preference::Workplace),
        }
    }
}

/// Exact amount of day and night posts per month for a physician with restricted participation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedShifts {
    /// Day posts per month.
    pub day: u32,
    /// Night posts per month.
    pub night: u32,
}

/// A trainee physician to be rostered.
#[derive(Clone, Debug)]
pub struct Physician {
    /// An unique id.
    pub id: String,
    /// Specialization year, governs night shift limits and weights.
    pub specialization_year: u32,
    /// Reduces the maximum amount of night shifts owed.
    pub exemption_count: u32,
    /// A category.
    pub category: Category,
    /// Workplaces this physician may be assigned to.
    pub eligible_workplaces: WorkplaceSet,
    /// Eligible workplaces which the physician takes only when needed.
    pub fallback_workplaces: WorkplaceSet,
    /// An optional cap of day posts per month.
    pub max_day_shifts: Option<u32>,
    /// Set for restricted participation: exact amount of posts per month.
    pub fixed_shifts: Option<FixedShifts>,
    /// Wishes keyed by date.
    pub preferences: FxHashMap<Date, Preference>,
}

impl Physician {
    /// Creates a new physician without preferences.
    pub fn new(id: &str, specialization_year: u32, exemption_count: u32, eligible_workplaces: WorkplaceSet) -> Self {
        Self {
            id: id.to_string(),
            specialization_year,
            exemption_count,
            category: Category::default(),
            eligible_workplaces,
            fallback_workplaces: WorkplaceSet::default(),
            max_day_shifts: None,
            fixed_shifts: None,
            preferences: FxHashMap::default(),
        }
    }

    /// Checks whether the physician may work at the workplace.
    pub fn is_eligible(&self, workplace: Workplace) -> bool {
        self.eligible_workplaces.contains(workplace)
    }

    /// Returns a preference on the given date.
    pub fn preference_on(&self, date: Date) -> Option<Preference> {
        self.preferences.get(&date).copied()
    }

    /// Returns true if the physician cannot take a post of the shift on the given date. A standby
    /// spans both day and night, so it is blocked by either restriction.
    pub fn is_unavailable_for(&self, date: Date, shift: Shift) -> bool {
        match (self.preference_on(date), shift) {
            (Some(Preference::Unavailable), _) => true,
            (Some(Preference::UnavailableDay), Shift::Day | Shift::Standby) => true,
            (Some(Preference::UnavailableNight), Shift::Night | Shift::Standby) => true,
            _ => false,
        }
    }

    /// Returns true if the workplace is eligible and not a fallback one.
    pub fn is_preferred(&self, workplace: Workplace) -> bool {
        self.is_eligible(workplace) && !self.fallback_workplaces.contains(workplace)
    }

    /// Returns true for KROZECI category.
    pub fn is_krozeci(&self) -> bool {
        self.category == Category::Krozeci
    }
}

/// Defines how many night shifts a physician owes per month.
#[derive(Clone, Debug)]
pub struct NightLimits {
    /// Minimum nights indexed by specialization year, years beyond the table owe nothing.
    pub min_by_year: Vec<u32>,
    /// A base value which is reduced by the exemption count to get the maximum.
    pub max_base: u32,
}

impl Default for NightLimits {
    fn default() -> Self {
        Self { min_by_year: vec![0, 0, 5, 4, 3, 2, 1], max_base: 5 }
    }
}

impl NightLimits {
    /// Returns the maximum amount of nights per month. Restricted participation fixes it.
    pub fn max_nights(&self, physician: &Physician) -> u32 {
        match physician.fixed_shifts {
            Some(fixed) => fixed.night,
            None => self.max_base.saturating_sub(physician.exemption_count),
        }
    }

    /// Returns the minimum amount of nights per month, never above the maximum. Physicians who
    /// are not eligible for any night post owe nothing.
    pub fn min_nights(&self, physician: &Physician) -> u32 {
        if let Some(fixed) = physician.fixed_shifts {
            return fixed.night;
        }

        let works_nights = physician.eligible_workplaces.iter().any(|workplace| workplace.is_night());
        let min = match physician.category {
            Category::Specialist => 0,
            _ if !works_nights => 0,
            _ => self.min_by_year.get(physician.specialization_year as usize).copied().unwrap_or(0),
        };

        min.min(self.max_nights(physician))
    }
}
