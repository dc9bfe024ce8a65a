//! A feature which rewards satisfied wishes of physicians.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/preferences_test.rs"]
mod preferences_test;

use super::*;

/// Specifies how wishes are scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreferenceMode {
    /// Each satisfied wish is rewarded, unsatisfied ones cost nothing.
    #[default]
    Reward,
    /// Each satisfied wish is rewarded and each unsatisfied one is penalized.
    Symmetric,
}

/// Creates a preferences feature as soft constraint.
pub fn create_preferences_feature(name: &str, weight: i64, mode: PreferenceMode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_objective(PreferencesObjective { weight, mode }).build()
}

struct PreferencesObjective {
    weight: i64,
    mode: PreferenceMode,
}

impl FeatureObjective for PreferencesObjective {
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64> {
        let (met, unmet) = problem.physicians[physician]
            .preferences
            .iter()
            .filter_map(|(date, preference)| problem.calendar.index_of(*date).map(|day| (day, preference)))
            .filter(|(day, _)| days.contains(day))
            .filter_map(|(day, preference)| {
                let duties = roster.duties_on(physician, day);
                match preference {
                    Preference::Workplace(workplace) => Some(duties.iter().any(|duty| duty.workplace == *workplace)),
                    Preference::DayOff => Some(duties.is_empty()),
                    Preference::Unavailable | Preference::UnavailableDay | Preference::UnavailableNight => None,
                }
            })
            .fold((0_i64, 0_i64), |(met, unmet), is_met| if is_met { (met + 1, unmet) } else { (met, unmet + 1) });

        Some(match self.mode {
            PreferenceMode::Reward => -met,
            PreferenceMode::Symmetric => unmet - met,
        })
    }

    fn measure(&self) -> Measure {
        Measure::Sum
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}

/// Creates a feature which steers physicians to their preferred workplaces: each duty at a
/// fallback workplace costs the weight and each duty at a preferred one saves it.
pub fn create_preferred_workplaces_feature(name: &str, weight: i64) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_objective(PreferredWorkplacesObjective { weight }).build()
}

struct PreferredWorkplacesObjective {
    weight: i64,
}

impl FeatureObjective for PreferredWorkplacesObjective {
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64> {
        let candidate = &problem.physicians[physician];

        Some(
            roster
                .duties_within(physician, days)
                .map(|(_, duty)| match duty.workplace {
                    workplace if candidate.fallback_workplaces.contains(workplace) => 1,
                    workplace if candidate.is_preferred(workplace) => -1,
                    _ => 0,
                })
                .sum(),
        )
    }

    fn measure(&self) -> Measure {
        Measure::Sum
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}
