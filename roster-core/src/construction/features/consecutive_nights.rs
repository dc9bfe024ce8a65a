//! A feature which rewards night posts on consecutive dates.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/consecutive_nights_test.rs"]
mod consecutive_nights_test;

use super::*;

/// Creates a consecutive nights feature as soft constraint: every pair of nights on adjacent
/// dates reduces the cost by the weight.
pub fn create_consecutive_nights_feature(name: &str, weight: i64) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_objective(ConsecutiveNightsObjective { weight }).build()
}

struct ConsecutiveNightsObjective {
    weight: i64,
}

impl FeatureObjective for ConsecutiveNightsObjective {
    fn contribution(&self, _: &Problem, roster: &Roster, physician: usize, days: RangeInclusive<usize>) -> Option<i64> {
        let has_night = |day: usize| has_shift(roster, physician, day, Shift::Night);
        // a pair belongs to the month of its second night
        let pairs = days.filter(|&day| day > 0 && has_night(day - 1) && has_night(day)).count();

        Some(-(pairs as i64))
    }

    fn measure(&self) -> Measure {
        Measure::Sum
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}
