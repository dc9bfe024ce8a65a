//! Features which balance work between physicians.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/workload_test.rs"]
mod workload_test;

use super::*;

/// Creates a feature which balances weighted workload between physicians within each month,
/// excluding KROZECI category which has its own frequency target.
pub fn create_workload_balance_feature(name: &str, weight: i64, measure: Measure) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_objective(WorkloadObjective { weight, measure }).build()
}

/// Creates a feature which balances monthly amount of standby posts between physicians who can
/// take them.
pub fn create_standby_balance_feature(name: &str, weight: i64, measure: Measure) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_objective(StandbyObjective { weight, measure }).build()
}

/// Returns weighted workload of the physician over the whole period.
pub fn get_workload(problem: &Problem, roster: &Roster, physician: usize) -> i64 {
    if problem.calendar.is_empty() {
        return 0;
    }

    get_workload_within(problem, roster, physician, 0..=problem.calendar.len() - 1)
}

/// Returns weighted workload of the physician within the given days, usually a month.
pub fn get_workload_within(problem: &Problem, roster: &Roster, physician: usize, days: RangeInclusive<usize>) -> i64 {
    let year = problem.physicians[physician].specialization_year;
    let calendar_days = problem.calendar.days();

    roster
        .duties_within(physician, days)
        .map(|(day, duty)| problem.workload_weights.weight(duty.workplace, &calendar_days[day], year))
        .fold(0_i64, |acc, weight| acc.saturating_add(weight))
}

struct WorkloadObjective {
    weight: i64,
    measure: Measure,
}

impl FeatureObjective for WorkloadObjective {
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64> {
        if problem.physicians[physician].is_krozeci() {
            None
        } else {
            Some(get_workload_within(problem, roster, physician, days))
        }
    }

    fn measure(&self) -> Measure {
        self.measure
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}

struct StandbyObjective {
    weight: i64,
    measure: Measure,
}

impl FeatureObjective for StandbyObjective {
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64> {
        let candidate = &problem.physicians[physician];
        let standby = count_duties(roster, physician, days, |duty| duty.workplace.shift() == Shift::Standby);

        if candidate.is_krozeci() || (standby == 0 && !candidate.is_eligible(Workplace::AbdPrip)) {
            None
        } else {
            Some(standby as i64)
        }
    }

    fn measure(&self) -> Measure {
        self.measure
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}

/// Creates a feature which spreads each physician's monthly duties evenly among their preferred
/// workplaces: a physician contributes the difference between the most and the least visited one.
/// Standby is not taken into account.
pub fn create_workplace_distribution_feature(name: &str, weight: i64) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_objective(WorkplaceDistributionObjective { weight }).build()
}

struct WorkplaceDistributionObjective {
    weight: i64,
}

impl FeatureObjective for WorkplaceDistributionObjective {
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64> {
        let candidate = &problem.physicians[physician];
        let workplaces = candidate
            .eligible_workplaces
            .iter()
            .filter(|&workplace| candidate.is_preferred(workplace) && workplace.shift() != Shift::Standby)
            .collect::<WorkplaceSet>();

        if workplaces.len() < 2 {
            return None;
        }

        let mut counts = [0_i64; Workplace::ALL.len()];
        roster
            .duties_within(physician, days)
            .filter(|(_, duty)| workplaces.contains(duty.workplace))
            .for_each(|(_, duty)| counts[duty.workplace.index()] += 1);

        let (min, max) = workplaces
            .iter()
            .map(|workplace| counts[workplace.index()])
            .fold((i64::MAX, i64::MIN), |(min, max), count| (min.min(count), max.max(count)));

        Some(max - min)
    }

    fn measure(&self) -> Measure {
        Measure::Sum
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}
