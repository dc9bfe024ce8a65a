//! A feature which keeps KROZECI physicians close to their urgent care frequency target.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/krozeci_test.rs"]
mod krozeci_test;

use super::*;

/// Creates a KROZECI frequency feature: each KROZECI physician contributes an absolute deviation
/// of their duties at `workplaces` from `target` over the period.
pub fn create_krozeci_feature(
    name: &str,
    weight: i64,
    target: u32,
    workplaces: WorkplaceSet,
) -> Result<Feature, GenericError> {
    if workplaces.is_empty() {
        return Err("krozeci feature requires at least one workplace".into());
    }

    FeatureBuilder::default().with_name(name).with_objective(KrozeciObjective { weight, target, workplaces }).build()
}

struct KrozeciObjective {
    weight: i64,
    target: u32,
    workplaces: WorkplaceSet,
}

impl FeatureObjective for KrozeciObjective {
    fn contribution(
        &self,
        problem: &Problem,
        roster: &Roster,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> Option<i64> {
        if !problem.physicians[physician].is_krozeci() {
            return None;
        }

        let count = count_duties(roster, physician, days, |duty| self.workplaces.contains(duty.workplace));

        Some((count as i64 - self.target as i64).abs())
    }

    fn scope(&self) -> Scope {
        Scope::Period
    }

    fn measure(&self) -> Measure {
        Measure::Sum
    }

    fn weight(&self) -> Cost {
        self.weight as Cost
    }
}
