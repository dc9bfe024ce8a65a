//! A feature which limits duties of a physician within a single date: at most one day post and
//! one night post, and a standby post excludes anything else.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/daily_duties_test.rs"]
mod daily_duties_test;

use super::*;

/// Creates a daily duties feature as hard constraint.
pub fn create_daily_duties_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(DailyDutiesConstraint { code }).build()
}

struct DailyDutiesConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for DailyDutiesConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let duties = move_ctx.roster.duties_on(move_ctx.physician, move_ctx.slot.day);
        let shift = move_ctx.slot.workplace.shift();

        let is_conflict = match shift {
            Shift::Standby => !duties.is_empty(),
            _ => duties.iter().any(|duty| [Shift::Standby, shift].contains(&duty.workplace.shift())),
        };

        if is_conflict { ConstraintViolation::fail(self.code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        problem.calendar.days().iter().for_each(|day| {
            let duties = roster.duties_on(physician, day.index);
            if duties.len() < 2 {
                return;
            }

            let count = |shift: Shift| duties.iter().filter(|duty| duty.workplace.shift() == shift).count();
            let (day_posts, night_posts, standby) = (count(Shift::Day), count(Shift::Night), count(Shift::Standby));

            if day_posts > 1 || night_posts > 1 || standby > 0 {
                violations.push(create_violation(
                    self.code,
                    physician,
                    Some(day.index),
                    duties.iter().map(|duty| duty.slot).collect(),
                    duties.len() - 1,
                    format!(
                        "'{}' has {} duties on {}: {}",
                        problem.physicians[physician].id,
                        duties.len(),
                        day.date,
                        duties.iter().map(|duty| duty.workplace.code()).collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
        });
    }
}
