//! Features which forbid unsafe transitions between day and night posts.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/transitions_test.rs"]
mod transitions_test;

use super::*;

/// Specifies on which dates a physician cannot combine a day post with a night post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SameDayTransitionPolicy {
    /// The combination is forbidden on regular working days.
    #[default]
    Workdays,
    /// The combination is forbidden on weekends and public holidays.
    WeekendsAndHolidays,
    /// The combination is forbidden on every date.
    Always,
    /// The combination is allowed.
    Never,
}

impl SameDayTransitionPolicy {
    /// Checks whether the combination is forbidden on the day.
    pub fn is_forbidden(&self, day: &CalendarDay) -> bool {
        match self {
            SameDayTransitionPolicy::Workdays => day.is_workday(),
            SameDayTransitionPolicy::WeekendsAndHolidays => day.is_weekend_or_holiday(),
            SameDayTransitionPolicy::Always => true,
            SameDayTransitionPolicy::Never => false,
        }
    }
}

/// Creates a feature which forbids a day post right after a night post.
pub fn create_night_to_day_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(NightToDayConstraint { code }).build()
}

/// Creates a feature which forbids a day post and a night post on the same date.
pub fn create_same_day_transition_feature(
    name: &str,
    code: ViolationCode,
    policy: SameDayTransitionPolicy,
) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(SameDayTransitionConstraint { code, policy }).build()
}

struct NightToDayConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for NightToDayConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let (roster, physician, day) = (move_ctx.roster, move_ctx.physician, move_ctx.slot.day);

        let is_conflict = match move_ctx.slot.workplace.shift() {
            Shift::Day => day > 0 && has_shift(roster, physician, day - 1, Shift::Night),
            Shift::Night => has_shift(roster, physician, day + 1, Shift::Day),
            Shift::Standby => false,
        };

        if is_conflict { ConstraintViolation::fail(self.code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let days = problem.calendar.days();

        days.windows(2).for_each(|pair| {
            let (night_day, next_day) = (&pair[0], &pair[1]);
            let nights = collect_slots(roster, physician, night_day.index..=night_day.index, |duty| {
                duty.workplace.is_night()
            });
            let mornings = collect_slots(roster, physician, next_day.index..=next_day.index, |duty| {
                duty.workplace.is_day()
            });

            if !nights.is_empty() && !mornings.is_empty() {
                violations.push(create_violation(
                    self.code,
                    physician,
                    Some(next_day.index),
                    nights.into_iter().chain(mornings).collect(),
                    1,
                    format!(
                        "'{}' works a day post on {} right after a night post",
                        problem.physicians[physician].id, next_day.date
                    ),
                ));
            }
        });
    }
}

struct SameDayTransitionConstraint {
    code: ViolationCode,
    policy: SameDayTransitionPolicy,
}

impl FeatureConstraint for SameDayTransitionConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        if !self.policy.is_forbidden(move_ctx.day()) {
            return ConstraintViolation::success();
        }

        let (roster, physician, day) = (move_ctx.roster, move_ctx.physician, move_ctx.slot.day);
        let is_conflict = match move_ctx.slot.workplace.shift() {
            Shift::Day => has_shift(roster, physician, day, Shift::Night),
            Shift::Night => has_shift(roster, physician, day, Shift::Day),
            Shift::Standby => false,
        };

        if is_conflict { ConstraintViolation::fail(self.code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        problem.calendar.days().iter().filter(|day| self.policy.is_forbidden(day)).for_each(|day| {
            if has_shift(roster, physician, day.index, Shift::Day) && has_shift(roster, physician, day.index, Shift::Night)
            {
                violations.push(create_violation(
                    self.code,
                    physician,
                    Some(day.index),
                    collect_slots(roster, physician, day.index..=day.index, |duty| duty.workplace.shift() != Shift::Standby),
                    1,
                    format!("'{}' works both a day and a night post on {}", problem.physicians[physician].id, day.date),
                ));
            }
        });
    }
}
