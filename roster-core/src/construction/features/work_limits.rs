//! Features which limit amount of work: a cap of day posts per month, an exact amount of day
//! posts for restricted participation and a cap of consecutive working days.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/work_limits_test.rs"]
mod work_limits_test;

use super::*;

/// Creates a feature which caps monthly day posts for physicians who have such limit set.
pub fn create_max_day_shifts_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(MaxDayShiftsConstraint { code }).build()
}

/// Creates a feature which keeps monthly day posts of physicians with restricted participation
/// at their fixed amount. Missing posts can be added only by further assignments, so they are
/// reported by audit only. Their night posts are fixed through night limits.
pub fn create_fixed_day_shifts_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(FixedDayShiftsConstraint { code }).build()
}

/// Creates a feature which limits amount of consecutive days with any duty.
pub fn create_consecutive_days_feature(
    name: &str,
    code: ViolationCode,
    max_consecutive: usize,
) -> Result<Feature, GenericError> {
    if max_consecutive == 0 {
        return Err("max consecutive days should be positive".into());
    }

    FeatureBuilder::default()
        .with_name(name)
        .with_constraint(ConsecutiveDaysConstraint { code, max_consecutive })
        .build()
}

struct MaxDayShiftsConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for MaxDayShiftsConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let limit = match move_ctx.physician().max_day_shifts {
            Some(limit) if move_ctx.slot.workplace.is_day() => limit as usize,
            _ => return ConstraintViolation::success(),
        };

        let month = month_of(move_ctx.problem, move_ctx.slot.day);
        let day_posts = count_duties(move_ctx.roster, move_ctx.physician, month, |duty| duty.workplace.is_day());

        if day_posts + 1 > limit { ConstraintViolation::fail(self.code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let candidate = &problem.physicians[physician];
        let Some(limit) = candidate.max_day_shifts.map(|limit| limit as usize) else {
            return;
        };

        month_ranges(problem).for_each(|month| {
            let day_posts = collect_slots(roster, physician, month, |duty| duty.workplace.is_day());
            if day_posts.len() > limit {
                let count = day_posts.len();
                violations.push(create_violation(
                    self.code,
                    physician,
                    None,
                    day_posts,
                    count - limit,
                    format!("'{}' has {count} day posts in a month, at most {limit} allowed", candidate.id),
                ));
            }
        });
    }
}

struct FixedDayShiftsConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for FixedDayShiftsConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let fixed = match move_ctx.physician().fixed_shifts {
            Some(fixed) if move_ctx.slot.workplace.is_day() => fixed.day as usize,
            _ => return ConstraintViolation::success(),
        };

        let month = month_of(move_ctx.problem, move_ctx.slot.day);
        let day_posts = count_duties(move_ctx.roster, move_ctx.physician, month, |duty| duty.workplace.is_day());

        if day_posts + 1 > fixed { ConstraintViolation::fail(self.code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let candidate = &problem.physicians[physician];
        let Some(fixed) = candidate.fixed_shifts.map(|fixed| fixed.day as usize) else {
            return;
        };

        month_ranges(problem).for_each(|month| {
            let day_posts = collect_slots(roster, physician, month, |duty| duty.workplace.is_day());
            let count = day_posts.len();

            if count != fixed {
                let slots = if count > fixed { day_posts } else { Vec::default() };
                violations.push(create_violation(
                    self.code,
                    physician,
                    None,
                    slots,
                    count.abs_diff(fixed),
                    format!("'{}' has {count} day posts in a month, exactly {fixed} expected", candidate.id),
                ));
            }
        });
    }
}

struct ConsecutiveDaysConstraint {
    code: ViolationCode,
    max_consecutive: usize,
}

impl FeatureConstraint for ConsecutiveDaysConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let (roster, physician, day) = (move_ctx.roster, move_ctx.physician, move_ctx.slot.day);
        if roster.is_working(physician, day) {
            return ConstraintViolation::success();
        }

        let is_working = |other: &usize| roster.is_working(physician, *other);
        let before = (0..day).rev().take_while(is_working).count();
        let after = (day + 1..move_ctx.problem.calendar.len()).take_while(is_working).count();

        if before + 1 + after > self.max_consecutive {
            ConstraintViolation::fail(self.code)
        } else {
            ConstraintViolation::success()
        }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let days = problem.calendar.len();
        let mut start = 0;

        while start < days {
            let length = (start..days).take_while(|&day| roster.is_working(physician, day)).count();
            if length > self.max_consecutive {
                let run = start..=(start + length - 1);
                violations.push(create_violation(
                    self.code,
                    physician,
                    Some(start),
                    collect_slots(roster, physician, run, |_| true),
                    length - self.max_consecutive,
                    format!(
                        "'{}' works {length} consecutive days from {}, at most {} allowed",
                        problem.physicians[physician].id,
                        problem.calendar.days()[start].date,
                        self.max_consecutive
                    ),
                ));
            }

            start += length.max(1);
        }
    }
}
