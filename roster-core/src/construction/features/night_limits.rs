//! A feature which keeps monthly amount of night posts between the owed minimum and the allowed
//! maximum.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/night_limits_test.rs"]
mod night_limits_test;

use super::*;

/// Creates a night limits feature. The maximum is checked on every move, the minimum can be
/// satisfied only by further assignments, so it is reported by audit only.
pub fn create_night_limits_feature(
    name: &str,
    max_code: ViolationCode,
    min_code: ViolationCode,
) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(NightLimitsConstraint { max_code, min_code }).build()
}

struct NightLimitsConstraint {
    max_code: ViolationCode,
    min_code: ViolationCode,
}

impl FeatureConstraint for NightLimitsConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        if !move_ctx.slot.workplace.is_night() {
            return ConstraintViolation::success();
        }

        let max_nights = move_ctx.problem.night_limits.max_nights(move_ctx.physician()) as usize;
        let month = month_of(move_ctx.problem, move_ctx.slot.day);
        let nights = count_duties(move_ctx.roster, move_ctx.physician, month, |duty| duty.workplace.is_night());

        if nights + 1 > max_nights { ConstraintViolation::fail(self.max_code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let candidate = &problem.physicians[physician];
        let max_nights = problem.night_limits.max_nights(candidate) as usize;
        let min_nights = problem.night_limits.min_nights(candidate) as usize;

        month_ranges(problem).for_each(|month| {
            let first_day = *month.start();
            let nights = collect_slots(roster, physician, month, |duty| duty.workplace.is_night());
            let date = problem.calendar.days()[first_day].date;
            let period = format!("{}-{:02}", date.year(), u8::from(date.month()));

            if nights.len() > max_nights {
                violations.push(create_violation(
                    self.max_code,
                    physician,
                    None,
                    nights.clone(),
                    nights.len() - max_nights,
                    format!("'{}' has {} nights in {period}, at most {max_nights} allowed", candidate.id, nights.len()),
                ));
            }

            if nights.len() < min_nights {
                violations.push(create_violation(
                    self.min_code,
                    physician,
                    None,
                    Vec::default(),
                    min_nights - nights.len(),
                    format!("'{}' has {} nights in {period}, at least {min_nights} owed", candidate.id, nights.len()),
                ));
            }
        });
    }
}
