//! A feature which keeps physicians off the dates they cannot work, either at all or within a
//! day or night shift only.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/availability_test.rs"]
mod availability_test;

use super::*;

/// Creates an availability feature as hard constraint.
pub fn create_availability_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(AvailabilityConstraint { code }).build()
}

struct AvailabilityConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for AvailabilityConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        if move_ctx.physician().is_unavailable_for(move_ctx.day().date, move_ctx.slot.workplace.shift()) {
            ConstraintViolation::fail(self.code)
        } else {
            ConstraintViolation::success()
        }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let candidate = &problem.physicians[physician];
        let days = problem.calendar.days();

        violations.extend(
            roster
                .duties_of(physician)
                .filter(|(day, duty)| candidate.is_unavailable_for(days[*day].date, duty.workplace.shift()))
                .map(|(day, duty)| {
                    create_violation(
                        self.code,
                        physician,
                        Some(day),
                        vec![duty.slot],
                        1,
                        format!("'{}' is unavailable for {} on {}", candidate.id, duty.workplace, days[day].date),
                    )
                }),
        );
    }
}
