//! A physician-workplace eligibility feature.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/eligibility_test.rs"]
mod eligibility_test;

use super::*;

/// Creates an eligibility feature as hard constraint: a physician can be assigned only to
/// workplaces listed for them in the master sheet.
pub fn create_eligibility_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(EligibilityConstraint { code }).build()
}

struct EligibilityConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for EligibilityConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        if move_ctx.physician().is_eligible(move_ctx.slot.workplace) {
            ConstraintViolation::success()
        } else {
            ConstraintViolation::fail(self.code)
        }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let candidate = &problem.physicians[physician];

        violations.extend(roster.duties_of(physician).filter(|(_, duty)| !candidate.is_eligible(duty.workplace)).map(
            |(day, duty)| {
                create_violation(
                    self.code,
                    physician,
                    Some(day),
                    vec![duty.slot],
                    1,
                    format!("'{}' is not eligible for {}", candidate.id, duty.workplace),
                )
            },
        ));
    }
}
