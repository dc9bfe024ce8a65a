//! A weekend policy feature. The policy depends on whether a physician works any night post in
//! the month:
//! * with nights: at most one weekend or holiday day post, at most one weekend or holiday night
//!   post, and exactly one of the weekend duties is at a MOP workplace;
//! * without nights: at most one weekend, and if it is assigned, all its days are worked.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/weekends_test.rs"]
mod weekends_test;

use super::*;

/// Creates a weekend policy feature.
pub fn create_weekend_feature(name: &str, code: ViolationCode) -> Result<Feature, GenericError> {
    FeatureBuilder::default().with_name(name).with_constraint(WeekendConstraint { code }).build()
}

struct WeekendConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for WeekendConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let (problem, slot) = (move_ctx.problem, move_ctx.slot);
        let day = move_ctx.day();

        // a night post anywhere in the month can switch the policy
        let is_relevant = day.is_weekend_or_holiday()
            || problem.calendar.weekend_unit_of(slot.day).is_some()
            || slot.workplace.is_night();
        if !is_relevant {
            return ConstraintViolation::success();
        }

        let month = month_of(problem, slot.day);
        let state = get_weekend_state(problem, move_ctx.roster, move_ctx.physician, month, Some(slot));

        let is_violated = if state.works_nights {
            state.day_posts > 1 || state.night_posts > 1 || state.mop > 1
        } else {
            state.units.len() > 1
        };

        if is_violated { ConstraintViolation::fail(self.code) } else { ConstraintViolation::success() }
    }

    fn audit(&self, problem: &Problem, roster: &Roster, physician: usize, violations: &mut Vec<RuleViolation>) {
        let id = problem.physicians[physician].id.as_str();

        month_ranges(problem).for_each(|month| {
            let state = get_weekend_state(problem, roster, physician, month, None);
            let mut report = |slots: Vec<usize>, amount: usize, details: String| {
                violations.push(create_violation(self.code, physician, None, slots, amount, details))
            };

            if state.works_nights {
                if state.day_posts > 1 {
                    let details = format!("'{id}' has {} weekend day posts, at most one allowed", state.day_posts);
                    report(state.slots.clone(), state.day_posts - 1, details);
                }

                if state.night_posts > 1 {
                    let details = format!("'{id}' has {} weekend night posts, at most one allowed", state.night_posts);
                    report(state.slots.clone(), state.night_posts - 1, details);
                }

                if state.duties > 0 && state.mop != 1 {
                    let details = format!("'{id}' has {} MOP duties among weekend duties, exactly one required", state.mop);
                    report(state.slots.clone(), state.mop.max(2) - 1, details);
                }
            } else {
                if state.units.len() > 1 {
                    let slots = state
                        .units
                        .iter()
                        .flat_map(|unit| collect_slots(roster, physician, unit.days.clone(), |_| true))
                        .collect();
                    let details = format!("'{id}' works {} weekends, at most one allowed", state.units.len());
                    report(slots, state.units.len() - 1, details);
                }

                state.units.iter().filter(|unit| unit.worked < unit.days.clone().count()).for_each(|unit| {
                    let missing = unit.days.clone().count() - unit.worked;
                    let date = problem.calendar.days()[*unit.days.start()].date;
                    let details = format!("'{id}' works only a part of the weekend starting {date}");
                    report(collect_slots(roster, physician, unit.days.clone(), |_| true), missing, details);
                });
            }
        });
    }
}

struct WorkedUnit {
    days: RangeInclusive<usize>,
    worked: usize,
}

#[derive(Default)]
struct WeekendState {
    works_nights: bool,
    day_posts: usize,
    night_posts: usize,
    mop: usize,
    duties: usize,
    slots: Vec<usize>,
    units: Vec<WorkedUnit>,
}

/// Analyzes weekend duties of the physician within the month, optionally including the slot
/// which is about to be assigned.
fn get_weekend_state(
    problem: &Problem,
    roster: &Roster,
    physician: usize,
    month: RangeInclusive<usize>,
    extra: Option<&Slot>,
) -> WeekendState {
    let calendar = &problem.calendar;
    let duties_on = move |day: usize| {
        let extra = extra.filter(|slot| slot.day == day).map(|slot| Duty { slot: slot.index, workplace: slot.workplace });
        roster.duties_on(physician, day).iter().copied().chain(extra)
    };
    let is_working = |day: usize| duties_on(day).next().is_some();

    let mut state = WeekendState::default();

    month.clone().for_each(|day| {
        let is_weekend = calendar.days()[day].is_weekend_or_holiday();

        duties_on(day).for_each(|duty| {
            state.works_nights |= duty.workplace.is_night();

            if is_weekend {
                state.duties += 1;
                state.slots.push(duty.slot);
                match duty.workplace.shift() {
                    Shift::Day => state.day_posts += 1,
                    Shift::Night => state.night_posts += 1,
                    Shift::Standby => {}
                }
                if duty.workplace.is_mop() {
                    state.mop += 1;
                }
            }
        });
    });

    state.units = calendar
        .weekend_units()
        .iter()
        .filter(|unit| unit.days().any(|day| month.contains(&day)))
        .map(|unit| WorkedUnit { days: unit.days(), worked: unit.days().filter(|&day| is_working(day)).count() })
        .filter(|unit| unit.worked > 0)
        .collect();

    state
}
