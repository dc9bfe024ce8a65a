//! Provides extensions to build rostering variants as features.

use crate::models::*;
use crate::utils::GenericError;
use std::ops::RangeInclusive;

mod availability;
pub use self::availability::*;

mod consecutive_nights;
pub use self::consecutive_nights::*;

mod daily_duties;
pub use self::daily_duties::*;

mod eligibility;
pub use self::eligibility::*;

mod krozeci;
pub use self::krozeci::*;

mod night_limits;
pub use self::night_limits::*;

mod preferences;
pub use self::preferences::*;

mod transitions;
pub use self::transitions::*;

mod weekends;
pub use self::weekends::*;

mod work_limits;
pub use self::work_limits::*;

mod workload;
pub use self::workload::*;

/// A physician is assigned to a workplace outside of the eligible set.
pub const ELIGIBILITY_CODE: ViolationCode = 1;
/// A physician is assigned on a date marked as unavailable.
pub const AVAILABILITY_CODE: ViolationCode = 2;
/// Two posts of the same shift, or a standby combined with another post, on the same date.
pub const DAILY_DUTIES_CODE: ViolationCode = 3;
/// A night post followed by a day post on the next date.
pub const NIGHT_TO_DAY_CODE: ViolationCode = 4;
/// A day post and a night post on the same date.
pub const SAME_DAY_TRANSITION_CODE: ViolationCode = 5;
/// More night posts per month than allowed.
pub const MAX_NIGHTS_CODE: ViolationCode = 6;
/// Less night posts per month than owed.
pub const MIN_NIGHTS_CODE: ViolationCode = 7;
/// Weekend policy is broken.
pub const WEEKEND_CODE: ViolationCode = 8;
/// More day posts per month than allowed.
pub const MAX_DAY_SHIFTS_CODE: ViolationCode = 9;
/// Too many consecutive working days.
pub const CONSECUTIVE_DAYS_CODE: ViolationCode = 10;
/// Day posts per month differ from the fixed amount of restricted participation.
pub const FIXED_DAY_SHIFTS_CODE: ViolationCode = 11;

/// Returns a rule name for the violation code.
pub fn get_rule_name(code: ViolationCode) -> &'static str {
    match code {
        ELIGIBILITY_CODE => "eligibility",
        AVAILABILITY_CODE => "availability",
        DAILY_DUTIES_CODE => "daily_duties",
        NIGHT_TO_DAY_CODE => "night_to_day",
        SAME_DAY_TRANSITION_CODE => "same_day_transition",
        MAX_NIGHTS_CODE => "max_nights",
        MIN_NIGHTS_CODE => "min_nights",
        WEEKEND_CODE => "weekend_policy",
        MAX_DAY_SHIFTS_CODE => "max_day_shifts",
        CONSECUTIVE_DAYS_CODE => "consecutive_days",
        FIXED_DAY_SHIFTS_CODE => "fixed_day_shifts",
        _ => "unknown",
    }
}

/// Counts physician's duties on the given days which match the filter.
fn count_duties<F>(roster: &Roster, physician: usize, days: RangeInclusive<usize>, filter: F) -> usize
where
    F: Fn(&Duty) -> bool,
{
    days.map(|day| roster.duties_on(physician, day).iter().filter(|duty| filter(duty)).count()).sum()
}

/// Collects slots of physician's duties on the given days which match the filter.
fn collect_slots<F>(roster: &Roster, physician: usize, days: RangeInclusive<usize>, filter: F) -> Vec<usize>
where
    F: Fn(&Duty) -> bool,
{
    let filter = &filter;

    days.flat_map(move |day| {
        roster.duties_on(physician, day).iter().filter(move |duty| filter(duty)).map(|duty| duty.slot)
    })
    .collect()
}

fn has_shift(roster: &Roster, physician: usize, day: usize, shift: Shift) -> bool {
    roster.duties_on(physician, day).iter().any(|duty| duty.workplace.shift() == shift)
}

fn month_of(problem: &Problem, day: usize) -> RangeInclusive<usize> {
    problem.calendar.month_days(problem.calendar.days()[day].month)
}

fn month_ranges(problem: &Problem) -> impl Iterator<Item = RangeInclusive<usize>> + '_ {
    (0..problem.calendar.months().len()).map(|month| problem.calendar.month_days(month))
}

fn create_violation(
    code: ViolationCode,
    physician: usize,
    day: Option<usize>,
    slots: Vec<usize>,
    amount: usize,
    details: String,
) -> RuleViolation {
    RuleViolation { code, physician, day, slots, amount, details }
}
