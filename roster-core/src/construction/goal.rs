#[cfg(test)]
#[path = "../../tests/unit/construction/goal_test.rs"]
mod goal_test;

use crate::construction::features::*;
use crate::models::*;
use crate::utils::GenericResult;

/// Specifies hard rule options and soft term weights of the rostering goal.
#[derive(Clone, Debug)]
pub struct GoalConfig {
    /// A reward for each satisfied preference.
    pub preference_weight: i64,
    /// Defines how preferences are scored.
    pub preference_mode: PreferenceMode,
    /// A weight of the workload balance term.
    pub workload_weight: i64,
    /// A weight of the standby balance term.
    pub standby_balance_weight: i64,
    /// Defines how balance terms measure spread.
    pub balance_measure: Measure,
    /// A reward for each pair of consecutive nights.
    pub consecutive_nights_weight: i64,
    /// A weight of KROZECI deviation from the target.
    pub krozeci_weight: i64,
    /// A cost of a duty at a fallback workplace and a reward for a duty at a preferred one.
    /// The term is added when positive.
    pub preferred_workplace_weight: i64,
    /// A weight of uneven spread of a physician's duties among preferred workplaces. The term is
    /// added when positive.
    pub workplace_distribution_weight: i64,
    /// A target amount of urgent care duties per KROZECI physician.
    pub krozeci_target: u32,
    /// Workplaces which count as urgent care for KROZECI physicians.
    pub krozeci_workplaces: WorkplaceSet,
    /// Defines on which dates a day post and a night post cannot be combined.
    pub same_day_transition: SameDayTransitionPolicy,
    /// An optional cap of consecutive working days.
    pub max_consecutive_days: Option<usize>,
    /// Penalties for incomplete rosters.
    pub penalties: Penalties,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            preference_weight: 10,
            preference_mode: PreferenceMode::default(),
            workload_weight: 1,
            standby_balance_weight: 1,
            balance_measure: Measure::Variance,
            consecutive_nights_weight: 2,
            krozeci_weight: 5,
            preferred_workplace_weight: 0,
            workplace_distribution_weight: 0,
            krozeci_target: 2,
            krozeci_workplaces: [Workplace::AbdPrip].into_iter().collect(),
            same_day_transition: SameDayTransitionPolicy::default(),
            max_consecutive_days: None,
            penalties: Penalties::default(),
        }
    }
}

/// Creates a goal context with all hard rules and soft terms configured.
pub fn create_goal_context(config: &GoalConfig) -> GenericResult<GoalContext> {
    if !matches!(config.balance_measure, Measure::Variance | Measure::Range) {
        return Err("balance measure should be either variance or range".into());
    }

    let weights = [
        ("preference", config.preference_weight),
        ("workload", config.workload_weight),
        ("standby balance", config.standby_balance_weight),
        ("consecutive nights", config.consecutive_nights_weight),
        ("krozeci", config.krozeci_weight),
        ("preferred workplace", config.preferred_workplace_weight),
        ("workplace distribution", config.workplace_distribution_weight),
    ];
    if let Some((name, _)) = weights.iter().find(|(_, weight)| *weight < 0) {
        return Err(format!("{name} weight should be non-negative").into());
    }

    let penalties = [("unassigned", config.penalties.unassigned), ("hard violation", config.penalties.violation)];
    if let Some((name, _)) = penalties.iter().find(|(_, penalty)| !penalty.is_finite() || *penalty < 0.) {
        return Err(format!("{name} penalty should be a finite non-negative number").into());
    }

    let mut features = vec![
        create_eligibility_feature("eligibility", ELIGIBILITY_CODE)?,
        create_availability_feature("availability", AVAILABILITY_CODE)?,
        create_daily_duties_feature("daily_duties", DAILY_DUTIES_CODE)?,
        create_night_to_day_feature("night_to_day", NIGHT_TO_DAY_CODE)?,
        create_night_limits_feature("night_limits", MAX_NIGHTS_CODE, MIN_NIGHTS_CODE)?,
        create_weekend_feature("weekend_policy", WEEKEND_CODE)?,
        create_max_day_shifts_feature("max_day_shifts", MAX_DAY_SHIFTS_CODE)?,
        create_fixed_day_shifts_feature("fixed_day_shifts", FIXED_DAY_SHIFTS_CODE)?,
    ];

    if config.same_day_transition != SameDayTransitionPolicy::Never {
        features.push(create_same_day_transition_feature(
            "same_day_transition",
            SAME_DAY_TRANSITION_CODE,
            config.same_day_transition,
        )?);
    }

    if let Some(max_consecutive) = config.max_consecutive_days {
        features.push(create_consecutive_days_feature("consecutive_days", CONSECUTIVE_DAYS_CODE, max_consecutive)?);
    }

    features.extend([
        create_preferences_feature("preferences", config.preference_weight, config.preference_mode)?,
        create_workload_balance_feature("workload_balance", config.workload_weight, config.balance_measure)?,
        create_standby_balance_feature("standby_balance", config.standby_balance_weight, config.balance_measure)?,
        create_consecutive_nights_feature("consecutive_nights", config.consecutive_nights_weight)?,
        create_krozeci_feature(
            "krozeci_frequency",
            config.krozeci_weight,
            config.krozeci_target,
            config.krozeci_workplaces,
        )?,
    ]);

    if config.preferred_workplace_weight > 0 {
        features.push(create_preferred_workplaces_feature("preferred_workplaces", config.preferred_workplace_weight)?);
    }

    if config.workplace_distribution_weight > 0 {
        features.push(create_workplace_distribution_feature(
            "workplace_distribution",
            config.workplace_distribution_weight,
        )?);
    }

    GoalContext::new(features.as_slice(), config.penalties)
}
