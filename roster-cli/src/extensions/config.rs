//! Rostering configuration.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

extern crate serde_json;

use super::import::parse_date;
use roster_core::construction::features::{PreferenceMode, SameDayTransitionPolicy};
use roster_core::construction::goal::GoalConfig;
use roster_core::models::{Coverage, Measure, NightLimits, Penalties, Workplace, WorkloadWeights, WorkplaceSet};
use roster_core::solver::SearchConfig;
use roster_core::utils::{GenericError, GenericResult, RosterError};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::{BufReader, Read};
use time::Date;

/// At most two working days in any three consecutive days.
const DEFAULT_MAX_CONSECUTIVE_DAYS: usize = 2;

/// A rostering configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    /// First day of the period in `YYYY-MM-DD` format.
    pub start_date: String,
    /// Last day of the period, inclusive.
    pub end_date: String,
    /// A target amount of urgent care duties per KROZECI physician.
    pub krozeci_scheduled: Option<u32>,
    /// Workload weights: `workday`, `weekend`, `night`, `standby` and optional `night_<year>`.
    pub workplace_weights: HashMap<String, i64>,
    /// A reward for each satisfied preference.
    pub preferential_assignment_day: Option<i64>,
    /// A weight of the workload balance term.
    pub weight_equal_workload: Option<i64>,
    /// A reward for each pair of consecutive nights.
    pub weight_consecutive_nights: Option<i64>,
    /// A weight of the standby balance term.
    pub weight_standby_balance: Option<i64>,
    /// A weight of KROZECI deviation from the target.
    pub weight_krozeci: Option<i64>,
    /// A cost of a duty at a fallback workplace, a reward at a preferred one.
    pub weight_preferred_workplace: Option<i64>,
    /// A weight of uneven spread of duties among preferred workplaces.
    pub weight_workplace_distribution: Option<i64>,
    /// A cost of each free slot left empty.
    pub weight_unassigned: Option<f64>,
    /// A cost of each hard rule violation unit.
    pub weight_hard_violation: Option<f64>,
    /// Defines how preferences are scored.
    pub preference_mode: Option<PreferenceModeType>,
    /// Defines how balance terms measure spread.
    pub balance_measure: Option<BalanceMeasureType>,
    /// Defines on which dates a day post and a night post cannot be combined.
    pub same_day_transition: Option<SameDayTransitionType>,
    /// Public holidays.
    pub holidays: Option<Vec<String>>,
    /// When set, the standby post is staffed on working days only. Default is true.
    pub standby_workdays_only: Option<bool>,
    /// A cap of consecutive working days, default is two. Zero disables the rule.
    pub max_consecutive_days: Option<usize>,
    /// Workplaces which count as urgent care for KROZECI physicians.
    pub krozeci_workplaces: Option<Vec<String>>,
    /// Minimum nights per month indexed by specialization year.
    pub min_nights: Option<Vec<u32>>,
    /// Overrides staffing days per workplace code.
    pub coverage: Option<HashMap<String, CoverageType>>,
    /// Search parameters.
    pub search: Option<SearchSettings>,
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceModeType {
    Reward,
    Symmetric,
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMeasureType {
    Variance,
    Range,
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SameDayTransitionType {
    Workdays,
    WeekendsAndHolidays,
    Always,
    Never,
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoverageType {
    Daily,
    Workdays,
    WeekendsAndHolidays,
    Never,
}

/// Search parameters, unset ones keep their defaults.
#[derive(Clone, Default, Deserialize, Debug)]
pub struct SearchSettings {
    /// A random seed.
    pub seed: Option<u64>,
    /// Amount of independent restarts.
    pub restarts: Option<usize>,
    /// A maximum amount of improvement iterations per restart.
    pub max_iterations: Option<usize>,
    /// A maximum duration of improvement phase per restart in seconds.
    pub max_time: Option<f64>,
    /// A maximum amount of iterations without improvement.
    pub max_stagnation: Option<usize>,
    /// An initial annealing temperature.
    pub initial_temperature: Option<f64>,
    /// A geometric cooling rate.
    pub cooling_rate: Option<f64>,
    /// A probability to try a swap move.
    pub swap_probability: Option<f64>,
}

impl Config {
    /// Returns the rostering period.
    pub fn period(&self) -> GenericResult<(Date, Date)> {
        Ok((parse_date(self.start_date.as_str())?, parse_date(self.end_date.as_str())?))
    }

    /// Returns public holidays.
    pub fn holidays(&self) -> GenericResult<Vec<Date>> {
        self.holidays.iter().flatten().map(|date| parse_date(date.as_str())).collect()
    }
}

/// Reads config from json.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, GenericError> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Checks that objective weights are non-negative and penalties are finite non-negative numbers.
fn validate_goal_weights(config: &Config) -> Result<(), RosterError> {
    let weights = [
        ("preferential_assignment_day", config.preferential_assignment_day),
        ("weight_equal_workload", config.weight_equal_workload),
        ("weight_consecutive_nights", config.weight_consecutive_nights),
        ("weight_standby_balance", config.weight_standby_balance),
        ("weight_krozeci", config.weight_krozeci),
        ("weight_preferred_workplace", config.weight_preferred_workplace),
        ("weight_workplace_distribution", config.weight_workplace_distribution),
    ];
    if let Some((name, Some(weight))) = weights.iter().find(|(_, weight)| weight.is_some_and(|weight| weight < 0)) {
        return Err(RosterError::inconsistency(format!("'{name}' should be non-negative, got {weight}")));
    }

    let penalties =
        [("weight_unassigned", config.weight_unassigned), ("weight_hard_violation", config.weight_hard_violation)];
    if let Some((name, Some(penalty))) =
        penalties.iter().find(|(_, penalty)| penalty.is_some_and(|penalty| !penalty.is_finite() || penalty < 0.))
    {
        let message = format!("'{name}' should be a finite non-negative number, got {penalty}");
        return Err(RosterError::inconsistency(message));
    }

    Ok(())
}

/// Creates goal settings from config.
pub fn create_goal_config(config: &Config) -> GenericResult<GoalConfig> {
    validate_goal_weights(config)?;

    let default = GoalConfig::default();

    let krozeci_workplaces = match &config.krozeci_workplaces {
        Some(codes) => codes.iter().map(|code| code.parse::<Workplace>()).collect::<Result<WorkplaceSet, _>>()?,
        None => default.krozeci_workplaces,
    };

    Ok(GoalConfig {
        preference_weight: config.preferential_assignment_day.unwrap_or(default.preference_weight),
        preference_mode: match config.preference_mode {
            Some(PreferenceModeType::Reward) => PreferenceMode::Reward,
            Some(PreferenceModeType::Symmetric) => PreferenceMode::Symmetric,
            None => default.preference_mode,
        },
        workload_weight: config.weight_equal_workload.unwrap_or(default.workload_weight),
        standby_balance_weight: config.weight_standby_balance.unwrap_or(default.standby_balance_weight),
        balance_measure: match config.balance_measure {
            Some(BalanceMeasureType::Variance) => Measure::Variance,
            Some(BalanceMeasureType::Range) => Measure::Range,
            None => default.balance_measure,
        },
        consecutive_nights_weight: config.weight_consecutive_nights.unwrap_or(default.consecutive_nights_weight),
        krozeci_weight: config.weight_krozeci.unwrap_or(default.krozeci_weight),
        preferred_workplace_weight: config.weight_preferred_workplace.unwrap_or(default.preferred_workplace_weight),
        workplace_distribution_weight: config
            .weight_workplace_distribution
            .unwrap_or(default.workplace_distribution_weight),
        krozeci_target: config.krozeci_scheduled.unwrap_or(default.krozeci_target),
        krozeci_workplaces,
        same_day_transition: match config.same_day_transition {
            Some(SameDayTransitionType::Workdays) => SameDayTransitionPolicy::Workdays,
            Some(SameDayTransitionType::WeekendsAndHolidays) => SameDayTransitionPolicy::WeekendsAndHolidays,
            Some(SameDayTransitionType::Always) => SameDayTransitionPolicy::Always,
            Some(SameDayTransitionType::Never) => SameDayTransitionPolicy::Never,
            None => default.same_day_transition,
        },
        max_consecutive_days: match config.max_consecutive_days {
            Some(0) => None,
            Some(max_consecutive) => Some(max_consecutive),
            None => Some(DEFAULT_MAX_CONSECUTIVE_DAYS),
        },
        penalties: Penalties {
            unassigned: config.weight_unassigned.unwrap_or(default.penalties.unassigned),
            violation: config.weight_hard_violation.unwrap_or(default.penalties.violation),
        },
    })
}

/// Creates workload weights from config. All base weights have to be present.
pub fn create_workload_weights(config: &Config) -> Result<WorkloadWeights, RosterError> {
    let weights = &config.workplace_weights;
    let get_weight = |key: &str| {
        weights.get(key).copied().ok_or_else(|| RosterError::inconsistency(format!("missing workload weight: '{key}'")))
    };

    let night_by_year = weights
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "workday" | "weekend" | "night" | "standby"))
        .map(|(key, weight)| {
            key.strip_prefix("night_")
                .and_then(|year| year.parse::<u32>().ok())
                .map(|year| (year, *weight))
                .ok_or_else(|| RosterError::inconsistency(format!("unknown workload weight: '{key}'")))
        })
        .collect::<Result<_, _>>()?;

    let workload_weights = WorkloadWeights {
        workday: get_weight("workday")?,
        weekend: get_weight("weekend")?,
        night: get_weight("night")?,
        night_by_year,
        standby: get_weight("standby")?,
    };
    workload_weights.validate()?;

    Ok(workload_weights)
}

/// Creates night limits from config.
pub fn create_night_limits(config: &Config) -> NightLimits {
    let default = NightLimits::default();

    NightLimits { min_by_year: config.min_nights.clone().unwrap_or(default.min_by_year), ..default }
}

/// Returns staffing days of every workplace.
pub fn create_coverage(config: &Config) -> GenericResult<Vec<(Workplace, Coverage)>> {
    let overrides = config
        .coverage
        .iter()
        .flatten()
        .map(|(code, coverage)| {
            let coverage = match coverage {
                CoverageType::Daily => Coverage::Daily,
                CoverageType::Workdays => Coverage::WorkdaysOnly,
                CoverageType::WeekendsAndHolidays => Coverage::WeekendsAndHolidaysOnly,
                CoverageType::Never => Coverage::Never,
            };
            code.parse::<Workplace>().map(|workplace| (workplace, coverage))
        })
        .collect::<Result<HashMap<_, _>, _>>()?;

    let standby = if config.standby_workdays_only.unwrap_or(true) { Coverage::WorkdaysOnly } else { Coverage::Daily };

    Ok(Workplace::ALL
        .iter()
        .map(|&workplace| {
            let default = if workplace == Workplace::AbdPrip { standby } else { Coverage::Daily };
            (workplace, overrides.get(&workplace).copied().unwrap_or(default))
        })
        .collect())
}

/// Creates search parameters from config.
pub fn create_search_config(config: &Config) -> SearchConfig {
    let default = SearchConfig::default();
    let Some(search) = config.search.as_ref() else {
        return default;
    };

    SearchConfig {
        restarts: search.restarts.unwrap_or(default.restarts),
        max_iterations: search.max_iterations.or(default.max_iterations),
        max_time: search.max_time.or(default.max_time),
        max_stagnation: search.max_stagnation.or(default.max_stagnation),
        initial_temperature: search.initial_temperature.unwrap_or(default.initial_temperature),
        cooling_rate: search.cooling_rate.unwrap_or(default.cooling_rate),
        swap_probability: search.swap_probability.unwrap_or(default.swap_probability),
        ..default
    }
}
