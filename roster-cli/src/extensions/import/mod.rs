//! Import of rostering inputs: a master sheet, a preference list and a partial roster, all as
//! tab separated tables.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/import/import_test.rs"]
mod import_test;

mod tsv;
pub use self::tsv::*;

use super::config::*;
use roster_core::construction::goal::create_goal_context;
use roster_core::models::{Calendar, Problem, ProblemBuilder};
use roster_core::utils::GenericResult;
use std::io::{BufReader, Read};
use time::Date;
use time::macros::format_description;

/// Parses a date either in `YYYY-MM-DD` or in `DD.MM.YYYY` format.
pub fn parse_date(value: &str) -> GenericResult<Date> {
    let value = value.trim();

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(value, format_description!("[day].[month].[year]")))
        .map_err(|err| format!("cannot parse date '{value}': {err}").into())
}

/// Reads all inputs and creates a rostering problem.
pub fn read_problem<R: Read>(
    master_sheet: BufReader<R>,
    preferences: Option<BufReader<R>>,
    partial_roster: Option<BufReader<R>>,
    config: &Config,
) -> GenericResult<Problem> {
    let (start, end) = config.period()?;
    let calendar = Calendar::new(start, end, config.holidays()?.as_slice())?;

    let physicians = read_master_sheet(master_sheet)?;
    let preferences = preferences.map(read_preferences).transpose()?.unwrap_or_default();
    let anchors = partial_roster.map(read_partial_roster).transpose()?.unwrap_or_default();

    let goal = create_goal_context(&create_goal_config(config)?)?;

    let builder = create_coverage(config)?
        .into_iter()
        .fold(ProblemBuilder::default(), |builder, (workplace, coverage)| builder.with_coverage(workplace, coverage));

    let problem = builder
        .with_calendar(calendar)
        .with_physicians(physicians)
        .with_preferences(preferences)
        .with_anchors(anchors)
        .with_night_limits(create_night_limits(config))
        .with_workload_weights(create_workload_weights(config)?)
        .with_goal(goal)
        .build()?;

    Ok(problem)
}
