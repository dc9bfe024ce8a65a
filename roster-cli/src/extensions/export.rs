//! Export of the final roster and its diagnostics.

#[cfg(test)]
#[path = "../../tests/unit/extensions/export_test.rs"]
mod export_test;

extern crate serde_json;

use roster_core::models::Workplace;
use roster_core::solution::Solution;
use roster_core::utils::GenericResult;
use serde::Serialize;
use std::io::{BufWriter, Write};
use time::Date;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Diagnostics {
    cost: f64,
    is_complete: bool,
    cost_breakdown: Vec<CostTermInfo>,
    unresolved: Vec<UnresolvedInfo>,
    violations: Vec<ViolationInfo>,
    statistics: Vec<StatisticsInfo>,
    search: Vec<SearchInfo>,
}

#[derive(Serialize)]
struct CostTermInfo {
    name: String,
    value: f64,
    cost: f64,
}

#[derive(Serialize)]
struct BlockerInfo {
    rule: String,
    physicians: usize,
}

#[derive(Serialize)]
struct UnresolvedInfo {
    date: String,
    workplace: String,
    blockers: Vec<BlockerInfo>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViolationInfo {
    rule: String,
    physician: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    cells: Vec<(String, String)>,
    amount: usize,
    is_anchored: bool,
    details: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatisticsInfo {
    physician: String,
    workplaces: Vec<(String, usize)>,
    nights: Vec<usize>,
    min_nights: u32,
    max_nights: u32,
    weekend_duties: usize,
    workload: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchInfo {
    restart: usize,
    phase: String,
    iterations: usize,
    accepted: usize,
    improved: usize,
    construction_cost: f64,
    final_cost: f64,
    duration: u128,
}

const DATE_COLUMN: &str = "DATE";

/// Writes the roster as a tab separated grid in the partial roster shape.
pub fn write_roster<W: Write>(solution: &Solution, writer: BufWriter<W>) -> GenericResult<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    let write_err = |err: csv::Error| format!("cannot write roster: '{err}'");

    writer
        .write_record(std::iter::once(DATE_COLUMN).chain(Workplace::ALL.iter().map(|workplace| workplace.code())))
        .map_err(write_err)?;

    // assignments are ordered by date
    let rows = solution.assignments.iter().fold(Vec::<(Date, [Option<&str>; 9])>::new(), |mut rows, assignment| {
        if rows.last().is_none_or(|(date, _)| *date != assignment.date) {
            rows.push((assignment.date, [None; 9]));
        }
        if let Some((_, cells)) = rows.last_mut() {
            cells[assignment.workplace.index()] = assignment.physician.as_deref();
        }

        rows
    });

    for (date, cells) in rows {
        let cells = cells.iter().map(|cell| cell.unwrap_or_default().to_string());

        writer.write_record(std::iter::once(date.to_string()).chain(cells)).map_err(write_err)?;
    }

    writer.flush().map_err(|err| format!("cannot write roster: '{err}'"))?;

    Ok(())
}

/// Writes unresolved slots, violations, cost breakdown and statistics as json.
pub fn write_diagnostics<W: Write>(solution: &Solution, writer: BufWriter<W>) -> GenericResult<()> {
    let diagnostics = Diagnostics {
        cost: solution.cost,
        is_complete: solution.unresolved.is_empty(),
        cost_breakdown: solution
            .cost_breakdown
            .iter()
            .map(|term| CostTermInfo { name: term.name.clone(), value: term.value, cost: term.cost })
            .collect(),
        unresolved: solution
            .unresolved
            .iter()
            .map(|slot| UnresolvedInfo {
                date: slot.date.to_string(),
                workplace: slot.workplace.to_string(),
                blockers: slot
                    .blockers
                    .iter()
                    .map(|blocker| BlockerInfo { rule: blocker.rule.clone(), physicians: blocker.physicians })
                    .collect(),
            })
            .collect(),
        violations: solution
            .violations
            .iter()
            .map(|violation| ViolationInfo {
                rule: violation.rule.clone(),
                physician: violation.physician.clone(),
                date: violation.date.map(|date| date.to_string()),
                cells: violation.slots.iter().map(|(date, workplace)| (date.to_string(), workplace.to_string())).collect(),
                amount: violation.amount,
                is_anchored: violation.is_anchored,
                details: violation.details.clone(),
            })
            .collect(),
        statistics: solution
            .statistics
            .iter()
            .map(|statistics| StatisticsInfo {
                physician: statistics.physician.clone(),
                workplaces: statistics
                    .workplaces
                    .iter()
                    .filter(|(_, count)| *count > 0)
                    .map(|(workplace, count)| (workplace.to_string(), *count))
                    .collect(),
                nights: statistics.nights.clone(),
                min_nights: statistics.night_limits.0,
                max_nights: statistics.night_limits.1,
                weekend_duties: statistics.weekend_duties,
                workload: statistics.workload,
            })
            .collect(),
        search: solution
            .metrics
            .iter()
            .map(|metrics| SearchInfo {
                restart: metrics.restart,
                phase: format!("{:?}", metrics.phase),
                iterations: metrics.iterations,
                accepted: metrics.accepted,
                improved: metrics.improved,
                construction_cost: metrics.construction_cost,
                final_cost: metrics.final_cost,
                duration: metrics.duration,
            })
            .collect(),
    };

    serde_json::to_writer_pretty(writer, &diagnostics).map_err(|err| format!("cannot write diagnostics: '{err}'"))?;

    Ok(())
}
