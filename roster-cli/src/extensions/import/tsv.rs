#[cfg(test)]
#[path = "../../../tests/unit/extensions/import/tsv_test.rs"]
mod tsv_test;

extern crate csv;
extern crate serde;

use super::parse_date;
use roster_core::models::{
    Anchor, Category, FixedShifts, Physician, Preference, PreferenceRecord, Workplace, WorkplaceSet,
};
use roster_core::utils::{GenericError, GenericResult};
use serde::Deserialize;
use std::io::{BufReader, Read};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct TsvPhysician {
    id: String,
    workplaces: String,
    year: u32,
    category: Option<String>,
    exemption: Option<u32>,
    max_day_shifts: Option<u32>,
    maybe_workplaces: Option<String>,
    fixed_day_shifts: Option<u32>,
    fixed_night_shifts: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct TsvPreference {
    id: String,
    date: String,
    preference: Option<String>,
}

const DATE_COLUMN: &str = "DATE";

fn create_reader<R: Read>(reader: BufReader<R>) -> csv::Reader<BufReader<R>> {
    csv::ReaderBuilder::new().delimiter(b'\t').trim(csv::Trim::All).from_reader(reader)
}

fn read_tsv_entries<T, R: Read>(reader: BufReader<R>, description: &str) -> GenericResult<Vec<T>>
where
    for<'de> T: Deserialize<'de>,
{
    create_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|err| format!("cannot read {description}: '{err}'").into())
}

fn parse_workplaces(codes: &str, id: &str) -> GenericResult<WorkplaceSet> {
    codes
        .split([',', ';'])
        .filter(|code| !code.trim().is_empty())
        .map(|code| code.parse::<Workplace>())
        .collect::<Result<WorkplaceSet, _>>()
        .map_err(|err| GenericError::from(format!("physician '{id}': {err}")))
}

/// Reads physicians from the master sheet with `ID`, `WORKPLACES` (comma separated codes),
/// `YEAR`, `CATEGORY`, `EXEMPTION` and `MAX_DAY_SHIFTS` columns.
///
/// Optional `MAYBE_WORKPLACES` lists fallback workplaces: a physician is eligible for them, but
/// a duty there is less desirable. Optional `FIXED_DAY_SHIFTS` and `FIXED_NIGHT_SHIFTS` set an
/// exact monthly amount of day posts and nights and have to be given together.
pub fn read_master_sheet<R: Read>(reader: BufReader<R>) -> GenericResult<Vec<Physician>> {
    read_tsv_entries::<TsvPhysician, _>(reader, "master sheet")?
        .into_iter()
        .map(|entry| -> GenericResult<Physician> {
            let id = entry.id.trim();
            let fallback_workplaces = parse_workplaces(entry.maybe_workplaces.as_deref().unwrap_or_default(), id)?;
            let mut workplaces = parse_workplaces(entry.workplaces.as_str(), id)?;
            fallback_workplaces.iter().for_each(|workplace| workplaces.insert(workplace));

            let fixed_shifts = match (entry.fixed_day_shifts, entry.fixed_night_shifts) {
                (Some(day), Some(night)) => Some(FixedShifts { day, night }),
                (None, None) => None,
                _ => {
                    return Err(format!("physician '{id}': fixed day and night shifts should be set together").into());
                }
            };

            let mut physician = Physician::new(id, entry.year, entry.exemption.unwrap_or_default(), workplaces);
            physician.category = entry.category.as_deref().unwrap_or_default().parse::<Category>()?;
            physician.max_day_shifts = entry.max_day_shifts;
            physician.fallback_workplaces = fallback_workplaces;
            physician.fixed_shifts = fixed_shifts;

            Ok(physician)
        })
        .collect()
}

/// Reads wishes from the preference list with `ID`, `DATE` and `PREFERENCE` columns. A
/// preference is either a workplace code, `OFF`, `UNAVAILABLE`, `UNAVAILABLE-DAY` or
/// `UNAVAILABLE-NIGHT`; empty ones are skipped.
pub fn read_preferences<R: Read>(reader: BufReader<R>) -> GenericResult<Vec<PreferenceRecord>> {
    read_tsv_entries::<TsvPreference, _>(reader, "preferences")?
        .into_iter()
        .filter_map(|entry| {
            let preference = entry.preference.filter(|preference| !preference.trim().is_empty())?;

            Some(parse_date(entry.date.as_str()).and_then(|date| {
                Ok(PreferenceRecord {
                    physician: entry.id.trim().to_string(),
                    date,
                    preference: preference.parse::<Preference>()?,
                })
            }))
        })
        .collect()
}

/// Reads anchors from the partial roster: a `DATE` column followed by one column per workplace
/// code. Empty cells are free, filled cells contain a physician id.
pub fn read_partial_roster<R: Read>(reader: BufReader<R>) -> GenericResult<Vec<Anchor>> {
    let mut reader = create_reader(reader);
    let headers = reader.headers().map_err(|err| format!("cannot read partial roster header: '{err}'"))?.clone();

    if headers.get(0) != Some(DATE_COLUMN) {
        return Err(format!("partial roster should start with '{DATE_COLUMN}' column").into());
    }

    let workplaces = headers.iter().skip(1).map(|code| code.parse::<Workplace>()).collect::<Result<Vec<_>, _>>()?;

    let mut anchors = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| format!("cannot read partial roster: '{err}'"))?;
        let date = parse_date(record.get(0).unwrap_or_default())?;

        anchors.extend(
            record
                .iter()
                .skip(1)
                .zip(workplaces.iter())
                .filter(|(cell, _)| !cell.is_empty())
                .map(|(cell, &workplace)| Anchor { date, workplace, physician: cell.to_string() }),
        );
    }

    Ok(anchors)
}
