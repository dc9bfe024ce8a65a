#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::models::*;
use crate::utils::RosterError;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use time::Date;

/// A pre-filled cell of the partial roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    /// A date.
    pub date: Date,
    /// A workplace.
    pub workplace: Workplace,
    /// Physician id.
    pub physician: String,
}

/// A single wish from the preference list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreferenceRecord {
    /// Physician id.
    pub physician: String,
    /// A date.
    pub date: Date,
    /// The wish.
    pub preference: Preference,
}

/// Workload weights of duties.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkloadWeights {
    /// A day post on a regular working day.
    pub workday: i64,
    /// A day post on a weekend or public holiday.
    pub weekend: i64,
    /// A night post when there is no specific weight for the specialization year.
    pub night: i64,
    /// Night post weights per specialization year.
    pub night_by_year: FxHashMap<u32, i64>,
    /// A standby post.
    pub standby: i64,
}

impl Default for WorkloadWeights {
    fn default() -> Self {
        Self { workday: 1, weekend: 2, night: 3, night_by_year: FxHashMap::default(), standby: 1 }
    }
}

impl WorkloadWeights {
    /// Checks that all weights are non-negative.
    pub fn validate(&self) -> Result<(), RosterError> {
        let base =
            [("workday", self.workday), ("weekend", self.weekend), ("night", self.night), ("standby", self.standby)];
        let mut by_year = self.night_by_year.iter().map(|(year, weight)| (*year, *weight)).collect::<Vec<_>>();
        by_year.sort_unstable();

        let negative = base
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .chain(by_year.into_iter().map(|(year, weight)| (format!("night_{year}"), weight)))
            .find(|(_, weight)| *weight < 0);

        match negative {
            Some((name, weight)) => {
                Err(RosterError::inconsistency(format!("workload weight '{name}' should be non-negative, got {weight}")))
            }
            None => Ok(()),
        }
    }

    /// Returns a workload weight of a duty.
    pub fn weight(&self, workplace: Workplace, day: &CalendarDay, specialization_year: u32) -> i64 {
        match workplace.shift() {
            Shift::Night => self.night_by_year.get(&specialization_year).copied().unwrap_or(self.night),
            Shift::Standby => self.standby,
            Shift::Day if day.is_weekend_or_holiday() => self.weekend,
            Shift::Day => self.workday,
        }
    }
}

/// Defines a rostering problem.
pub struct Problem {
    /// A calendar of the period.
    pub calendar: Calendar,
    /// Physicians to be rostered.
    pub physicians: Vec<Physician>,
    /// All slots of the period.
    pub catalogue: SlotCatalogue,
    /// Pre-filled (slot, physician) assignments.
    pub anchors: Vec<(usize, usize)>,
    /// Night shift limits.
    pub night_limits: NightLimits,
    /// Workload weights.
    pub workload_weights: WorkloadWeights,
    /// Hard rules and cost terms.
    pub goal: Arc<GoalContext>,
}

impl Problem {
    /// Finds physician index by id.
    pub fn physician_index(&self, id: &str) -> Option<usize> {
        self.physicians.iter().position(|physician| physician.id == id)
    }

    /// Returns the slot with the given index.
    pub fn slot(&self, index: usize) -> &Slot {
        &self.catalogue.slots()[index]
    }

    /// Returns the calendar day of the slot.
    pub fn slot_day(&self, slot: &Slot) -> &CalendarDay {
        &self.calendar.days()[slot.day]
    }

    /// Returns a short human readable description of the slot.
    pub fn describe_slot(&self, slot: &Slot) -> String {
        format!("{} {}", self.slot_day(slot).date, slot.workplace)
    }

    /// Checks total night demand against what physicians owe and may take. The returned
    /// messages are warnings: the search still runs and reports what it cannot resolve.
    pub fn check_night_capacity(&self) -> Vec<String> {
        self.calendar
            .months()
            .iter()
            .enumerate()
            .filter_map(|(month_idx, month)| {
                let night_slots = self
                    .catalogue
                    .slots()
                    .iter()
                    .filter(|slot| slot.workplace.is_night() && self.slot_day(slot).month == month_idx)
                    .count() as u32;

                let night_workers = self.physicians.iter().filter(|physician| {
                    physician.eligible_workplaces.iter().any(|workplace| workplace.is_night())
                });
                let (min_total, max_total) = night_workers.fold((0, 0), |(min, max), physician| {
                    (min + self.night_limits.min_nights(physician), max + self.night_limits.max_nights(physician))
                });

                let period = format!("{}-{:02}", month.year, u8::from(month.month));
                if min_total > night_slots {
                    Some(format!(
                        "{period}: physicians owe {min_total} nights in total, but only {night_slots} night slots exist"
                    ))
                } else if max_total < night_slots {
                    Some(format!(
                        "{period}: physicians may take {max_total} nights in total, but {night_slots} night slots exist"
                    ))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Finds night workers who are not eligible for any MOP workplace. Every weekend duty of a
    /// night worker requires a MOP duty on some weekend of the month, so such physicians cannot
    /// take weekend duties at all.
    pub fn check_weekend_capacity(&self) -> Vec<String> {
        let has_weekend_slots =
            self.catalogue.slots().iter().any(|slot| self.slot_day(slot).is_weekend_or_holiday());
        if !has_weekend_slots {
            return vec![];
        }

        self.physicians
            .iter()
            .filter(|physician| {
                let workplaces = &physician.eligible_workplaces;

                workplaces.iter().any(|workplace| workplace.is_night())
                    && !workplaces.iter().any(|workplace| workplace.is_mop())
            })
            .map(|physician| {
                format!("'{}' works nights without a MOP workplace and cannot take weekend duties", physician.id)
            })
            .collect()
    }
}

/// Builds a problem validating consistency of input records.
pub struct ProblemBuilder {
    calendar: Option<Calendar>,
    physicians: Vec<Physician>,
    preferences: Vec<PreferenceRecord>,
    anchors: Vec<Anchor>,
    coverage: [Coverage; 9],
    night_limits: NightLimits,
    workload_weights: WorkloadWeights,
    goal: Option<GoalContext>,
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self {
            calendar: None,
            physicians: Vec::default(),
            preferences: Vec::default(),
            anchors: Vec::default(),
            coverage: [Coverage::Daily; 9],
            night_limits: NightLimits::default(),
            workload_weights: WorkloadWeights::default(),
            goal: None,
        }
    }
}

impl ProblemBuilder {
    /// Sets a calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Sets physicians from the master sheet.
    pub fn with_physicians(mut self, physicians: Vec<Physician>) -> Self {
        self.physicians = physicians;
        self
    }

    /// Sets wishes from the preference list.
    pub fn with_preferences(mut self, preferences: Vec<PreferenceRecord>) -> Self {
        self.preferences = preferences;
        self
    }

    /// Sets pre-filled cells.
    pub fn with_anchors(mut self, anchors: Vec<Anchor>) -> Self {
        self.anchors = anchors;
        self
    }

    /// Sets coverage of the workplace.
    pub fn with_coverage(mut self, workplace: Workplace, coverage: Coverage) -> Self {
        self.coverage[workplace.index()] = coverage;
        self
    }

    /// Sets night shift limits.
    pub fn with_night_limits(mut self, night_limits: NightLimits) -> Self {
        self.night_limits = night_limits;
        self
    }

    /// Sets workload weights.
    pub fn with_workload_weights(mut self, workload_weights: WorkloadWeights) -> Self {
        self.workload_weights = workload_weights;
        self
    }

    /// Sets a goal.
    pub fn with_goal(mut self, goal: GoalContext) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Validates input records and builds the problem.
    pub fn build(self) -> Result<Problem, RosterError> {
        let calendar = self.calendar.ok_or_else(|| RosterError::inconsistency("calendar is not set"))?;
        let goal = self.goal.ok_or_else(|| RosterError::inconsistency("goal is not set"))?;
        self.workload_weights.validate()?;
        let mut physicians = self.physicians;

        let mut ids = FxHashSet::default();
        if let Some(physician) = physicians.iter().find(|physician| !ids.insert(physician.id.clone())) {
            return Err(RosterError::inconsistency(format!("physician '{}' is defined more than once", physician.id)));
        }

        let index_of = |id: &str| physicians.iter().position(|physician| physician.id == id);

        let preferences = self
            .preferences
            .into_iter()
            .map(|record| {
                index_of(record.physician.as_str()).map(|idx| (idx, record.date, record.preference)).ok_or_else(|| {
                    RosterError::inconsistency(format!(
                        "preference of unknown physician '{}' on {}",
                        record.physician, record.date
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let anchor_cells = self
            .anchors
            .iter()
            .map(|anchor| {
                let physician = index_of(anchor.physician.as_str()).ok_or_else(|| {
                    RosterError::inconsistency(format!(
                        "pre-filled cell {} {} refers to unknown physician '{}'",
                        anchor.date, anchor.workplace, anchor.physician
                    ))
                })?;
                let day = calendar.index_of(anchor.date).ok_or_else(|| {
                    RosterError::inconsistency(format!(
                        "pre-filled cell {} {} is outside of the period",
                        anchor.date, anchor.workplace
                    ))
                })?;

                Ok((day, anchor.workplace, physician))
            })
            .collect::<Result<Vec<_>, RosterError>>()?;

        for (physician_idx, date, preference) in preferences {
            let physician = &mut physicians[physician_idx];
            match physician.preferences.insert(date, preference) {
                Some(previous) if previous != preference => {
                    return Err(RosterError::inconsistency(format!(
                        "physician '{}' has conflicting preferences on {date}",
                        physician.id
                    )));
                }
                _ => {}
            }
        }

        let required = anchor_cells.iter().map(|&(day, workplace, _)| (day, workplace)).collect::<Vec<_>>();
        let catalogue = SlotCatalogue::new(&calendar, &self.coverage, required.as_slice());

        let mut anchors = Vec::with_capacity(anchor_cells.len());
        let mut filled = FxHashSet::default();
        for (day, workplace, physician) in anchor_cells {
            let slot = catalogue
                .find(day, workplace)
                .ok_or_else(|| RosterError::inconsistency(format!("no slot for pre-filled cell {workplace}")))?;

            if !filled.insert(slot) {
                return Err(RosterError::inconsistency(format!(
                    "pre-filled cell {} {workplace} is defined more than once",
                    calendar.days()[day].date
                )));
            }

            anchors.push((slot, physician));
        }

        Ok(Problem {
            calendar,
            physicians,
            catalogue,
            anchors,
            night_limits: self.night_limits,
            workload_weights: self.workload_weights,
            goal: Arc::new(goal),
        })
    }
}
