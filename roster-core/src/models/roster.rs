#[cfg(test)]
#[path = "../../tests/unit/models/roster_test.rs"]
mod roster_test;

use crate::models::{Calendar, CalendarDay, Workplace};
use std::ops::RangeInclusive;
use tinyvec::TinyVec;

/// Specifies on which days a workplace has to be staffed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Coverage {
    /// Every day.
    #[default]
    Daily,
    /// Only on regular working days.
    WorkdaysOnly,
    /// Only on weekends and public holidays.
    WeekendsAndHolidaysOnly,
    /// Never, unless a cell is pre-filled.
    Never,
}

impl Coverage {
    /// Checks whether a workplace with this coverage is staffed on the day.
    pub fn is_covered(&self, day: &CalendarDay) -> bool {
        match self {
            Coverage::Daily => true,
            Coverage::WorkdaysOnly => day.is_workday(),
            Coverage::WeekendsAndHolidaysOnly => day.is_weekend_or_holiday(),
            Coverage::Never => false,
        }
    }
}

/// A (day, workplace) unit which requires exactly one physician.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Index of the slot in the catalogue.
    pub index: usize,
    /// Index of the calendar day.
    pub day: usize,
    /// A workplace.
    pub workplace: Workplace,
}

/// A catalogue of all slots in the period, ordered by day and then by workplace.
#[derive(Clone, Debug)]
pub struct SlotCatalogue {
    slots: Vec<Slot>,
    cells: Vec<[Option<usize>; 9]>,
}

impl SlotCatalogue {
    /// Creates a catalogue using coverage per workplace. Cells listed in `required` are
    /// always materialized regardless of coverage.
    pub fn new(calendar: &Calendar, coverage: &[Coverage; 9], required: &[(usize, Workplace)]) -> Self {
        let mut slots = Vec::with_capacity(calendar.len() * Workplace::ALL.len());
        let mut cells = vec![[None; 9]; calendar.len()];

        calendar.days().iter().for_each(|day| {
            Workplace::ALL.iter().for_each(|&workplace| {
                let is_required = required.iter().any(|&(day_idx, other)| day_idx == day.index && other == workplace);

                if is_required || coverage[workplace.index()].is_covered(day) {
                    cells[day.index][workplace.index()] = Some(slots.len());
                    slots.push(Slot { index: slots.len(), day: day.index, workplace });
                }
            });
        });

        Self { slots, cells }
    }

    /// Returns all slots.
    pub fn slots(&self) -> &[Slot] {
        self.slots.as_slice()
    }

    /// Returns a slot by index.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Returns amount of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Finds a slot index for the given day and workplace.
    pub fn find(&self, day: usize, workplace: Workplace) -> Option<usize> {
        self.cells.get(day).and_then(|cells| cells[workplace.index()])
    }

    /// Returns slots of the given day.
    pub fn day_slots(&self, day: usize) -> impl Iterator<Item = &Slot> + '_ {
        self.cells.get(day).into_iter().flat_map(|cells| cells.iter().flatten().map(|&index| &self.slots[index]))
    }
}

/// A duty of a physician on a specific day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Duty {
    /// Slot index.
    pub slot: usize,
    /// A workplace of the slot.
    pub workplace: Workplace,
}

type DayDuties = TinyVec<[Duty; 2]>;

/// An assignment table which maps every slot to a physician or leaves it empty.
///
/// Besides the slot to physician mapping, it keeps duties of each physician per day, so that
/// rules can inspect a physician's schedule without scanning the whole table.
#[derive(Clone, Debug)]
pub struct Roster {
    assignments: Vec<Option<usize>>,
    anchored: Vec<bool>,
    duties: Vec<Vec<DayDuties>>,
    unassigned_free: usize,
}

impl Roster {
    /// Creates an empty roster and places anchors, given as (slot, physician) pairs.
    pub fn new(catalogue: &SlotCatalogue, physicians: usize, days: usize, anchors: &[(usize, usize)]) -> Self {
        let mut roster = Self {
            assignments: vec![None; catalogue.len()],
            anchored: vec![false; catalogue.len()],
            duties: vec![vec![DayDuties::default(); days]; physicians],
            unassigned_free: catalogue.len(),
        };

        anchors.iter().for_each(|&(slot_idx, physician)| {
            if let Some(slot) = catalogue.get(slot_idx) {
                roster.anchored[slot_idx] = true;
                roster.unassigned_free -= 1;
                roster.put(slot, physician);
            }
        });

        roster
    }

    /// Assigns the physician to the empty slot.
    pub fn assign(&mut self, slot: &Slot, physician: usize) {
        debug_assert!(self.assignments[slot.index].is_none(), "slot is already assigned");
        debug_assert!(!self.anchored[slot.index], "anchored slot cannot be changed");

        self.unassigned_free -= 1;
        self.put(slot, physician);
    }

    /// Removes an assignment from the free slot, returning a previous assignee.
    pub fn unassign(&mut self, slot: &Slot) -> Option<usize> {
        if self.anchored[slot.index] {
            return None;
        }

        let physician = self.assignments[slot.index].take()?;
        self.duties[physician][slot.day].retain(|duty| duty.slot != slot.index);
        self.unassigned_free += 1;

        Some(physician)
    }

    /// Returns the physician assigned to the slot.
    pub fn assignee(&self, slot: usize) -> Option<usize> {
        self.assignments.get(slot).copied().flatten()
    }

    /// Returns true if the slot is pre-filled.
    pub fn is_anchored(&self, slot: usize) -> bool {
        self.anchored.get(slot).copied().unwrap_or(false)
    }

    /// Returns duties of the physician on the day.
    pub fn duties_on(&self, physician: usize, day: usize) -> &[Duty] {
        self.duties.get(physician).and_then(|days| days.get(day)).map_or(&[], |duties| duties.as_slice())
    }

    /// Iterates over (day, duty) pairs of the physician in calendar order.
    pub fn duties_of(&self, physician: usize) -> impl Iterator<Item = (usize, &Duty)> + '_ {
        self.duties[physician].iter().enumerate().flat_map(|(day, duties)| duties.iter().map(move |duty| (day, duty)))
    }

    /// Iterates over (day, duty) pairs of the physician within the given days.
    pub fn duties_within(
        &self,
        physician: usize,
        days: RangeInclusive<usize>,
    ) -> impl Iterator<Item = (usize, &Duty)> + '_ {
        days.flat_map(move |day| self.duties_on(physician, day).iter().map(move |duty| (day, duty)))
    }

    /// Returns true if the physician has any duty on the day.
    pub fn is_working(&self, physician: usize, day: usize) -> bool {
        !self.duties_on(physician, day).is_empty()
    }

    /// Returns total amount of duties of the physician.
    pub fn duty_count(&self, physician: usize) -> usize {
        self.duties[physician].iter().map(|duties| duties.len()).sum()
    }

    /// Returns amount of free slots without assignee.
    pub fn unassigned_count(&self) -> usize {
        self.unassigned_free
    }

    /// Returns amount of slots.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns true if the roster has no slots.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    fn put(&mut self, slot: &Slot, physician: usize) {
        self.assignments[slot.index] = Some(physician);
        self.duties[physician][slot.day].push(Duty { slot: slot.index, workplace: slot.workplace });
    }
}
