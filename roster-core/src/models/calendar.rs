#[cfg(test)]
#[path = "../../tests/unit/models/calendar_test.rs"]
mod calendar_test;

use crate::utils::RosterError;
use rustc_hash::FxHashSet;
use std::ops::RangeInclusive;
use time::{Date, Month, Weekday};

/// Identifies a calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonthKey {
    /// A year.
    pub year: i32,
    /// A month.
    pub month: Month,
}

/// A single day of the rostering period.
#[derive(Clone, Debug)]
pub struct CalendarDay {
    /// Index of the day in the calendar.
    pub index: usize,
    /// The date.
    pub date: Date,
    /// Index of the month in the calendar.
    pub month: usize,
    /// True for Saturdays and Sundays.
    pub is_weekend: bool,
    /// True for public holidays.
    pub is_holiday: bool,
}

impl CalendarDay {
    /// Returns true if the day is a weekend or a public holiday.
    pub fn is_weekend_or_holiday(&self) -> bool {
        self.is_weekend || self.is_holiday
    }

    /// Returns true if the day is a regular working day.
    pub fn is_workday(&self) -> bool {
        !self.is_weekend_or_holiday()
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// A weekend unit is a Saturday and Sunday pair. When the period starts on Sunday or ends on
/// Saturday, the unit consists of the single in-range day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekendUnit {
    /// Index of the first day.
    pub first: usize,
    /// Index of the last day.
    pub last: usize,
}

impl WeekendUnit {
    /// Returns indices of unit days.
    pub fn days(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// An ordered sequence of days in the rostering period.
#[derive(Clone, Debug)]
pub struct Calendar {
    days: Vec<CalendarDay>,
    months: Vec<MonthKey>,
    month_ranges: Vec<(usize, usize)>,
    weekends: Vec<WeekendUnit>,
    day_weekends: Vec<Option<usize>>,
}

impl Calendar {
    /// Creates a calendar for the inclusive `[start, end]` range.
    pub fn new(start: Date, end: Date, holidays: &[Date]) -> Result<Self, RosterError> {
        if start > end {
            return Err(RosterError::InvalidRange { start, end });
        }

        let holidays = holidays.iter().collect::<FxHashSet<_>>();
        let mut months: Vec<MonthKey> = Vec::new();
        let mut days = Vec::new();

        let mut current = Some(start);
        while let Some(date) = current.filter(|date| *date <= end) {
            let key = MonthKey { year: date.year(), month: date.month() };
            if months.last() != Some(&key) {
                months.push(key);
            }

            days.push(CalendarDay {
                index: days.len(),
                date,
                month: months.len() - 1,
                is_weekend: matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday),
                is_holiday: holidays.contains(&date),
            });

            current = date.next_day();
        }

        let month_ranges = (0..months.len())
            .map(|month| {
                let first = days.iter().position(|day| day.month == month).unwrap_or_default();
                let last = days.iter().rposition(|day| day.month == month).unwrap_or_default();
                (first, last)
            })
            .collect();

        let weekends = create_weekend_units(days.as_slice());
        let mut day_weekends = vec![None; days.len()];
        weekends.iter().enumerate().for_each(|(unit_idx, unit)| {
            unit.days().for_each(|day_idx| day_weekends[day_idx] = Some(unit_idx));
        });

        Ok(Self { days, months, month_ranges, weekends, day_weekends })
    }

    /// Returns all days.
    pub fn days(&self) -> &[CalendarDay] {
        self.days.as_slice()
    }

    /// Returns a day by its index.
    pub fn day(&self, index: usize) -> Option<&CalendarDay> {
        self.days.get(index)
    }

    /// Returns amount of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if calendar has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Returns the first day of the period.
    pub fn start(&self) -> Date {
        self.days[0].date
    }

    /// Returns the last day of the period.
    pub fn end(&self) -> Date {
        self.days[self.days.len() - 1].date
    }

    /// Returns a day index for the given date, if it is in range.
    pub fn index_of(&self, date: Date) -> Option<usize> {
        let offset = (date - self.start()).whole_days();

        usize::try_from(offset).ok().filter(|index| *index < self.days.len())
    }

    /// Returns months covered by the period.
    pub fn months(&self) -> &[MonthKey] {
        self.months.as_slice()
    }

    /// Returns day indices of the given month.
    pub fn month_days(&self, month: usize) -> RangeInclusive<usize> {
        let (first, last) = self.month_ranges[month];

        first..=last
    }

    /// Returns all weekend units.
    pub fn weekend_units(&self) -> &[WeekendUnit] {
        self.weekends.as_slice()
    }

    /// Returns index of the weekend unit which contains the given day.
    pub fn weekend_unit_of(&self, day: usize) -> Option<usize> {
        self.day_weekends.get(day).copied().flatten()
    }
}

fn create_weekend_units(days: &[CalendarDay]) -> Vec<WeekendUnit> {
    days.iter().fold(Vec::<WeekendUnit>::new(), |mut units, day| {
        match day.weekday() {
            Weekday::Saturday => units.push(WeekendUnit { first: day.index, last: day.index }),
            Weekday::Sunday => match units.last_mut() {
                Some(unit) if unit.last + 1 == day.index => unit.last = day.index,
                _ => units.push(WeekendUnit { first: day.index, last: day.index }),
            },
            _ => {}
        }

        units
    })
}
