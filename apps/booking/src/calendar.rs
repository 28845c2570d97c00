//! Month grid computation and month navigation.
//!
//! Everything here is a pure function of its inputs. "Today" is always passed
//! in by the caller so the same month renders the same way in tests and in
//! production.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::iter;

// ── Displayed month ──

/// The month currently shown by the calendar.
///
/// Only constructible for months chrono can represent, so every derived
/// value (first day, length, weekday offset) is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        // the 1st exists in every month
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// One month back, wrapping to December of the previous year.
    ///
    /// At the earliest representable month the view stays put.
    pub fn prev_month(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// One month forward, wrapping to January of the next year.
    ///
    /// At the latest representable month the view stays put.
    pub fn next_month(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// Number of days, taken as the day before the first of the next month.
    pub fn days_in_month(self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Only the last representable month has no successor, and it is a December.
            None => 31,
        }
    }

    /// Weekday of the first day, Sunday = 0, regardless of display language.
    pub fn first_weekday_offset(self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// The `day`-th of this month, if it exists.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

/// Length of `month` (1-based) in the proleptic Gregorian calendar.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    YearMonth::new(year, month).map(YearMonth::days_in_month)
}

/// Sunday-based weekday index of the first of `month`.
pub fn first_weekday_offset(year: i32, month: u32) -> Option<u32> {
    YearMonth::new(year, month).map(YearMonth::first_weekday_offset)
}

// ── Cells ──

/// A real day in the grid, classified against today and the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    day: u32,
    date: NaiveDate,
    is_today: bool,
    is_past: bool,
    is_selected: bool,
    is_selectable: bool,
}

impl CalendarDay {
    pub fn classify(date: NaiveDate, today: NaiveDate, selected: Option<NaiveDate>) -> Self {
        let is_past = date < today;
        Self {
            day: date.day(),
            date,
            is_today: date == today,
            is_past,
            is_selected: selected == Some(date),
            is_selectable: !is_past,
        }
    }

    pub fn day_number(&self) -> u32 {
        self.day
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn is_past(&self) -> bool {
        self.is_past
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_selectable(&self) -> bool {
        self.is_selectable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Padding before the 1st so it lands under its weekday column.
    Blank,
    Day(CalendarDay),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&CalendarDay> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(day) => Some(day),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CalendarCell::Blank)
    }
}

/// Build the renderable grid for `view`: leading blanks, then every day of the month.
pub fn compute_grid(
    view: YearMonth,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let blanks = view.first_weekday_offset() as usize;
    let days = view.days_in_month();

    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(iter::repeat(CalendarCell::Blank).take(blanks));
    cells.extend(
        (1..=days)
            .filter_map(|day| view.day(day))
            .map(|date| CalendarCell::Day(CalendarDay::classify(date, today, selected))),
    );
    cells
}

// ── Tests ──
