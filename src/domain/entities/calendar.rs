//! Calendar/shift entity module
//!
//! A Calendar describes the working-time windows a machine (or the shop as a
//! whole) observes: a set of shifts with "HH:MM" clock boundaries that may
//! roll past midnight, a set of working weekday indices (0=Sunday..6=Saturday,
//! matching `chrono::Weekday::num_days_from_sunday`), and a set of date
//! exceptions (holidays, planned shutdowns). The admissibility logic that
//! decides whether a candidate placement window is legal lives in
//! `application::services::calendar_engine`; this module only owns the data
//! and the low-level per-shift geometry (duration, overnight detection).

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single named shift window, e.g. "Day" 08:00-16:00 or "Night" 22:00-06:00.
///
/// `end <= start` marks an overnight shift that rolls into the next calendar
/// day; callers should treat the pair as one contiguous window rather than
/// two separate ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shift {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_minutes: i64,
}

impl Shift {
    /// Parses a shift from "HH:MM" clock strings. Malformed strings are a
    /// validation error (spec.md §4.1/§7.1) rather than a silent default —
    /// only scheduling-time lookups of an already-malformed calendar should
    /// treat an unparseable shift as absent.
    pub fn parse(name: &str, start: &str, end: &str, break_minutes: i64) -> Result<Self, String> {
        let start = NaiveTime::parse_from_str(start, "%H:%M")
            .map_err(|_| format!("shift '{name}' has malformed start time '{start}'"))?;
        let end = NaiveTime::parse_from_str(end, "%H:%M")
            .map_err(|_| format!("shift '{name}' has malformed end time '{end}'"))?;
        Ok(Self {
            name: name.to_string(),
            start,
            end,
            break_minutes: break_minutes.max(0),
        })
    }

    pub fn is_overnight(&self) -> bool {
        self.end <= self.start
    }

    /// Minutes from the shift's start clock-time to its end, accounting for
    /// the midnight roll for overnight shifts.
    pub fn duration_minutes(&self) -> i64 {
        let start_min = self.start.num_seconds_from_midnight() as i64 / 60;
        let end_min = self.end.num_seconds_from_midnight() as i64 / 60;
        if self.is_overnight() {
            (24 * 60 - start_min) + end_min
        } else {
            end_min - start_min
        }
    }

    /// Net available minutes after subtracting the shift's break allowance.
    /// Breaks reduce capacity but do not fragment placement (spec.md §4.1).
    pub fn net_available_minutes(&self) -> i64 {
        (self.duration_minutes() - self.break_minutes).max(0)
    }

    /// Start-of-shift offset in minutes from midnight.
    pub fn start_minutes(&self) -> i64 {
        self.start.num_seconds_from_midnight() as i64 / 60
    }

    /// End-of-shift offset in minutes from midnight of the *start* day,
    /// exceeding 1440 for overnight shifts that roll into the next day.
    pub fn end_minutes_from_start_day(&self) -> i64 {
        let end_min = self.end.num_seconds_from_midnight() as i64 / 60;
        if self.is_overnight() {
            end_min + 24 * 60
        } else {
            end_min
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Calendar {
    pub shifts: Vec<Shift>,
    pub working_weekdays: HashSet<u8>,
    pub exceptions: HashSet<NaiveDate>,
}

impl Calendar {
    pub fn new(shifts: Vec<Shift>, working_weekdays: HashSet<u8>, exceptions: HashSet<NaiveDate>) -> Self {
        Self {
            shifts,
            working_weekdays,
            exceptions,
        }
    }

    /// A date is working iff its weekday is in `working_weekdays` and it is
    /// not listed as an exception (spec.md §4.1).
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        let weekday_index = date.weekday().num_days_from_sunday() as u8;
        self.working_weekdays.contains(&weekday_index) && !self.exceptions.contains(&date)
    }

    /// Shifts are declared invalid configuration if two shifts on the same
    /// calendar day overlap (spec.md §3 Calendar invariant).
    pub fn validate(&self) -> Result<(), String> {
        let mut by_start: Vec<&Shift> = self.shifts.iter().collect();
        by_start.sort_by_key(|s| s.start_minutes());
        for window in by_start.windows(2) {
            let (a, b) = (window[0], window[1]);
            if a.end_minutes_from_start_day() > b.start_minutes() {
                return Err(format!(
                    "shifts '{}' and '{}' overlap on the same calendar day",
                    a.name, b.name
                ));
            }
        }
        Ok(())
    }

    /// Total net-available minutes for a date: the sum, over shifts that
    /// start on that date, of (shift duration - break minutes) when the date
    /// is a working day. Used by capacity bucketing (spec.md §4.8).
    pub fn available_minutes_for_day(&self, date: NaiveDate) -> i64 {
        if !self.is_working_day(date) {
            return 0;
        }
        self.shifts.iter().map(Shift::net_available_minutes).sum()
    }
}
