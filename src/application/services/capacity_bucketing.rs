//! Capacity Bucketing service module (spec.md §4.8)
//!
//! Aggregates a machine's placed slots into one `CapacityBucket` per
//! calendar day: available minutes come from the calendar, planned minutes
//! are `Σ(setup + run)` over every slot whose *start* falls on that day.
//! Slots are grouped by date-of-start only (spec.md §4.8, §8), so a slot
//! spanning midnight is charged in full to the day it started rather than
//! split across both days.

use chrono::{Duration, NaiveDate};

use crate::domain::entities::{Calendar, CapacityBucket, ScheduleSlot};

/// Builds one bucket per day in `[start_date, end_date]` (inclusive) for
/// `machine_id`, from the slots assigned to that machine.
pub fn build_buckets(machine_id: &str, calendar: &Calendar, slots: &[&ScheduleSlot], start_date: NaiveDate, end_date: NaiveDate) -> Vec<CapacityBucket> {
    let machine_slots: Vec<&&ScheduleSlot> = slots.iter().filter(|slot| slot.machine_id == machine_id && slot.is_active()).collect();

    let mut buckets = Vec::new();
    let mut date = start_date;
    loop {
        let available_minutes = calendar.available_minutes_for_day(date);
        let mut bucket = CapacityBucket::new(machine_id.to_string(), date, available_minutes);

        for slot in &machine_slots {
            if slot.start.date_naive() == date {
                bucket.planned_minutes += slot.setup_minutes + slot.run_minutes;
            }
        }

        buckets.push(bucket);
        if date >= end_date {
            break;
        }
        date = date.succ_opt().unwrap_or(date);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DispatchRule, Shift};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn calendar() -> Calendar {
        Calendar::new(vec![Shift::parse("Day", "08:00", "16:00", 0).unwrap()], HashSet::from([1, 2, 3, 4, 5]), HashSet::new())
    }

    fn slot(start: chrono::DateTime<chrono::Utc>, setup: i64, run: i64) -> ScheduleSlot {
        ScheduleSlot::new("S1".into(), "PLAN-1".into(), "WO-1".into(), "OP-1".into(), "M1".into(), start, setup, run, 1, 0.0, DispatchRule::Fifo)
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn single_day_slot_is_fully_charged_to_its_day() {
        let cal = calendar();
        let start = at(2026, 7, 27, 9, 0);
        let s = slot(start, 0, 120);
        let slots = vec![&s];
        let buckets = build_buckets("M1", &cal, &slots, start.date_naive(), start.date_naive());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].planned_minutes, 120);
        assert_eq!(buckets[0].available_minutes, 8 * 60);
    }

    #[test]
    fn slot_spanning_midnight_is_charged_in_full_to_its_start_day() {
        let cal = calendar();
        let start = at(2026, 7, 27, 23, 0);
        let s = slot(start, 0, 120); // 23:00 -> 01:00 next day
        let slots = vec![&s];
        let buckets = build_buckets("M1", &cal, &slots, start.date_naive(), start.date_naive() + Duration::days(1));
        assert_eq!(buckets[0].planned_minutes, 120);
        assert_eq!(buckets[1].planned_minutes, 0);
    }
}
