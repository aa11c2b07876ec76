//! Placement Engine service module (spec.md §4.5)
//!
//! Searches for the earliest start time, on a fixed 15-minute grid, at which
//! an operation's setup+run window is both calendar-admissible and free of
//! conflicts with a machine's already-committed slots, without overrunning
//! the plan's horizon. The search is bounded both by the horizon and by an
//! absolute iteration cap (spec.md §7 tier 3: a placement that can't resolve
//! becomes a conflict, never an infinite loop).

use chrono::{DateTime, Duration, Utc};

use crate::application::services::calendar_engine;
use crate::domain::entities::Calendar;

pub const GRID_MINUTES: i64 = 15;
pub const MAX_SEARCH_ITERATIONS: usize = 10_000;

/// Rounds `instant` up to the next grid boundary (or itself, if already on one).
pub fn round_up_to_grid(instant: DateTime<Utc>) -> DateTime<Utc> {
    let epoch_minutes = instant.timestamp() / 60;
    let remainder = epoch_minutes.rem_euclid(GRID_MINUTES);
    if remainder == 0 {
        instant
    } else {
        instant + Duration::minutes(GRID_MINUTES - remainder)
    }
}

/// Finds the earliest `start >= earliest_candidate` (snapped to the grid)
/// such that `[start, start + duration_minutes)` is calendar-admissible,
/// does not overlap any interval in `busy`, and ends at or before
/// `horizon_end`. Returns `None` if no such start exists — either the
/// horizon is exhausted or `MAX_SEARCH_ITERATIONS` grid steps pass first.
pub fn find_earliest_start(
    calendar: &Calendar,
    busy: &[(DateTime<Utc>, DateTime<Utc>)],
    earliest_candidate: DateTime<Utc>,
    duration_minutes: i64,
    horizon_end: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if duration_minutes <= 0 {
        return None;
    }
    let mut candidate = round_up_to_grid(earliest_candidate);
    let duration = Duration::minutes(duration_minutes);

    for _ in 0..MAX_SEARCH_ITERATIONS {
        let candidate_end = candidate + duration;
        if candidate_end > horizon_end {
            return None;
        }
        if calendar_engine::admissible(calendar, candidate, candidate_end) && !overlaps_any(busy, candidate, candidate_end) {
            return Some(candidate);
        }
        candidate += Duration::minutes(GRID_MINUTES);
    }
    None
}

fn overlaps_any(busy: &[(DateTime<Utc>, DateTime<Utc>)], start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    busy.iter().any(|(busy_start, busy_end)| start < *busy_end && *busy_start < end)
}
