//! Schedule adherence value object module
//!
//! Per work order: how late actual start was against planned start, whether
//! that lands within the on-time tolerance, and a 0-100 adherence score that
//! decays with the delay (spec.md §4.9).

use serde::{Deserialize, Serialize};

use super::rounding::round2;

const ON_TIME_TOLERANCE_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AdherenceScore {
    pub delay_minutes: i64,
    pub on_time: bool,
    pub adherence_score: f64,
}

impl AdherenceScore {
    /// `delta_minutes` is `actual_start - planned_start` in minutes; it may
    /// be negative if the work order started early.
    pub fn from_delta_minutes(delta_minutes: i64) -> Self {
        let delay_minutes = delta_minutes.max(0);
        let on_time = delta_minutes.abs() <= ON_TIME_TOLERANCE_MINUTES;
        let delay_hours = delay_minutes as f64 / 60.0;
        let adherence_score = round2((100.0 - delay_hours * 10.0).max(0.0));
        Self {
            delay_minutes,
            on_time,
            adherence_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_time_within_tolerance() {
        let score = AdherenceScore::from_delta_minutes(20);
        assert!(score.on_time);
        assert_eq!(score.delay_minutes, 20);
    }

    #[test]
    fn early_start_still_counts_delay_as_zero() {
        let score = AdherenceScore::from_delta_minutes(-45);
        assert_eq!(score.delay_minutes, 0);
        assert!(!score.on_time);
    }

    #[test]
    fn adherence_score_decays_with_delay_and_floors_at_zero() {
        let score = AdherenceScore::from_delta_minutes(20 * 60);
        // 20 hours late * 10 = 200, clamped to 0
        assert_eq!(score.adherence_score, 0.0);
    }
}
