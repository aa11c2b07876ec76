//! Capacity bucket entity module
//!
//! A CapacityBucket aggregates planned vs. available minutes for one
//! machine on one date, derived entirely from the slots placed on it
//! (spec.md §4.8). Utilization and overload status are computed, never
//! stored independently, so there is no way for them to drift out of sync
//! with the underlying minutes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityBucket {
    pub machine_id: String,
    pub date: NaiveDate,
    pub available_minutes: i64,
    pub planned_minutes: i64,
    pub actual_minutes: i64,
}

impl CapacityBucket {
    pub fn new(machine_id: String, date: NaiveDate, available_minutes: i64) -> Self {
        Self {
            machine_id,
            date,
            available_minutes: available_minutes.max(0),
            planned_minutes: 0,
            actual_minutes: 0,
        }
    }

    /// planned / available, 0 when available is 0 (spec.md §4.8 and §7.4
    /// numerical guard: never surface NaN).
    pub fn utilization(&self) -> f64 {
        if self.available_minutes == 0 {
            0.0
        } else {
            self.planned_minutes as f64 / self.available_minutes as f64
        }
    }

    pub fn is_overloaded(&self) -> bool {
        self.utilization() > 1.0
    }

    pub fn overload_percentage(&self) -> f64 {
        ((self.utilization() - 1.0) * 100.0).max(0.0)
    }
}
