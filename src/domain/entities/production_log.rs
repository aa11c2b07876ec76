//! Production log entity module
//!
//! An append-only observation of parts actually produced on a machine for a
//! work order, used by the analytics engine to derive performance and
//! quantity figures. The scheduler never writes these; they come from the
//! shop floor (out of this crate's scope).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionLog {
    pub machine_id: String,
    pub work_order_id: String,
    pub timestamp: DateTime<Utc>,
    pub quantity_produced: u32,
    pub cycle_time_minutes: f64,
}
