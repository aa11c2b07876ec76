//! Operator session entity module
//!
//! Records one operator's time at a machine, split into setup and run
//! minutes, for utilization and labor-side analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatorSession {
    pub operator_id: String,
    pub machine_id: String,
    pub session_start: DateTime<Utc>,
    pub session_end: DateTime<Utc>,
    pub setup_minutes: i64,
    pub run_minutes: i64,
}
