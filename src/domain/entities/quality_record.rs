//! Quality record entity module
//!
//! One inspection outcome for a part produced against a work order, feeding
//! the analytics engine's first-pass-yield, scrap-rate, and defect-Pareto
//! computations (spec.md §4.9).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityResult {
    Pass,
    Fail,
    Rework,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityRecord {
    pub work_order_id: String,
    pub machine_id: String,
    pub part_number: String,
    pub inspection_date: DateTime<Utc>,
    pub result: QualityResult,
    pub defect_type: Option<String>,
}
