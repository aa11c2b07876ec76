//! Pareto entry value object module
//!
//! One ranked row of a Pareto breakdown (top defect types, top downtime
//! reasons, ...): a label, its raw value, the share of the total it
//! represents, and the running cumulative share up to and including this
//! row (spec.md §4.9).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParetoEntry {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub cumulative_percentage: f64,
}
