//! Plan ID value object module
//!
//! A PlanId scopes one scheduler invocation's output. A new plan replaces
//! prior non-locked slots for its own scope only (spec.md §3 ScheduleSlot
//! lifecycle), so the id is the key callers use to segregate runs.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanId(String);

impl PlanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
