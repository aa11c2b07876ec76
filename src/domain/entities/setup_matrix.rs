//! Setup matrix entity module
//!
//! Maps (from_family, to_family, machine_type) to sequence-dependent
//! changeover minutes. An absent entry defers to the incoming operation's
//! own declared setup time (spec.md §4.4).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SetupMatrixKey {
    pub from_family: String,
    pub to_family: String,
    pub machine_type: String,
}

/// One flattened row of the matrix, the wire shape JSON callers supply: a
/// struct key can't be a JSON object key, so the matrix serializes as a
/// list of these rather than a map keyed by `SetupMatrixKey`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetupMatrixEntry {
    pub from_family: String,
    pub to_family: String,
    pub machine_type: String,
    pub changeover_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetupMatrix {
    entries: HashMap<SetupMatrixKey, i64>,
}

impl SetupMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from_family: &str, to_family: &str, machine_type: &str, minutes: i64) {
        self.entries.insert(
            SetupMatrixKey {
                from_family: from_family.to_string(),
                to_family: to_family.to_string(),
                machine_type: machine_type.to_string(),
            },
            minutes.max(0),
        );
    }

    pub fn lookup(&self, from_family: &str, to_family: &str, machine_type: &str) -> Option<i64> {
        self.entries
            .get(&SetupMatrixKey {
                from_family: from_family.to_string(),
                to_family: to_family.to_string(),
                machine_type: machine_type.to_string(),
            })
            .copied()
            .map(|m| m.max(0))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<SetupMatrixEntry>> for SetupMatrix {
    fn from(rows: Vec<SetupMatrixEntry>) -> Self {
        let mut matrix = SetupMatrix::new();
        for row in rows {
            matrix.insert(&row.from_family, &row.to_family, &row.machine_type, row.changeover_minutes);
        }
        matrix
    }
}

impl From<&SetupMatrix> for Vec<SetupMatrixEntry> {
    fn from(matrix: &SetupMatrix) -> Self {
        matrix
            .entries
            .iter()
            .map(|(key, minutes)| SetupMatrixEntry {
                from_family: key.from_family.clone(),
                to_family: key.to_family.clone(),
                machine_type: key.machine_type.clone(),
                changeover_minutes: *minutes,
            })
            .collect()
    }
}

impl Serialize for SetupMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Vec::<SetupMatrixEntry>::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SetupMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Vec::<SetupMatrixEntry>::deserialize(deserializer)?.into())
    }
}
