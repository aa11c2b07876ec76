//! In-Memory Plan Repository implementation
//!
//! Reference `PlanRepository` adapter backed by two `HashMap`s. Suitable for
//! tests and the CLI demo; a real deployment implements the same trait
//! against a database.

use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::domain::entities::{CapacityBucket, ScheduleSlot};
use crate::domain::repositories::PlanRepository;

/// In-memory implementation of the PlanRepository trait.
///
/// Slots are keyed by their own id (not by plan) so a single-slot lookup
/// doesn't need to scan every plan; buckets are keyed by plan id since they
/// are always read as a whole.
pub struct InMemoryPlanRepository {
    slots: HashMap<String, ScheduleSlot>,
    buckets_by_plan: HashMap<String, Vec<CapacityBucket>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            buckets_by_plan: HashMap::new(),
        }
    }
}

impl Default for InMemoryPlanRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn replace_plan(&mut self, plan_id: &str, slots: Vec<ScheduleSlot>, buckets: Vec<CapacityBucket>) -> Result<()> {
        self.slots.retain(|_, slot| slot.plan_id != plan_id || slot.locked);
        for slot in slots {
            self.slots.insert(slot.id.clone(), slot);
        }
        self.buckets_by_plan.insert(plan_id.to_string(), buckets);
        Ok(())
    }

    fn slots_for_plan(&self, plan_id: &str) -> Vec<&ScheduleSlot> {
        self.slots.values().filter(|slot| slot.plan_id == plan_id).collect()
    }

    fn buckets_for_plan(&self, plan_id: &str) -> Vec<&CapacityBucket> {
        self.buckets_by_plan.get(plan_id).map(|buckets| buckets.iter().collect()).unwrap_or_default()
    }

    fn find_slot(&self, slot_id: &str) -> Option<&ScheduleSlot> {
        self.slots.get(slot_id)
    }

    fn update_slot(&mut self, slot_id: &str, updated: ScheduleSlot) -> Result<()> {
        match self.slots.get(slot_id) {
            Some(existing) if existing.locked => Err(anyhow!("slot {slot_id} is locked and cannot be updated")),
            Some(_) => {
                self.slots.insert(slot_id.to_string(), updated);
                Ok(())
            }
            None => Err(anyhow!("slot {slot_id} does not exist")),
        }
    }
}
