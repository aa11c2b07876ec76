//! Plan repository trait module
//!
//! The scheduler and analytics engine are pure functions; persistence is an
//! external collaborator (spec.md §1). This trait is the seam a real
//! deployment implements against a database — this crate owns only the
//! contract and an in-memory reference adapter
//! (`infrastructure::repositories::InMemoryPlanRepository`) used by tests
//! and the CLI demo.

use anyhow::Result;

use crate::domain::entities::{CapacityBucket, ScheduleSlot};

pub trait PlanRepository {
    /// Replaces every non-locked slot currently stored for `plan_id` with
    /// `slots` (spec.md §3: "a new plan replaces prior non-locked slots for
    /// its scope"). Locked slots are left untouched.
    fn replace_plan(&mut self, plan_id: &str, slots: Vec<ScheduleSlot>, buckets: Vec<CapacityBucket>) -> Result<()>;

    fn slots_for_plan(&self, plan_id: &str) -> Vec<&ScheduleSlot>;

    fn buckets_for_plan(&self, plan_id: &str) -> Vec<&CapacityBucket>;

    /// Finds a slot by id regardless of plan, for the `PATCH` single-slot
    /// update path.
    fn find_slot(&self, slot_id: &str) -> Option<&ScheduleSlot>;

    /// Applies an update to a single slot. Implementations must reject the
    /// update (spec.md §6: 409 locked-slot conflict) when the existing slot
    /// is locked.
    fn update_slot(&mut self, slot_id: &str, updated: ScheduleSlot) -> Result<()>;
}
