//! Web DTO module
//!
//! Wire types for the REST sketch (spec.md §6): plain structs serialized by
//! serde, no behavior of their own beyond the `ApiResponse` envelope every
//! handler wraps its payload in.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Calendar, ScheduleSlot, SchedulingConflict};
use crate::domain::value_objects::ParetoEntry;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    #[serde(rename = "start")]
    pub start: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "end")]
    pub end: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "planId")]
    pub plan_id: String,
    #[serde(rename = "machineId")]
    pub machine_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotRangeResponse {
    pub slots: Vec<ScheduleSlot>,
}

/// Body for `PATCH /schedule/slots/:id` — every field optional, only
/// supplied ones are applied to the existing slot.
#[derive(Debug, Deserialize, Default)]
pub struct SlotPatch {
    pub start: Option<chrono::DateTime<chrono::Utc>>,
    pub machine_id: Option<String>,
    pub status: Option<crate::domain::entities::SlotStatus>,
    pub locked: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateSlotsRequest {
    pub slots: Vec<ScheduleSlot>,
    pub calendar: Calendar,
}

#[derive(Debug, Serialize)]
pub struct ValidateSlotsResponse {
    pub conflicts: Vec<SchedulingConflict>,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateEntry {
    pub id: String,
    pub updates: SlotPatch,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub updates: Vec<BulkUpdateEntry>,
}

#[derive(Debug, Serialize)]
pub struct BulkUpdateResponse {
    pub updated: Vec<String>,
}

/// Query filters accepted by every `/analytics/*` route (spec.md §6). The
/// dataset itself arrives as the request body — there is no separate
/// historical data store for this sketch to query by date range alone, so
/// `from`/`to` only narrow what the caller already supplied.
#[derive(Debug, Deserialize, Default)]
pub struct AnalyticsQuery {
    #[serde(rename = "machineId")]
    pub machine_id: Option<String>,
    #[serde(rename = "workOrderId")]
    pub work_order_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QualityResponse {
    pub first_pass_yield: f64,
    pub scrap_rate: f64,
    pub defect_pareto: Vec<ParetoEntry>,
}
