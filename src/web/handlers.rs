//! HTTP request handlers module
//!
//! Thin handlers for the REST sketch (spec.md §6): each one loads its body,
//! calls straight into the pure use cases or the `PlanRepository`, and wraps
//! the result in `ApiResponse`. No session, no auth — this surface is a
//! sketch for completeness, not a hardened deployment.

use std::sync::Mutex;

use actix_web::{web, HttpResponse};
use tracing::{error, info};

use crate::application::use_cases::{AnalyticsRequest, ComputeAnalytics, RunScheduling, SchedulingRequest};
use crate::domain::entities::{ConflictSeverity, ConflictType, SchedulingConflict};
use crate::domain::repositories::PlanRepository;
use crate::infrastructure::repositories::InMemoryPlanRepository;
use crate::presentation::dto::{AnalyticsInput, KpiOutput, ScheduleInput, ScheduleOutput};
use crate::web::models::{
    AnalyticsQuery, ApiResponse, BulkUpdateRequest, BulkUpdateResponse, QualityResponse, ScheduleQuery, SlotPatch, SlotRangeResponse, ValidateSlotsRequest, ValidateSlotsResponse,
};

pub type SharedPlanRepository = Mutex<InMemoryPlanRepository>;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("OK"))
}

/// `POST /scheduling/preview` — runs the scheduler over a fully-loaded
/// input and persists the result under its plan id (spec.md §6).
pub async fn scheduling_preview(body: web::Json<ScheduleInput>, repository: web::Data<SharedPlanRepository>) -> HttpResponse {
    let input = body.into_inner();
    let request = SchedulingRequest {
        plan_id: input.plan_id.clone(),
        work_orders: &input.work_orders,
        operations: &input.operations,
        machines: &input.machines,
        capabilities: &input.capabilities,
        setup_matrix: &input.setup_matrix,
        calendar: &input.calendar,
        policy: &input.policy,
        now: input.now,
    };

    let result = match RunScheduling::new().execute(&request) {
        Ok(result) => result,
        Err(err) => {
            error!("scheduling preview rejected: {err}");
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error(err.to_string()));
        }
    };
    let output = ScheduleOutput::from_result(result);

    let mut repository = repository.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(err) = repository.replace_plan(&input.plan_id, output.slots.clone(), output.buckets.clone()) {
        error!("failed to persist plan {}: {err}", input.plan_id);
        return HttpResponse::InternalServerError().json(ApiResponse::<()>::error(err.to_string()));
    }

    info!("scheduling preview for plan {} produced {} slots", input.plan_id, output.summary.total_slots);
    HttpResponse::Ok().json(ApiResponse::success(output))
}

/// `GET /schedule?planId=…&start=…&end=…&machineId=…`
pub async fn get_schedule(query: web::Query<ScheduleQuery>, repository: web::Data<SharedPlanRepository>) -> HttpResponse {
    let repository = repository.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let slots = repository
        .slots_for_plan(&query.plan_id)
        .into_iter()
        .filter(|slot| query.machine_id.as_deref().map(|machine_id| slot.machine_id == machine_id).unwrap_or(true))
        .filter(|slot| query.start.map(|start| slot.end > start).unwrap_or(true))
        .filter(|slot| query.end.map(|end| slot.start < end).unwrap_or(true))
        .cloned()
        .collect();

    HttpResponse::Ok().json(ApiResponse::success(SlotRangeResponse { slots }))
}

/// `PATCH /schedule/slots/:id` — rejects locked slots with 409 (spec.md §6).
pub async fn patch_slot(path: web::Path<String>, patch: web::Json<SlotPatch>, repository: web::Data<SharedPlanRepository>) -> HttpResponse {
    let slot_id = path.into_inner();
    let mut repository = repository.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let Some(existing) = repository.find_slot(&slot_id) else {
        return HttpResponse::NotFound().json(ApiResponse::<()>::error(format!("slot {slot_id} not found")));
    };
    if existing.locked && patch.locked != Some(false) {
        return HttpResponse::Conflict().json(ApiResponse::<()>::error(format!("slot {slot_id} is locked")));
    }

    let mut updated = existing.clone();
    if let Some(start) = patch.start {
        let duration = updated.end - updated.start;
        updated.start = start;
        updated.end = start + duration;
    }
    if let Some(machine_id) = &patch.machine_id {
        updated.machine_id = machine_id.clone();
    }
    if let Some(status) = patch.status {
        updated.status = status;
    }
    if let Some(locked) = patch.locked {
        updated.locked = locked;
    }

    match repository.update_slot(&slot_id, updated.clone()) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(updated)),
        Err(err) => HttpResponse::Conflict().json(ApiResponse::<()>::error(err.to_string())),
    }
}

/// `POST /schedule/validate` — checks a candidate slot set for overlap and
/// calendar admissibility without persisting anything (spec.md §6, §8).
pub async fn validate_slots(body: web::Json<ValidateSlotsRequest>) -> HttpResponse {
    let request = body.into_inner();
    let mut conflicts = Vec::new();

    for slot in &request.slots {
        if !crate::application::services::calendar_engine::admissible(&request.calendar, slot.start, slot.end) {
            conflicts.push(SchedulingConflict::new(
                ConflictType::CapacityOverload,
                ConflictSeverity::Medium,
                format!("slot {} falls outside calendar-admissible hours", slot.id),
                vec![slot.operation_id.clone()],
            ));
        }
    }

    for (i, a) in request.slots.iter().enumerate() {
        for b in request.slots.iter().skip(i + 1) {
            if a.overlaps(b) {
                conflicts.push(SchedulingConflict::new(
                    ConflictType::ResourceConflict,
                    ConflictSeverity::High,
                    format!("slots {} and {} overlap on machine {}", a.id, b.id, a.machine_id),
                    vec![a.operation_id.clone(), b.operation_id.clone()],
                ));
            }
        }
    }

    HttpResponse::Ok().json(ApiResponse::success(ValidateSlotsResponse { conflicts }))
}

/// `POST /schedule/bulk-update` — atomic at the request level: if any
/// targeted slot is locked, the whole request fails and nothing is applied
/// (spec.md §6).
pub async fn bulk_update(body: web::Json<BulkUpdateRequest>, repository: web::Data<SharedPlanRepository>) -> HttpResponse {
    let request = body.into_inner();
    let mut repository = repository.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    for entry in &request.updates {
        match repository.find_slot(&entry.id) {
            Some(slot) if slot.locked && entry.updates.locked != Some(false) => {
                return HttpResponse::Conflict().json(ApiResponse::<()>::error(format!("slot {} is locked; bulk update aborted", entry.id)));
            }
            Some(_) => {}
            None => return HttpResponse::NotFound().json(ApiResponse::<()>::error(format!("slot {} not found; bulk update aborted", entry.id))),
        }
    }

    let mut updated = Vec::with_capacity(request.updates.len());
    for entry in request.updates {
        let existing = repository.find_slot(&entry.id).expect("existence checked above").clone();
        let mut slot = existing;
        if let Some(start) = entry.updates.start {
            let duration = slot.end - slot.start;
            slot.start = start;
            slot.end = start + duration;
        }
        if let Some(machine_id) = entry.updates.machine_id {
            slot.machine_id = machine_id;
        }
        if let Some(status) = entry.updates.status {
            slot.status = status;
        }
        if let Some(locked) = entry.updates.locked {
            slot.locked = locked;
        }
        repository.update_slot(&entry.id, slot).expect("lock state checked above");
        updated.push(entry.id);
    }

    HttpResponse::Ok().json(ApiResponse::success(BulkUpdateResponse { updated }))
}

/// Shared plumbing for the `/analytics/*` routes: each carries its full
/// historical dataset as the request body (spec.md §6 names these as GET
/// routes, but nothing else in the spec defines a server-side store for
/// production logs/downtime/quality records to query by date range alone,
/// so the caller supplies the slice it wants analyzed).
fn run_analytics(input: AnalyticsInput) -> Result<KpiOutput, String> {
    let operator_sessions = input.operator_sessions.clone();
    let request = AnalyticsRequest {
        period_start: input.period_start,
        period_end: input.period_end,
        machines: &input.machines,
        work_orders: &input.work_orders,
        production_logs: &input.production_logs,
        downtime_events: &input.downtime_events,
        quality_records: &input.quality_records,
        schedule_slots: &input.schedule_slots,
        operator_sessions: &operator_sessions,
    };
    ComputeAnalytics::new().execute(&request).map(KpiOutput::from_result).map_err(|err| err.to_string())
}

/// `GET /analytics/kpis` — the full per-machine KPI set, optionally
/// narrowed to one machine.
pub async fn analytics_kpis(body: web::Json<AnalyticsInput>, query: web::Query<AnalyticsQuery>) -> HttpResponse {
    match run_analytics(body.into_inner()) {
        Ok(mut kpis) => {
            if let Some(machine_id) = &query.machine_id {
                kpis.machine_kpis.retain(|kpi| &kpi.machine_id == machine_id);
            }
            HttpResponse::Ok().json(ApiResponse::success(kpis))
        }
        Err(err) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(err)),
    }
}

/// `GET /analytics/oee` — availability/performance/quality/OEE only.
pub async fn analytics_oee(body: web::Json<AnalyticsInput>, query: web::Query<AnalyticsQuery>) -> HttpResponse {
    match run_analytics(body.into_inner()) {
        Ok(kpis) => {
            let machines = kpis
                .machine_kpis
                .into_iter()
                .filter(|kpi| query.machine_id.as_deref().map(|id| kpi.machine_id == id).unwrap_or(true))
                .collect::<Vec<_>>();
            HttpResponse::Ok().json(ApiResponse::success(machines))
        }
        Err(err) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(err)),
    }
}

/// `GET /analytics/adherence` — per-work-order due-date adherence.
pub async fn analytics_adherence(body: web::Json<AnalyticsInput>, query: web::Query<AnalyticsQuery>) -> HttpResponse {
    match run_analytics(body.into_inner()) {
        Ok(kpis) => {
            let adherence = kpis
                .adherence
                .into_iter()
                .filter(|entry| query.work_order_id.as_deref().map(|id| entry.work_order_id == id).unwrap_or(true))
                .collect::<Vec<_>>();
            HttpResponse::Ok().json(ApiResponse::success(adherence))
        }
        Err(err) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(err)),
    }
}

/// `GET /analytics/utilization` — the productive/downtime/idle minute split
/// and MTBF/MTTR, per machine.
pub async fn analytics_utilization(body: web::Json<AnalyticsInput>, query: web::Query<AnalyticsQuery>) -> HttpResponse {
    match run_analytics(body.into_inner()) {
        Ok(kpis) => {
            let machines = kpis
                .machine_kpis
                .into_iter()
                .filter(|kpi| query.machine_id.as_deref().map(|id| kpi.machine_id == id).unwrap_or(true))
                .collect::<Vec<_>>();
            HttpResponse::Ok().json(ApiResponse::success(machines))
        }
        Err(err) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(err)),
    }
}

/// `GET /analytics/quality` — first-pass yield, scrap rate, and defect
/// Pareto breakdown.
pub async fn analytics_quality(body: web::Json<AnalyticsInput>) -> HttpResponse {
    match run_analytics(body.into_inner()) {
        Ok(kpis) => HttpResponse::Ok().json(ApiResponse::success(QualityResponse {
            first_pass_yield: kpis.first_pass_yield,
            scrap_rate: kpis.scrap_rate,
            defect_pareto: kpis.defect_pareto,
        })),
        Err(err) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(err)),
    }
}
