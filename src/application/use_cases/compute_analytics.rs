//! Compute Analytics use case module (spec.md §4.9)
//!
//! Assembles per-machine OEE/utilization figures, per-work-order adherence
//! figures, shop-wide quality figures, and Pareto breakdowns of defect types
//! and downtime reasons for one reporting period. Like `RunScheduling`, this
//! is a pure function over a fully-loaded set of entities.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::application::services::analytics_engine;
use crate::domain::entities::{DowntimeEvent, Machine, OperatorSession, ProductionLog, QualityRecord, ScheduleSlot, WorkOrder};
use crate::domain::errors::AnalyticsError;
use crate::domain::value_objects::{AdherenceScore, OeeScore, ParetoEntry, UtilizationBreakdown};

pub struct AnalyticsRequest<'a> {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub machines: &'a [Machine],
    pub work_orders: &'a [WorkOrder],
    pub production_logs: &'a [ProductionLog],
    pub downtime_events: &'a [DowntimeEvent],
    pub quality_records: &'a [QualityRecord],
    pub schedule_slots: &'a [ScheduleSlot],
    /// Accepted for interface parity with spec.md §6's analytics invocation
    /// signature; not yet folded into a published metric (see DESIGN.md).
    pub operator_sessions: &'a [OperatorSession],
}

#[derive(Debug, Clone)]
pub struct MachineKpis {
    pub machine_id: String,
    pub oee: OeeScore,
    pub utilization: UtilizationBreakdown,
}

#[derive(Debug, Clone)]
pub struct WorkOrderAdherence {
    pub work_order_id: String,
    pub adherence: AdherenceScore,
}

#[derive(Debug, Clone)]
pub struct AnalyticsResult {
    pub machine_kpis: Vec<MachineKpis>,
    pub adherence: Vec<WorkOrderAdherence>,
    pub first_pass_yield: f64,
    pub scrap_rate: f64,
    pub defect_pareto: Vec<ParetoEntry>,
    pub downtime_pareto: Vec<ParetoEntry>,
}

/// Use case that computes the full KPI suite for one reporting period.
pub struct ComputeAnalytics;

impl ComputeAnalytics {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, request: &AnalyticsRequest) -> Result<AnalyticsResult, AnalyticsError> {
        if request.period_end < request.period_start {
            return Err(AnalyticsError::InvalidPeriod);
        }
        let period_minutes = (request.period_end - request.period_start).num_minutes() as f64;

        let mut logs_by_machine: HashMap<&str, Vec<&ProductionLog>> = HashMap::new();
        for log in request.production_logs {
            logs_by_machine.entry(log.machine_id.as_str()).or_default().push(log);
        }
        let mut downtime_by_machine: HashMap<&str, Vec<&DowntimeEvent>> = HashMap::new();
        for event in request.downtime_events {
            downtime_by_machine.entry(event.machine_id.as_str()).or_default().push(event);
        }
        let mut quality_by_machine: HashMap<&str, Vec<&QualityRecord>> = HashMap::new();
        for record in request.quality_records {
            quality_by_machine.entry(record.machine_id.as_str()).or_default().push(record);
        }
        let mut slots_by_machine: HashMap<&str, Vec<&ScheduleSlot>> = HashMap::new();
        for slot in request.schedule_slots {
            if slot.is_active() && slot.start < request.period_end && slot.end > request.period_start {
                slots_by_machine.entry(slot.machine_id.as_str()).or_default().push(slot);
            }
        }

        let mut machine_ids: Vec<&str> = request
            .machines
            .iter()
            .map(|m| m.id.as_str())
            .chain(logs_by_machine.keys().copied())
            .chain(downtime_by_machine.keys().copied())
            .chain(quality_by_machine.keys().copied())
            .collect();
        machine_ids.sort();
        machine_ids.dedup();

        let machine_kpis = machine_ids
            .into_iter()
            .map(|machine_id| {
                let logs = logs_by_machine.get(machine_id).cloned().unwrap_or_default();
                let downtime = downtime_by_machine.get(machine_id).cloned().unwrap_or_default();
                let quality = quality_by_machine.get(machine_id).cloned().unwrap_or_default();
                let slots = slots_by_machine.get(machine_id).cloned().unwrap_or_default();
                let planned_runtime: f64 = slots.iter().map(|slot| slot.duration_minutes() as f64).sum();
                MachineKpis {
                    machine_id: machine_id.to_string(),
                    oee: analytics_engine::compute_oee(planned_runtime, &logs, &downtime, &quality),
                    utilization: analytics_engine::compute_utilization(period_minutes, &logs, &downtime),
                }
            })
            .collect();

        let adherence = request
            .work_orders
            .iter()
            .filter_map(|work_order| {
                analytics_engine::compute_adherence(work_order).map(|adherence| WorkOrderAdherence {
                    work_order_id: work_order.id.clone(),
                    adherence,
                })
            })
            .collect();

        let quality_refs: Vec<&QualityRecord> = request.quality_records.iter().collect();
        let first_pass_yield = analytics_engine::first_pass_yield(&quality_refs);
        let scrap_rate = analytics_engine::scrap_rate(&quality_refs);

        let mut defect_counts: HashMap<String, f64> = HashMap::new();
        for record in request.quality_records {
            if let Some(defect_type) = &record.defect_type {
                *defect_counts.entry(defect_type.clone()).or_insert(0.0) += 1.0;
            }
        }
        let defect_pareto = analytics_engine::pareto_breakdown(&defect_counts);

        let mut downtime_counts: HashMap<String, f64> = HashMap::new();
        for event in request.downtime_events {
            *downtime_counts.entry(event.reason.clone()).or_insert(0.0) += event.duration_minutes() as f64;
        }
        let downtime_pareto = analytics_engine::pareto_breakdown(&downtime_counts);

        Ok(AnalyticsResult {
            machine_kpis,
            adherence,
            first_pass_yield,
            scrap_rate,
            defect_pareto,
            downtime_pareto,
        })
    }
}

impl Default for ComputeAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn empty_request(period_start: DateTime<Utc>, period_end: DateTime<Utc>) -> AnalyticsRequest<'static> {
        AnalyticsRequest {
            period_start,
            period_end,
            machines: &[],
            work_orders: &[],
            production_logs: &[],
            downtime_events: &[],
            quality_records: &[],
            schedule_slots: &[],
            operator_sessions: &[],
        }
    }

    #[test]
    fn rejects_an_inverted_period() {
        let now = Utc::now();
        let request = empty_request(now, now - Duration::hours(1));
        assert_eq!(ComputeAnalytics::new().execute(&request).unwrap_err(), AnalyticsError::InvalidPeriod);
    }

    #[test]
    fn aggregates_kpis_per_machine() {
        let now = Utc::now();
        let logs = vec![ProductionLog {
            machine_id: "M1".into(),
            work_order_id: "WO-1".into(),
            timestamp: now,
            quantity_produced: 10,
            cycle_time_minutes: 5.0,
        }];
        let mut request = empty_request(now - Duration::hours(8), now);
        request.production_logs = &logs;
        let result = ComputeAnalytics::new().execute(&request).unwrap();
        assert_eq!(result.machine_kpis.len(), 1);
        assert_eq!(result.machine_kpis[0].machine_id, "M1");
        assert_eq!(result.first_pass_yield, 1.0);
    }

    #[test]
    fn machine_with_no_history_still_reports_zero_kpis() {
        let now = Utc::now();
        let machines = vec![Machine::new("M1".into(), "Mill 1".into(), "CNC".into())];
        let mut request = empty_request(now - Duration::hours(8), now);
        request.machines = &machines;
        let result = ComputeAnalytics::new().execute(&request).unwrap();
        assert_eq!(result.machine_kpis.len(), 1);
        assert_eq!(result.machine_kpis[0].oee.oee, 0.0);
    }

    #[test]
    fn oee_availability_uses_in_period_schedule_slot_duration_not_the_raw_period_length() {
        use crate::domain::entities::DispatchRule;
        let now = Utc::now();
        let period_start = now - Duration::hours(8);
        // Only 100 minutes of the 8-hour period were actually scheduled on M1.
        let slot = ScheduleSlot::new("S1".into(), "PLAN-1".into(), "WO-1".into(), "OP-1".into(), "M1".into(), period_start, 0, 100, 10, 0.0, DispatchRule::Fifo);
        let slots = vec![slot];
        let logs = vec![ProductionLog {
            machine_id: "M1".into(),
            work_order_id: "WO-1".into(),
            timestamp: period_start,
            quantity_produced: 10,
            cycle_time_minutes: 10.0,
        }];
        let mut request = empty_request(period_start, now);
        request.schedule_slots = &slots;
        request.production_logs = &logs;
        let result = ComputeAnalytics::new().execute(&request).unwrap();
        // availability = (planned_runtime - unplanned_downtime) / planned_runtime = 100/100 = 1.0
        assert_eq!(result.machine_kpis[0].oee.availability, 1.0);
    }

    #[test]
    fn work_order_without_actual_start_has_no_adherence_entry() {
        let now = Utc::now();
        let work_order = WorkOrder::new("WO-1".into(), "SO-1".into(), "PN-1".into(), 5, now);
        let work_orders = vec![work_order];
        let mut request = empty_request(now - Duration::hours(1), now);
        request.work_orders = &work_orders;
        let result = ComputeAnalytics::new().execute(&request).unwrap();
        assert!(result.adherence.is_empty());
    }

    #[test]
    fn defect_pareto_is_truncated_to_top_ten() {
        let now = Utc::now();
        let quality_records: Vec<QualityRecord> = (0..15)
            .map(|i| crate::domain::entities::QualityRecord {
                work_order_id: "WO-1".into(),
                machine_id: "M1".into(),
                part_number: "PN-1".into(),
                inspection_date: now,
                result: crate::domain::entities::QualityResult::Fail,
                defect_type: Some(format!("DEFECT-{i}")),
            })
            .collect();
        let mut request = empty_request(now - Duration::hours(1), now);
        request.quality_records = &quality_records;
        let result = ComputeAnalytics::new().execute(&request).unwrap();
        assert_eq!(result.defect_pareto.len(), 10);
    }
}
