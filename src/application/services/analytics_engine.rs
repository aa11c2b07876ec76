//! Analytics Engine service module (spec.md §4.9)
//!
//! Pure, stateless computations over production logs, downtime events, and
//! quality records: OEE (availability x performance x quality), schedule
//! adherence, utilization/MTBF/MTTR, first-pass-yield/scrap-rate, and Pareto
//! breakdowns of any labeled counter (defect types, downtime reasons, ...).
//! None of these take ownership of their inputs or mutate anything — they are
//! called once per reporting period by `application::use_cases::compute_analytics`.

use std::collections::HashMap;

use crate::domain::entities::{DowntimeEvent, ProductionLog, QualityRecord, QualityResult, WorkOrder};
use crate::domain::value_objects::rounding::{round2, safe_ratio};
use crate::domain::value_objects::{AdherenceScore, OeeScore, ParetoEntry, UtilizationBreakdown};

/// The fraction of the observed average cycle time assumed to be the
/// "ideal" (manufacturer-rated) cycle time. spec.md's data model carries no
/// separate ideal-cycle-time field, so this crate derives one from
/// production history rather than inventing a per-part constant; see
/// DESIGN.md for the Open Question this resolves.
const IDEAL_CYCLE_TIME_FACTOR: f64 = 0.9;

/// Computes OEE for one machine/period from its raw production, downtime,
/// and quality history. `planned_runtime_minutes` is the sum of schedule-slot
/// durations for the machine within the period (spec.md §4.9), not the raw
/// period length. Zero production for the period returns `OeeScore::zero()`
/// rather than propagating a division-by-zero artifact.
pub fn compute_oee(
    planned_runtime_minutes: f64,
    production_logs: &[&ProductionLog],
    downtime_events: &[&DowntimeEvent],
    quality_records: &[&QualityRecord],
) -> OeeScore {
    let total_quantity: u32 = production_logs.iter().map(|log| log.quantity_produced).sum();
    if total_quantity == 0 {
        return OeeScore::zero();
    }

    let unplanned_downtime_minutes: f64 = downtime_events
        .iter()
        .filter(|event| event.is_unplanned())
        .map(|event| event.duration_minutes() as f64)
        .sum();
    let availability = safe_ratio(planned_runtime_minutes - unplanned_downtime_minutes, planned_runtime_minutes, 0.0).clamp(0.0, 1.0);

    let total_run_minutes: f64 = production_logs
        .iter()
        .map(|log| log.cycle_time_minutes * log.quantity_produced as f64)
        .sum();
    let observed_average_cycle_time = safe_ratio(total_run_minutes, total_quantity as f64, 0.0);
    let ideal_cycle_time = observed_average_cycle_time * IDEAL_CYCLE_TIME_FACTOR;
    let performance = safe_ratio(ideal_cycle_time * total_quantity as f64, total_run_minutes, 0.0).clamp(0.0, 1.0);

    let quality = first_pass_yield(quality_records);

    OeeScore::from_factors(availability, performance, quality)
}

/// How late a work order's actual start was against its plan. `None` when
/// either timestamp is missing (the work order has not yet run).
pub fn compute_adherence(work_order: &WorkOrder) -> Option<AdherenceScore> {
    let planned_start = work_order.planned_start?;
    let actual_start = work_order.actual_start?;
    let delta_minutes = (actual_start - planned_start).num_minutes();
    Some(AdherenceScore::from_delta_minutes(delta_minutes))
}

/// Splits a machine's period into productive/setup/downtime/idle minutes and
/// derives MTBF/MTTR from the unplanned subset of downtime.
pub fn compute_utilization(period_minutes: f64, production_logs: &[&ProductionLog], downtime_events: &[&DowntimeEvent]) -> UtilizationBreakdown {
    let productive_minutes: f64 = production_logs
        .iter()
        .map(|log| log.cycle_time_minutes * log.quantity_produced as f64)
        .sum();
    let setup_minutes: f64 = downtime_events
        .iter()
        .filter(|event| event.reason == "setup")
        .map(|event| event.duration_minutes() as f64)
        .sum();
    let unplanned_events: Vec<&&DowntimeEvent> = downtime_events.iter().filter(|event| event.is_unplanned()).collect();
    let downtime_minutes: f64 = unplanned_events.iter().map(|event| event.duration_minutes() as f64).sum();
    let idle_minutes = (period_minutes - productive_minutes - setup_minutes - downtime_minutes).max(0.0);

    UtilizationBreakdown::new(
        productive_minutes,
        setup_minutes,
        downtime_minutes,
        idle_minutes,
        unplanned_events.len() as u32,
        downtime_minutes,
    )
}

/// Passed inspections over total inspections. Defaults to 1.0 (perfect
/// quality) when no inspection records exist for the period, matching the
/// "no evidence of defects" convention spec.md §4.9 calls for.
pub fn first_pass_yield(quality_records: &[&QualityRecord]) -> f64 {
    if quality_records.is_empty() {
        return 1.0;
    }
    let passed = quality_records.iter().filter(|r| r.result == QualityResult::Pass).count();
    round2(safe_ratio(passed as f64, quality_records.len() as f64, 1.0))
}

/// Failed inspections over total inspections, defaulting to 0.0 with no
/// inspection history.
pub fn scrap_rate(quality_records: &[&QualityRecord]) -> f64 {
    if quality_records.is_empty() {
        return 0.0;
    }
    let failed = quality_records.iter().filter(|r| r.result == QualityResult::Fail).count();
    round2(safe_ratio(failed as f64, quality_records.len() as f64, 0.0))
}

/// Ranks `counts` descending by value, keeps the top 10, and attaches each
/// entry's share and running cumulative share of the *whole* population's
/// total (a defect-type or downtime-reason Pareto breakdown, spec.md §4.9).
pub fn pareto_breakdown(counts: &HashMap<String, f64>) -> Vec<ParetoEntry> {
    const TOP_N: usize = 10;
    let total: f64 = counts.values().sum();
    let mut entries: Vec<(&String, &f64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(b.0)));
    entries.truncate(TOP_N);

    let mut cumulative = 0.0;
    entries
        .into_iter()
        .map(|(label, value)| {
            let percentage = safe_ratio(*value, total, 0.0) * 100.0;
            cumulative += percentage;
            ParetoEntry {
                label: label.clone(),
                value: *value,
                percentage: round2(percentage),
                cumulative_percentage: round2(cumulative),
            }
        })
        .collect()
}
