//! KPI output DTO module
//!
//! Flattens an `AnalyticsResult` into a report-friendly shape, adding a
//! shop-wide average OEE so a caller doesn't have to average the per-machine
//! figures itself.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::{AnalyticsResult, MachineKpis, WorkOrderAdherence};
use crate::domain::value_objects::ParetoEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiOutput {
    pub average_oee: f64,
    pub machine_kpis: Vec<MachineKpiOutput>,
    pub adherence: Vec<WorkOrderAdherenceOutput>,
    pub first_pass_yield: f64,
    pub scrap_rate: f64,
    pub defect_pareto: Vec<ParetoEntry>,
    pub downtime_pareto: Vec<ParetoEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineKpiOutput {
    pub machine_id: String,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub productive_minutes: f64,
    pub downtime_minutes: f64,
    pub idle_minutes: f64,
    pub mtbf_hours: f64,
    pub mttr_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderAdherenceOutput {
    pub work_order_id: String,
    pub delay_minutes: i64,
    pub on_time: bool,
    pub adherence_score: f64,
}

impl KpiOutput {
    pub fn from_result(result: AnalyticsResult) -> Self {
        let average_oee = Self::average_oee(&result.machine_kpis);

        Self {
            average_oee,
            machine_kpis: result.machine_kpis.into_iter().map(MachineKpiOutput::from_kpis).collect(),
            adherence: result.adherence.into_iter().map(WorkOrderAdherenceOutput::from_adherence).collect(),
            first_pass_yield: result.first_pass_yield,
            scrap_rate: result.scrap_rate,
            defect_pareto: result.defect_pareto,
            downtime_pareto: result.downtime_pareto,
        }
    }

    fn average_oee(machine_kpis: &[MachineKpis]) -> f64 {
        if machine_kpis.is_empty() {
            return 0.0;
        }
        let total: f64 = machine_kpis.iter().map(|m| m.oee.oee).sum();
        total / machine_kpis.len() as f64
    }
}

impl MachineKpiOutput {
    fn from_kpis(kpis: MachineKpis) -> Self {
        Self {
            machine_id: kpis.machine_id,
            availability: kpis.oee.availability,
            performance: kpis.oee.performance,
            quality: kpis.oee.quality,
            oee: kpis.oee.oee,
            productive_minutes: kpis.utilization.productive_minutes,
            downtime_minutes: kpis.utilization.downtime_minutes,
            idle_minutes: kpis.utilization.idle_minutes,
            mtbf_hours: kpis.utilization.mtbf_hours,
            mttr_hours: kpis.utilization.mttr_hours,
        }
    }
}

impl WorkOrderAdherenceOutput {
    fn from_adherence(adherence: WorkOrderAdherence) -> Self {
        Self {
            work_order_id: adherence.work_order_id,
            delay_minutes: adherence.adherence.delay_minutes,
            on_time: adherence.adherence.on_time,
            adherence_score: adherence.adherence.adherence_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::OeeScore;

    #[test]
    fn average_oee_is_zero_with_no_machines() {
        let result = AnalyticsResult {
            machine_kpis: vec![],
            adherence: vec![],
            first_pass_yield: 1.0,
            scrap_rate: 0.0,
            defect_pareto: vec![],
            downtime_pareto: vec![],
        };
        let output = KpiOutput::from_result(result);
        assert_eq!(output.average_oee, 0.0);
    }

    #[test]
    fn average_oee_averages_across_machines() {
        let result = AnalyticsResult {
            machine_kpis: vec![
                MachineKpis {
                    machine_id: "M1".into(),
                    oee: OeeScore::from_factors(1.0, 1.0, 1.0),
                    utilization: crate::domain::value_objects::UtilizationBreakdown::new(0.0, 0.0, 0.0, 0.0, 0, 0.0),
                },
                MachineKpis {
                    machine_id: "M2".into(),
                    oee: OeeScore::from_factors(0.5, 1.0, 1.0),
                    utilization: crate::domain::value_objects::UtilizationBreakdown::new(0.0, 0.0, 0.0, 0.0, 0, 0.0),
                },
            ],
            adherence: vec![],
            first_pass_yield: 1.0,
            scrap_rate: 0.0,
            defect_pareto: vec![],
            downtime_pareto: vec![],
        };
        let output = KpiOutput::from_result(result);
        assert_eq!(output.average_oee, 0.75);
    }
}
