pub mod run_scheduling;
pub mod compute_analytics;

pub use run_scheduling::{RunScheduling, SchedulingRequest, SchedulingResult};
pub use compute_analytics::{AnalyticsRequest, AnalyticsResult, ComputeAnalytics, MachineKpis, WorkOrderAdherence};
