pub mod rounding;
pub mod plan_id;
pub mod oee_score;
pub mod utilization_breakdown;
pub mod adherence_score;
pub mod pareto_entry;

pub use plan_id::PlanId;
pub use oee_score::OeeScore;
pub use utilization_breakdown::UtilizationBreakdown;
pub use adherence_score::AdherenceScore;
pub use pareto_entry::ParetoEntry;
pub use rounding::{round2, safe_ratio};
